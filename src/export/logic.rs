// src/export/logic.rs

use crate::core::resolve::{ResolveLogic, ViewMode};
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ResolvedExport, username_index};
use crate::holidays::HolidayCalendar;
use crate::models::LocationKind;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// What to export: the resolved calendar of `view` over `[start, end]`.
pub struct ExportRequest<'a> {
    pub view: &'a ViewMode,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub filter: Option<LocationKind>,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Build the flat export rows without writing anything.
    pub fn rows(
        pool: &DbPool,
        holidays: &HolidayCalendar,
        req: &ExportRequest,
    ) -> AppResult<Vec<ResolvedExport>> {
        let entries = ResolveLogic::resolve(
            &pool.conn,
            holidays,
            req.view,
            req.start,
            req.end,
            req.filter,
        )?;
        let names = username_index(&users::list(&pool.conn)?);

        Ok(entries
            .iter()
            .map(|e| ResolvedExport::from_entry(e, &names))
            .collect())
    }

    /// Write the resolved calendar to `file`. Returns the number of rows.
    pub fn export(
        pool: &DbPool,
        holidays: &HolidayCalendar,
        req: &ExportRequest,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let rows = Self::rows(pool, holidays, req)?;
        if rows.is_empty() {
            warning("No entries found for the selected period.");
        }

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
        }

        Ok(rows.len())
    }
}
