//! Table rendering utilities for CLI outputs.

use crate::utils::colors::RESET;
use crate::utils::formatting::{bold, pad_right};
use unicode_width::UnicodeWidthStr;

pub struct Cell {
    pub text: String,
    pub color: Option<&'static str>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
        }
    }

    pub fn colored(text: impl Into<String>, color: &'static str) -> Self {
        Self {
            text: text.into(),
            color: Some(color),
        }
    }
}

/// Column widths follow the widest cell, measured in terminal columns.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| UnicodeWidthStr::width(h.as_str()))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(UnicodeWidthStr::width(cell.text.as_str()));
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        let header: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad_right(h, *w))
            .collect();
        out.push_str(&bold(header.join("  ").trim_end()));
        out.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        out.push_str(&"-".repeat(total));
        out.push('\n');

        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| {
                    let padded = pad_right(&cell.text, *w);
                    match cell.color {
                        // color the text only, keep padding plain
                        Some(c) => padded.replacen(&cell.text, &format!("{c}{}{RESET}", cell.text), 1),
                        None => padded,
                    }
                })
                .collect();
            out.push_str(cells.join("  ").trim_end());
            out.push('\n');
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_grow_to_widest_cell() {
        let mut t = Table::new(["ID", "Name"]);
        t.add_row(vec![Cell::plain("1"), Cell::plain("Sarah Connor")]);
        t.add_row(vec![Cell::plain("22"), Cell::plain("Bob")]);
        let out = t.render();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[2], "1   Sarah Connor");
        assert_eq!(lines[3], "22  Bob");
    }

    #[test]
    fn colored_cells_keep_alignment() {
        let mut t = Table::new(["Loc", "X"]);
        t.add_row(vec![Cell::colored("ab", "\x1b[31m"), Cell::plain("y")]);
        let out = t.render();
        assert!(out.contains("\x1b[31mab\x1b[0m   y"));
    }
}
