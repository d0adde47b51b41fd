use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    /// YAML of the effective configuration (file values plus CLI overrides).
    pub fn render(cfg: &Config) -> AppResult<String> {
        cfg.to_yaml()
    }

    /// Editor from `--editor`, then `$EDITOR` / `$VISUAL`, then a platform default.
    pub fn pick_editor(requested: Option<&str>) -> String {
        requested
            .map(str::to_string)
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    pub fn edit(path: &Path, editor: &str) -> AppResult<()> {
        if !path.exists() {
            Config::default().save_to(path)?;
        }

        let status = Command::new(editor)
            .arg(path)
            .status()
            .map_err(|e| AppError::Config(format!("cannot run editor '{editor}': {e}")))?;

        if !status.success() {
            return Err(AppError::Config(format!("editor '{editor}' exited with {status}")));
        }

        // reject a broken file right away
        Config::load_from(path)?;
        Ok(())
    }
}
