use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        if *print_config {
            println!("📄 Current configuration:\n");
            println!("{}", ConfigLogic::render(cfg)?);
        }

        if *edit_config {
            let path = Config::config_file();
            let editor = ConfigLogic::pick_editor(editor.as_deref());
            ConfigLogic::edit(&path, &editor)?;
            success(format!("Configuration file edited successfully using '{editor}'"));
        }
    }

    Ok(())
}
