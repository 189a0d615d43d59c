use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::bus::DataChangeBus;
use crate::core::del::DeleteLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { employee, force } = cmd {
        let actor = cfg.acting_user()?;
        let user = employee.as_deref().unwrap_or(actor);

        if !*force {
            warning(format!(
                "Delete ALL punches of '{user}'? This action is irreversible."
            ));
            if !confirm("Confirm")? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let pool = open_db(cfg)?;
        let bus = DataChangeBus::new();
        let removed = DeleteLogic::clear_history(&pool, &bus, actor, user)?;
        success(format!("{removed} punch(es) of '{user}' deleted."));
    }

    Ok(())
}
