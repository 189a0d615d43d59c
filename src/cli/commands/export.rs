use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::{ExportLogic, ExportRequest};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        employee,
        report,
        force,
    } = cmd
    {
        let actor = cfg.acting_user()?;
        let pool = open_db(cfg)?;
        let req = ExportRequest {
            format: *format,
            file: file.clone(),
            range: range.clone(),
            user: employee.clone(),
            report: *report,
            force: *force,
            options: cfg.aggregate_options(),
        };
        ExportLogic::export(&pool, actor, &req)?;
    }
    Ok(())
}
