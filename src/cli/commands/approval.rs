use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::approval::{ApprovalLogic, Decision};
use crate::core::bus::DataChangeBus;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

/// `pending`, `approve` and `reject`.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let actor = cfg.acting_user()?;
    let pool = open_db(cfg)?;

    let (id, decision) = match cmd {
        Commands::Pending => return print_pending(&pool, actor),
        Commands::Approve { id } => (*id, Decision::Approve),
        Commands::Reject { id } => (*id, Decision::Reject),
        _ => return Ok(()),
    };

    let bus = DataChangeBus::new();
    let event = ApprovalLogic::decide(&pool, &bus, actor, id, decision)?;
    success(format!(
        "Event {} ({} {} of {}) is now {}",
        event.id,
        event.kind.label(),
        event.timestamp_str(),
        event.user_id,
        event.status
    ));
    Ok(())
}

fn print_pending(pool: &crate::db::pool::DbPool, actor: &str) -> AppResult<()> {
    let pending = ApprovalLogic::pending(pool, actor)?;
    if pending.is_empty() {
        info("No punches waiting for approval.");
        return Ok(());
    }

    let mut table = Table::new(vec!["ID", "Employee", "Date", "Time", "Kind", "Location"]);
    for p in &pending {
        table.add_row(vec![
            p.event.id.to_string(),
            p.employee_name.clone(),
            p.event.date_str(),
            p.event.time_str(),
            p.event.kind.label().to_string(),
            p.event
                .location()
                .map(|l| l.maps_url())
                .unwrap_or_else(|| "-".into()),
        ]);
    }
    print!("{}", table.render());
    println!("{} pending", pending.len());
    Ok(())
}
