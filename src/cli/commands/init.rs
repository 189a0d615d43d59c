use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::employee::EmployeeLogic;
use crate::db::initialize::init_db;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped with `--test`)
///  - the SQLite database and all pending migrations
///  - optionally the first administrator profile
pub fn handle(cli: &Cli) -> AppResult<()> {
    if let Commands::Init { admin, email, name } = &cli.command {
        let cfg = Config::init_all(cli.db.clone(), cli.test)?;

        println!("⚙️  Initializing pontolog…");
        if !cli.test {
            println!("📄 Config file : {}", Config::config_file().display());
        }
        println!("🗄️  Database   : {}", &cfg.database);

        let pool = DbPool::new(&cfg.database)?;
        init_db(&pool.conn)?;
        success(format!("Database initialized at {}", &cfg.database));

        if let Err(e) = audit(
            &pool.conn,
            "init",
            "database",
            &format!("Database initialized at {}", &cfg.database),
        ) {
            warning(format!("Failed to write internal log: {e}"));
        }

        if let Some(id) = admin {
            let email = email
                .as_deref()
                .ok_or_else(|| AppError::MissingData("--email is required with --admin".into()))?;
            let first_name = name.as_deref().unwrap_or(id);

            let profile = EmployeeLogic::bootstrap_admin(&pool, id, email, first_name)?;
            success(format!(
                "Administrator '{}' ({}) created",
                profile.id,
                profile.display_name()
            ));
        }

        println!("🎉 pontolog initialization completed!");
    }
    Ok(())
}
