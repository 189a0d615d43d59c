pub mod approval;
pub mod clock;
pub mod config;
pub mod db;
pub mod del;
pub mod employee;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod report;
pub mod schedule;
pub mod status;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database, applying pending migrations.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
