use crate::core::calculator::aggregate::{AggregateOptions, aggregate_by_user};
use crate::core::employee::EmployeeLogic;
use crate::core::source::{EventQuery, EventSource};
use crate::db::pool::DbPool;
use crate::db::profiles::load_profiles;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{EventExport, ReportRowExport};
use crate::ui::messages::warning;
use crate::utils::date::parse_period;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub format: ExportFormat,
    /// Absolute output path.
    pub file: String,
    /// `None`/`all`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or a `A:B` range.
    pub range: Option<String>,
    /// Restrict to one employee; administrators may leave it empty.
    pub user: Option<String>,
    /// Export per-day totals instead of raw punches.
    pub report: bool,
    pub force: bool,
    pub options: AggregateOptions,
}

pub struct ExportLogic;

impl ExportLogic {
    /// Returns the number of rows written (0 when nothing matched).
    pub fn export(pool: &DbPool, actor: &str, req: &ExportRequest) -> AppResult<usize> {
        let user = EmployeeLogic::visible_scope(pool, actor, req.user.as_deref())?;

        let path = Path::new(&req.file);
        ensure_writable(path, req.force)?;

        let bounds = match &req.range {
            None => None,
            Some(r) => parse_period(r)?,
        };

        let query = EventQuery {
            user_id: user,
            range: bounds,
            status: None,
        };
        let events = pool.fetch_events(&query)?;

        if events.is_empty() {
            warning("No events found for selected range.");
            return Ok(0);
        }

        let names: HashMap<String, String> = load_profiles(&pool.conn)?
            .into_iter()
            .map(|p| (p.id.clone(), p.display_name()))
            .collect();
        let name_of = |id: &str| names.get(id).cloned().unwrap_or_else(|| id.to_string());

        if req.report {
            let rows: Vec<ReportRowExport> = aggregate_by_user(&events, &req.options)
                .iter()
                .flat_map(|(user_id, report)| {
                    let employee = name_of(user_id.as_str());
                    report
                        .daily_summaries
                        .iter()
                        .map(move |s| ReportRowExport::from_summary(&employee, s))
                        .collect::<Vec<_>>()
                })
                .collect();
            write_rows(req.format, &rows, path)?;
            Ok(rows.len())
        } else {
            let rows: Vec<EventExport> = events
                .iter()
                .map(|ev| {
                    EventExport::from_event(
                        ev,
                        &name_of(ev.user_id.as_str()),
                        ev.approver_id.as_deref().map(&name_of),
                    )
                })
                .collect();
            write_rows(req.format, &rows, path)?;
            Ok(rows.len())
        }
    }
}

fn write_rows<T: Serialize>(format: ExportFormat, rows: &[T], path: &Path) -> AppResult<()> {
    tracing::debug!(format = format.as_str(), rows = rows.len(), "writing export");
    match format {
        ExportFormat::Csv => export_csv(rows, path),
        ExportFormat::Json => export_json(rows, path),
    }
}
