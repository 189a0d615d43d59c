use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const OP_WIDTH: usize = 40;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock" => Colour::Green,
        "del" | "employee_del" => Colour::Red,
        "decide" => Colour::Yellow,
        "schedule" | "employee_add" | "employee_role" | "employee_edit" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn local_date(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub struct LogLogic;

impl LogLogic {
    pub fn entries(pool: &DbPool) -> AppResult<Vec<LogEntry>> {
        load_log(&pool.conn)
    }

    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = Self::entries(pool)?;
        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        println!("📜 Internal log:\n");

        for e in &entries {
            let date = local_date(&e.date);
            let rest = if e.target.is_empty() {
                String::new()
            } else {
                format!(" ({})", e.target)
            };

            // width is measured before painting, escapes take no cells
            let visible = truncate(&format!("{}{rest}", e.operation), OP_WIDTH);
            let (op, tail) = visible
                .split_at_checked(e.operation.len().min(visible.len()))
                .unwrap_or((visible.as_str(), ""));
            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible.width()));

            println!(
                "{:>id_w$}: {} | {}{}{} => {}",
                e.id,
                date,
                color_for_operation(&e.operation).paint(op),
                tail,
                padding,
                e.message,
                id_w = id_w
            );
        }

        Ok(())
    }
}
