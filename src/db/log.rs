use crate::core::pipeline::{Outcome, RunSummary};
use crate::errors::AppResult;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal log line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// One `ingest`/`skip` line per candidate plus a `run_summary` line.
pub fn record_run(conn: &Connection, source: &str, summary: &RunSummary) -> AppResult<()> {
    for report in &summary.reports {
        match &report.outcome {
            Outcome::Persisted(ids) => ttlog(
                conn,
                "ingest",
                &report.name,
                &format!(
                    "place #{} / inventory #{} ({})",
                    ids.place_id, ids.inventory_id, report.address
                ),
            )?,
            Outcome::Skipped { message } => ttlog(conn, "skip", &report.raw_name, message)?,
        }
    }

    ttlog(conn, "run_summary", source, &summary.render().replace('\n', " "))
}
