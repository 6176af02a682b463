use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;

/// Colour for each operation written by `ttlog`
fn color_for_operation(op: &str) -> Colour {
    match op {
        "ingest" => Colour::Green,
        "skip" => Colour::Red,
        "run_summary" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    let mut stmt = pool
        .conn
        .prepare_cached("SELECT id, date, operation, target, message FROM log ORDER BY id ASC")?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, String>(4)?,
        ))
    })?;

    println!("📜 Internal log:\n");
    for r in rows {
        let (id, date, operation, target, message) = r?;
        let date = chrono::DateTime::parse_from_rfc3339(&date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or(date);
        let op = color_for_operation(&operation).paint(operation.as_str());
        if target.is_empty() {
            println!("{:>4} {} {} {}", id, date, op, message);
        } else {
            println!("{:>4} {} {} ({}) {}", id, date, op, target, message);
        }
    }

    Ok(())
}
