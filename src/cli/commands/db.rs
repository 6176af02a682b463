use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::count_rows;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Db { check, info } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;
    run_pending_migrations(&pool.conn)?;

    if *info {
        let file_size = fs::metadata(&cfg.database).map(|m| m.len()).unwrap_or(0);
        let unresolved: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM places WHERE location_resolved = 0",
            [],
            |row| row.get(0),
        )?;

        println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, cfg.database, RESET);
        println!("{}• Size:{} {:.2} KB", CYAN, RESET, file_size as f64 / 1024.0);
        println!(
            "{}• Places:{} {}{}{}",
            CYAN,
            RESET,
            GREEN,
            count_rows(&pool.conn, "places")?,
            RESET
        );
        println!(
            "{}• Inventory rows:{} {}{}{}",
            CYAN,
            RESET,
            GREEN,
            count_rows(&pool.conn, "inventory")?,
            RESET
        );
        println!("{}• Without location:{} {}", CYAN, RESET, unresolved);
    }

    if *check {
        println!("{}▶ Running integrity check…{}", CYAN, RESET);
        let integrity: String = pool
            .conn
            .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
        let dangling: i64 = pool.conn.query_row(
            "SELECT COUNT(*) FROM inventory i LEFT JOIN places p ON p.id = i.place_id WHERE p.id IS NULL",
            [],
            |row| row.get(0),
        )?;

        if integrity == "ok" && dangling == 0 {
            println!("{}✔ Integrity check passed.{}", GREEN, RESET);
        } else {
            println!(
                "{}✘ Integrity check failed:{} {} ({} dangling inventory rows)",
                RED, RESET, integrity, dangling
            );
        }
    }

    Ok(())
}
