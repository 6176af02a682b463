use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// `places` keyed by name, `inventory` keyed by place (at most one row each).
fn create_places_and_inventory(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS places (
            id                INTEGER PRIMARY KEY AUTOINCREMENT,
            name              TEXT NOT NULL UNIQUE CHECK(length(trim(name)) > 0),
            lat               REAL NOT NULL DEFAULT 0,
            lng               REAL NOT NULL DEFAULT 0,
            address           TEXT NOT NULL DEFAULT '주소 정보 없음',
            is_open           INTEGER NOT NULL DEFAULT 1,
            location_resolved INTEGER NOT NULL DEFAULT 0,
            created_at        TEXT NOT NULL,
            updated_at        TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS inventory (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            place_id        INTEGER NOT NULL UNIQUE REFERENCES places(id),
            price           INTEGER NOT NULL DEFAULT 0,
            status          TEXT NOT NULL DEFAULT 'UNKNOWN'
                            CHECK(status IN ('UNKNOWN','AVAILABLE','SOLD_OUT')),
            stock_count     INTEGER,
            last_checked_at TEXT,
            owner_id        TEXT,
            updated_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_places_location ON places(lat, lng);
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    let version = "20261016_0001_places_inventory";
    if !migration_applied(conn, version)? {
        create_places_and_inventory(conn)?;
        mark_applied(conn, version, "Created places and inventory tables")?;
        success(format!("Migration applied: {}", version));
    }

    Ok(())
}
