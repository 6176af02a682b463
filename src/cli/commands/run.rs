use crate::cli::parser::Commands;
use crate::config::{Config, StorageBackend};
use crate::core::normalize::FieldNormalizer;
use crate::core::pipeline::{Pipeline, RunSummary};
use crate::core::upsert::{Storage, UpsertEngine};
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::remote::RestStore;
use crate::source;
use crate::ui::messages::{error, header, success, warning};
use std::time::Duration;

/// Apply `run` flags over the loaded configuration.
fn effective_config(cmd: &Commands, cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    if let Commands::Run {
        source,
        backend,
        query,
        file,
        limit,
    } = cmd
    {
        if let Some(s) = source {
            cfg.source = *s;
        }
        if let Some(b) = backend {
            cfg.storage_backend = *b;
        }
        if let Some(q) = query {
            cfg.query = q.clone();
        }
        if let Some(f) = file {
            cfg.snapshot_file = Some(f.clone());
        }
        if let Some(l) = limit {
            cfg.max_candidates = *l;
        }
    }
    cfg
}

fn write_audit(db_path: &str, source: &str, summary: &RunSummary) -> AppResult<()> {
    let pool = DbPool::new(db_path)?;
    init_db(&pool.conn)?;
    log::record_run(&pool.conn, source, summary)
}

/// Handle the `run` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let cfg = effective_config(cmd, cfg);

    // Missing credentials are fatal before anything touches the network.
    let creds = cfg.credentials()?;
    creds.require_for(cfg.storage_backend, cfg.source)?;

    let source = source::from_config(&cfg, &creds)?;
    let storage: Box<dyn Storage> = match cfg.storage_backend {
        StorageBackend::Sqlite => Box::new(SqliteStore::open(&cfg.database)?),
        StorageBackend::Rest => Box::new(RestStore::new(
            creds.storage()?,
            Duration::from_secs(cfg.request_timeout_secs),
        )),
    };

    header(format!(
        "Ingest run ({} → {})",
        source.describe(),
        storage.backend_name()
    ));

    let mut pipeline = Pipeline::new(
        FieldNormalizer::from_config(&cfg),
        UpsertEngine::new(storage),
        cfg.max_candidates,
    );

    let summary = match pipeline.run(source.as_ref()) {
        Ok(summary) => summary,
        Err(e) => {
            error(format!("Discovery failed: {}", e));
            RunSummary::default()
        }
    };
    drop(pipeline);

    if summary.unresolved > 0 {
        warning(format!(
            "{} place(s) stored without a location (0, 0)",
            summary.unresolved
        ));
    }
    success(summary.render());

    // Audit trail (non blocking)
    if let Err(e) = write_audit(&cfg.database, &source.describe(), &summary) {
        eprintln!("⚠️ Failed to write internal log: {}", e);
    }

    Ok(())
}
