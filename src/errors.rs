//! Unified application error type.
//! All modules (config, source, db, remote, core, cli) return AppError so that
//! the driver and the CLI handle failures in one place.

use std::fmt;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Configuration errors (fatal)
    // ---------------------------
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to load configuration: {0}")]
    ConfigLoad(String),

    // ---------------------------
    // Pipeline errors
    // ---------------------------
    #[error("Discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("Invalid inventory status: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Generic
    // ---------------------------
    #[error("{0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// The Candidate Source could not produce anything to ingest.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("search endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("search request failed: {0}")]
    Transport(String),

    #[error("unexpected response shape: {0}")]
    Malformed(String),

    #[error("cannot read snapshot {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("no candidates found")]
    Empty,
}

/// Which storage write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageOp {
    UpsertPlace,
    UpsertInventory,
}

impl fmt::Display for StorageOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageOp::UpsertPlace => f.write_str("upsert_place"),
            StorageOp::UpsertInventory => f.write_str("upsert_inventory"),
        }
    }
}

/// A storage write failed. Never retried by the upsert engine.
#[derive(Error, Debug)]
#[error("{operation} failed for {payload}: {message}")]
pub struct PersistenceError {
    pub operation: StorageOp,
    pub payload: String,
    pub message: String,
}

impl PersistenceError {
    pub fn new(operation: StorageOp, payload: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            operation,
            payload: payload.into(),
            message: message.to_string(),
        }
    }
}
