//! Candidate sources. One capability, several strategies, picked from config.

pub mod naver;
pub mod snapshot;

use crate::config::{ApiCredentials, Config, Credentials};
use crate::errors::{AppResult, DiscoveryError};
use crate::models::candidate::Candidate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use naver::NaverLocalSource;
pub use snapshot::SnapshotSource;

pub trait CandidateSource {
    /// Yield raw candidates in ranking order.
    fn fetch(&self) -> Result<Vec<Candidate>, DiscoveryError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Structured local search API
    #[default]
    Api,
    /// JSON capture of a page-interaction session or a seed list
    Snapshot,
}

/// Candidates already in memory.
pub struct FixedSource {
    candidates: Vec<Candidate>,
}

impl FixedSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for FixedSource {
    fn fetch(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        Ok(self.candidates.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory candidates", self.candidates.len())
    }
}

/// Build the source selected by `cfg.source`.
pub fn from_config(cfg: &Config, creds: &Credentials) -> AppResult<Box<dyn CandidateSource>> {
    match cfg.source {
        SourceKind::Api => {
            let api: ApiCredentials = creds.search_api()?;
            Ok(Box::new(NaverLocalSource::new(
                api,
                &cfg.query,
                cfg.max_candidates,
                Duration::from_secs(cfg.request_timeout_secs),
            )))
        }
        SourceKind::Snapshot => {
            let path = cfg.snapshot_file.as_deref().ok_or_else(|| {
                crate::errors::AppError::Configuration(
                    "snapshot source selected but no snapshot file given (--file or snapshot_file)"
                        .into(),
                )
            })?;
            Ok(Box::new(SnapshotSource::new(path)))
        }
    }
}
