use crate::errors::DiscoveryError;
use crate::models::candidate::Candidate;
use crate::source::CandidateSource;
use std::fs;
use std::path::PathBuf;

/// Reads a JSON array of candidates from disk.
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn snapshot_error(&self, message: impl ToString) -> DiscoveryError {
        DiscoveryError::Snapshot {
            path: self.path.display().to_string(),
            message: message.to_string(),
        }
    }
}

impl CandidateSource for SnapshotSource {
    fn fetch(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        let content = fs::read_to_string(&self.path).map_err(|e| self.snapshot_error(e))?;
        serde_json::from_str(&content).map_err(|e| self.snapshot_error(e))
    }

    fn describe(&self) -> String {
        format!("snapshot {}", self.path.display())
    }
}
