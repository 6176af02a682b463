//! Credentials for storage and the search API.
//!
//! Read once at startup into an explicit value that is passed to the
//! components that need it. Missing or half-filled pairs are fatal.

use crate::config::StorageBackend;
use crate::errors::{AppError, AppResult};
use crate::source::SourceKind;
use std::collections::HashMap;
use std::env;
use std::path::Path;

const STORAGE_URL_VARS: [&str; 2] = ["SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_URL"];
const STORAGE_KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "NEXT_PUBLIC_SUPABASE_ANON_KEY"];
const CLIENT_ID_VAR: &str = "NAVER_CLIENT_ID";
const CLIENT_SECRET_VAR: &str = "NAVER_CLIENT_SECRET";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub storage_endpoint: Option<String>,
    pub storage_key: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    pub endpoint: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    /// Build from `KEY=value` pairs; later pairs win. Blank values count as absent.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.trim().is_empty())
            .collect();

        Self {
            storage_endpoint: first_of(&vars, &STORAGE_URL_VARS),
            storage_key: first_of(&vars, &STORAGE_KEY_VARS),
            client_id: first_of(&vars, &[CLIENT_ID_VAR]),
            client_secret: first_of(&vars, &[CLIENT_SECRET_VAR]),
        }
    }

    /// `env_file` (if present) overlaid with the process environment.
    /// The process environment itself is never modified.
    pub fn load(env_file: &Path) -> AppResult<Self> {
        let mut pairs: Vec<(String, String)> = Vec::new();

        if env_file.exists() {
            let iter = dotenv::from_path_iter(env_file).map_err(|e| {
                AppError::Configuration(format!("cannot read {}: {}", env_file.display(), e))
            })?;
            for item in iter {
                let pair = item.map_err(|e| {
                    AppError::Configuration(format!("invalid line in {}: {}", env_file.display(), e))
                })?;
                pairs.push(pair);
            }
        }

        pairs.extend(env::vars());
        Ok(Self::from_pairs(pairs))
    }

    pub fn storage(&self) -> AppResult<StorageCredentials> {
        match (&self.storage_endpoint, &self.storage_key) {
            (Some(endpoint), Some(key)) => Ok(StorageCredentials {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                key: key.clone(),
            }),
            (endpoint, key) => Err(missing(&[
                (endpoint.is_none(), STORAGE_URL_VARS[0]),
                (key.is_none(), STORAGE_KEY_VARS[0]),
            ])),
        }
    }

    pub fn search_api(&self) -> AppResult<ApiCredentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) => Ok(ApiCredentials {
                client_id: id.clone(),
                client_secret: secret.clone(),
            }),
            (id, secret) => Err(missing(&[
                (id.is_none(), CLIENT_ID_VAR),
                (secret.is_none(), CLIENT_SECRET_VAR),
            ])),
        }
    }

    /// Check everything the selected backend and source need.
    pub fn require_for(&self, backend: StorageBackend, source: SourceKind) -> AppResult<()> {
        if backend == StorageBackend::Rest {
            self.storage()?;
        }
        if source == SourceKind::Api {
            self.search_api()?;
        }
        Ok(())
    }
}

fn first_of(vars: &HashMap<String, String>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|n| vars.get(*n).cloned())
}

fn missing(checks: &[(bool, &str)]) -> AppError {
    let names: Vec<&str> = checks
        .iter()
        .filter(|(is_missing, _)| *is_missing)
        .map(|(_, name)| *name)
        .collect();
    AppError::Configuration(format!("missing credentials: {}", names.join(", ")))
}
