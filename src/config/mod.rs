use crate::errors::{AppError, AppResult};
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod credentials;

pub use credentials::{ApiCredentials, Credentials, StorageCredentials};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local SQLite database
    #[default]
    Sqlite,
    /// PostgREST-compatible remote endpoint
    Rest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default)]
    pub storage_backend: StorageBackend,
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default = "default_query")]
    pub query: String,
    #[serde(default)]
    pub snapshot_file: Option<String>,
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_badges")]
    pub badges: Vec<String>,
    #[serde(default = "default_region_keywords")]
    pub region_keywords: Vec<String>,
    #[serde(default = "default_road_markers")]
    pub road_markers: Vec<String>,
    #[serde(default = "default_env_file")]
    pub env_file: String,
}

fn default_query() -> String {
    "성남시 분당구 두바이초콜릿".to_string()
}
fn default_max_candidates() -> usize {
    10
}
fn default_timeout() -> u64 {
    10
}
fn default_badges() -> Vec<String> {
    ["쿠폰", "예약", "배달", "포장", "N페이", "네이버페이"]
        .map(String::from)
        .to_vec()
}
fn default_region_keywords() -> Vec<String> {
    ["경기", "서울", "성남"].map(String::from).to_vec()
}
fn default_road_markers() -> Vec<String> {
    ["로", "길"].map(String::from).to_vec()
}
fn default_env_file() -> String {
    ".env.local".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(&Self::database_file().to_string_lossy())
    }
}

impl Config {
    pub fn with_database(path: &str) -> Self {
        Self {
            database: path.to_string(),
            storage_backend: StorageBackend::default(),
            source: SourceKind::default(),
            query: default_query(),
            snapshot_file: None,
            max_candidates: default_max_candidates(),
            request_timeout_secs: default_timeout(),
            badges: default_badges(),
            region_keywords: default_region_keywords(),
            road_markers: default_road_markers(),
            env_file: default_env_file(),
        }
    }

    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".radar-ingest")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("radar-ingest.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("radar-ingest.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            fs::read_to_string(path).map_err(|e| AppError::ConfigLoad(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| AppError::ConfigLoad(e.to_string()))
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> io::Result<Self> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_db {
            Some(name) if Path::new(name).is_absolute() => PathBuf::from(name),
            Some(name) => dir.join(name),
            None => Self::database_file(),
        };

        let config = Self::with_database(&db_path.to_string_lossy());

        if !is_test {
            let yaml = serde_yaml::to_string(&config).map_err(io::Error::other)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(config)
    }

    /// Credentials from `env_file` overlaid with the process environment.
    pub fn credentials(&self) -> AppResult<Credentials> {
        Credentials::load(Path::new(&self.env_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_gets_defaults() {
        let cfg: Config = serde_yaml::from_str(
            "database: /tmp/x.sqlite\nsource: snapshot\nmax_candidates: 3\n",
        )
        .unwrap();
        assert_eq!(cfg.source, SourceKind::Snapshot);
        assert_eq!(cfg.storage_backend, StorageBackend::Sqlite);
        assert_eq!(cfg.max_candidates, 3);
        assert_eq!(cfg.badges.len(), 6);
        assert_eq!(cfg.road_markers, vec!["로", "길"]);
        assert_eq!(cfg.env_file, ".env.local");
    }

    #[test]
    fn missing_file_means_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/radar-ingest.conf")).unwrap();
        assert_eq!(cfg.max_candidates, 10);
        assert_eq!(cfg.request_timeout_secs, 10);
    }
}
