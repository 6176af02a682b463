#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use radar_ingest::core::upsert::Storage;
use radar_ingest::db::store::SqliteStore;
use radar_ingest::errors::{PersistenceError, StorageOp};
use radar_ingest::models::{Candidate, NewInventory, NewPlace, RawPosition};
use std::env;
use std::fs;
use std::path::PathBuf;

const CREDENTIAL_VARS: [&str; 6] = [
    "SUPABASE_URL",
    "NEXT_PUBLIC_SUPABASE_URL",
    "SUPABASE_ANON_KEY",
    "NEXT_PUBLIC_SUPABASE_ANON_KEY",
    "NAVER_CLIENT_ID",
    "NAVER_CLIENT_SECRET",
];

/// Fresh scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("radar_ingest_{}", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create scratch dir");
    path
}

/// Binary with HOME and cwd pointed at `dir` and no credentials inherited.
pub fn radar(dir: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("radar-ingest");
    cmd.env("HOME", dir).current_dir(dir);
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn db_path(dir: &PathBuf) -> String {
    dir.join("radar.sqlite").to_string_lossy().to_string()
}

pub fn write_file(dir: &PathBuf, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).expect("write file");
    path.to_string_lossy().to_string()
}

pub const SNAPSHOT: &str = r#"[
  {"raw_name": "두바이초콜릿 쿠폰",
   "raw_position": {"kind": "scaled", "x": 1271136432, "y": 373690694},
   "structured_address": "경기 성남시 분당구"},
  {"raw_name": "<b>옛날</b> 디저트 예약",
   "raw_position": {"kind": "tm128", "x": 321427, "y": 529376},
   "free_text": "디저트\n리뷰 12\n서울특별시 마포구 어울마당로 45"},
  {"raw_name": "연남동 초코빌리지",
   "raw_position": {"kind": "degrees", "lat": 37.5612, "lng": 126.9245},
   "structured_address": "서울특별시 마포구 동교로 242",
   "hints": {"price": 15000, "status": "SOLD_OUT", "stock_count": 0}}
]"#;

pub fn dubai_candidate() -> Candidate {
    Candidate::new(
        "두바이초콜릿 쿠폰",
        RawPosition::Scaled {
            x: 1_271_136_432,
            y: 373_690_694,
        },
    )
    .with_address("경기 성남시 분당구")
}

pub fn candidate_at(name: &str, lat: f64, lng: f64) -> Candidate {
    Candidate::new(name, RawPosition::Degrees { lat, lng })
}

/// SQLite store that refuses to write places with the given names.
pub struct FailingStore {
    pub inner: SqliteStore,
    pub reject: Vec<String>,
}

impl FailingStore {
    pub fn new(reject: &[&str]) -> Self {
        Self {
            inner: SqliteStore::in_memory().expect("in-memory store"),
            reject: reject.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Storage for FailingStore {
    fn upsert_place(&mut self, place: &NewPlace) -> Result<i64, PersistenceError> {
        if self.reject.contains(&place.name) {
            return Err(PersistenceError::new(
                StorageOp::UpsertPlace,
                place.name.clone(),
                "connection reset by peer",
            ));
        }
        self.inner.upsert_place(place)
    }

    fn upsert_inventory(&mut self, inventory: &NewInventory) -> Result<i64, PersistenceError> {
        self.inner.upsert_inventory(inventory)
    }

    fn backend_name(&self) -> &'static str {
        "failing"
    }
}
