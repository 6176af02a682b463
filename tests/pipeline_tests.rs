mod common;

use common::{FailingStore, candidate_at, dubai_candidate};
use radar_ingest::config::Config;
use radar_ingest::core::normalize::FieldNormalizer;
use radar_ingest::core::pipeline::{Outcome, Pipeline};
use radar_ingest::core::upsert::{Storage, UpsertEngine};
use radar_ingest::db::queries::{count_rows, find_place_by_name, inventory_for_place};
use radar_ingest::db::store::SqliteStore;
use radar_ingest::errors::DiscoveryError;
use radar_ingest::models::{Candidate, InventoryHints, InventoryStatus, RawPosition};
use radar_ingest::source::FixedSource;

fn pipeline_with<S: Storage>(storage: S, limit: usize) -> Pipeline<S> {
    Pipeline::new(
        FieldNormalizer::from_config(&Config::default()),
        UpsertEngine::new(storage),
        limit,
    )
}

fn sqlite_pipeline() -> Pipeline<SqliteStore> {
    pipeline_with(SqliteStore::in_memory().expect("in-memory store"), 10)
}

#[test]
fn end_to_end_candidate_is_cleaned_resolved_and_linked() {
    let mut pipeline = sqlite_pipeline();
    let summary = pipeline
        .run(&FixedSource::new(vec![dubai_candidate()]))
        .expect("run");

    assert_eq!((summary.processed, summary.persisted, summary.skipped), (1, 1, 0));

    let conn = pipeline.engine().storage().conn();
    let place = find_place_by_name(conn, "두바이초콜릿")
        .unwrap()
        .expect("place stored under the cleaned name");
    assert!((place.lat - 37.3690694).abs() < 1e-9);
    assert!((place.lng - 127.1136432).abs() < 1e-9);
    assert_eq!(place.address, "경기 성남시 분당구");
    assert!(place.is_open);
    assert!(place.location_resolved);

    let inv = inventory_for_place(conn, place.id).unwrap().expect("inventory row");
    assert_eq!(inv.status, InventoryStatus::Unknown);
    assert_eq!(inv.price, 0);
    assert_eq!(inv.stock_count, None);
}

#[test]
fn inventory_references_the_place_id_of_the_same_candidate() {
    let mut pipeline = sqlite_pipeline();
    let report = pipeline.process(&dubai_candidate());

    let Outcome::Persisted(ids) = report.outcome else {
        panic!("expected persisted, got {:?}", report.outcome);
    };
    let conn = pipeline.engine().storage().conn();
    let inv = inventory_for_place(conn, ids.place_id).unwrap().expect("inventory");
    assert_eq!(inv.id, ids.inventory_id);
    assert_eq!(inv.place_id, ids.place_id);
}

#[test]
fn upsert_place_twice_returns_same_id_and_one_row() {
    let mut engine = UpsertEngine::new(SqliteStore::in_memory().unwrap());
    let a = engine
        .upsert_place("강남 초코하우스", 37.4979, 127.0276, "서울특별시 강남구 테헤란로 123")
        .unwrap();
    let b = engine
        .upsert_place("강남 초코하우스", 37.4979, 127.0276, "서울특별시 강남구 테헤란로 123")
        .unwrap();

    assert_eq!(a, b);
    assert_eq!(count_rows(engine.storage().conn(), "places").unwrap(), 1);
}

#[test]
fn upsert_place_accepts_unresolved_sentinel() {
    let mut engine = UpsertEngine::new(SqliteStore::in_memory().unwrap());
    let id = engine.upsert_place("어딘가", 0.0, 0.0, "주소 정보 없음").unwrap();

    let place = find_place_by_name(engine.storage().conn(), "어딘가").unwrap().unwrap();
    assert_eq!(place.id, id);
    assert!(!place.location_resolved);
    assert!(place.coordinates().is_unresolved());
}

#[test]
fn rerunning_the_pipeline_does_not_duplicate() {
    let mut pipeline = sqlite_pipeline();
    let source = FixedSource::new(vec![dubai_candidate(), candidate_at("홍대 쿠키팩토리", 37.5512, 126.9227)]);

    let first = pipeline.run(&source).unwrap();
    let second = pipeline.run(&source).unwrap();

    assert_eq!(first.persisted, 2);
    assert_eq!(second.persisted, 2);
    let conn = pipeline.engine().storage().conn();
    assert_eq!(count_rows(conn, "places").unwrap(), 2);
    assert_eq!(count_rows(conn, "inventory").unwrap(), 2);
    assert_eq!(first.reports[0].outcome, second.reports[0].outcome);
}

#[test]
fn one_failing_candidate_is_skipped_and_the_run_continues() {
    let mut pipeline = pipeline_with(FailingStore::new(&["홍대 쿠키팩토리"]), 10);
    let summary = pipeline.process_all(&[
        candidate_at("강남 초코하우스", 37.4979, 127.0276),
        candidate_at("홍대 쿠키팩토리", 37.5512, 126.9227),
        candidate_at("신사 디저트랩", 37.5219, 127.0228),
    ]);

    assert_eq!((summary.processed, summary.persisted, summary.skipped), (3, 2, 1));
    assert_eq!(summary.reports[1].outcome, Outcome::Skipped {
        message: "upsert_place failed for 홍대 쿠키팩토리: connection reset by peer".into(),
    });

    let conn = pipeline.engine().storage().inner.conn();
    for name in ["강남 초코하우스", "신사 디저트랩"] {
        let place = find_place_by_name(conn, name).unwrap().expect(name);
        assert!(inventory_for_place(conn, place.id).unwrap().is_some());
    }
    assert!(find_place_by_name(conn, "홍대 쿠키팩토리").unwrap().is_none());
}

#[test]
fn constraint_violation_becomes_a_skip() {
    // the name is made of badges only, so it cleans to ""
    let mut pipeline = sqlite_pipeline();
    let summary = pipeline.process_all(&[
        candidate_at("강남 초코하우스", 37.4979, 127.0276),
        candidate_at("쿠폰 예약", 37.5, 127.0),
        candidate_at("신사 디저트랩", 37.5219, 127.0228),
    ]);

    assert_eq!((summary.processed, summary.persisted, summary.skipped), (3, 2, 1));
    let skipped = summary.skipped_items();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].0, "쿠폰 예약");
    assert!(skipped[0].1.starts_with("upsert_place failed"), "{}", skipped[0].1);
    assert!(summary.render().contains("\n  - 쿠폰 예약: upsert_place failed"));
    assert_eq!(count_rows(pipeline.engine().storage().conn(), "places").unwrap(), 2);
}

#[test]
fn unresolved_coordinates_are_stored_as_sentinel_and_flagged() {
    let mut pipeline = sqlite_pipeline();
    let candidate = Candidate::new("옛날 디저트", RawPosition::Tm128 { x: 321_427, y: 529_376 })
        .with_free_text("디저트\n리뷰 12\n서울특별시 마포구 어울마당로 45");
    let summary = pipeline.process_all(&[candidate]);

    assert_eq!(summary.persisted, 1);
    assert_eq!(summary.unresolved, 1);
    let place = find_place_by_name(pipeline.engine().storage().conn(), "옛날 디저트")
        .unwrap()
        .unwrap();
    assert_eq!((place.lat, place.lng), (0.0, 0.0));
    assert!(!place.location_resolved);
    assert_eq!(place.address, "서울특별시 마포구 어울마당로 45");
}

#[test]
fn later_weaker_data_does_not_clobber_stored_values() {
    let mut pipeline = sqlite_pipeline();
    let seeded = candidate_at("연남동 초코빌리지", 37.5612, 126.9245)
        .with_address("서울특별시 마포구 동교로 242")
        .with_hints(InventoryHints {
            price: Some(15000),
            status: Some(InventoryStatus::SoldOut),
            stock_count: Some(0),
        });
    let rediscovered = Candidate::new(
        "연남동 초코빌리지",
        RawPosition::Text {
            x: "n/a".into(),
            y: "".into(),
        },
    );
    pipeline.process_all(&[seeded, rediscovered]);

    let conn = pipeline.engine().storage().conn();
    let place = find_place_by_name(conn, "연남동 초코빌리지").unwrap().unwrap();
    assert_eq!((place.lat, place.lng), (37.5612, 126.9245));
    assert!(place.location_resolved);
    assert_eq!(place.address, "서울특별시 마포구 동교로 242");

    let inv = inventory_for_place(conn, place.id).unwrap().unwrap();
    assert_eq!(inv.status, InventoryStatus::SoldOut);
    assert_eq!(inv.price, 15000);
    assert_eq!(inv.stock_count, Some(0));
    assert!(inv.last_checked_at.is_some());
}

#[test]
fn explicit_inventory_upsert_updates_in_place() {
    let mut engine = UpsertEngine::new(SqliteStore::in_memory().unwrap());
    let place_id = engine.upsert_place("역삼 스위트홈", 37.5006, 127.0365, "서울 강남구").unwrap();

    let first = engine.upsert_inventory(place_id, 0, InventoryStatus::Unknown).unwrap();
    let second = engine.upsert_inventory(place_id, 15000, InventoryStatus::Available).unwrap();

    assert_eq!(first, second);
    let inv = inventory_for_place(engine.storage().conn(), place_id).unwrap().unwrap();
    assert_eq!(inv.status, InventoryStatus::Available);
    assert_eq!(inv.price, 15000);
}

#[test]
fn inventory_for_a_missing_place_is_rejected() {
    let mut engine = UpsertEngine::new(SqliteStore::in_memory().unwrap());
    let err = engine
        .upsert_inventory(999, 0, InventoryStatus::Unknown)
        .unwrap_err();
    assert_eq!(err.operation, radar_ingest::errors::StorageOp::UpsertInventory);
    assert_eq!(count_rows(engine.storage().conn(), "inventory").unwrap(), 0);
}

#[test]
fn run_commits_at_most_limit_candidates() {
    let mut pipeline = pipeline_with(SqliteStore::in_memory().unwrap(), 2);
    let source = FixedSource::new(
        (0..5)
            .map(|i| candidate_at(&format!("가게 {i}"), 37.5, 127.0 + i as f64 / 100.0))
            .collect(),
    );
    let summary = pipeline.run(&source).unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.reports[1].name, "가게 1");
}

#[test]
fn empty_discovery_ends_the_run() {
    let mut pipeline = sqlite_pipeline();
    let err = pipeline.run(&FixedSource::new(Vec::new())).unwrap_err();
    assert!(matches!(err, DiscoveryError::Empty));
}

#[test]
fn extreme_raw_positions_are_persisted_without_location() {
    let mut pipeline = sqlite_pipeline();
    let summary = pipeline.process_all(&[
        Candidate::new(
            "판교 초코공방",
            RawPosition::Text {
                x: i64::MIN.to_string(),
                y: "373690694".into(),
            },
        ),
        Candidate::new("정자 디저트바", RawPosition::from_map_xy(i64::MIN, i64::MAX)),
        dubai_candidate(),
    ]);

    assert_eq!((summary.processed, summary.persisted, summary.skipped), (3, 3, 0));
    assert_eq!(summary.unresolved, 2);
    let conn = pipeline.engine().storage().conn();
    for name in ["판교 초코공방", "정자 디저트바"] {
        let place = find_place_by_name(conn, name).unwrap().expect(name);
        assert!(place.coordinates().is_unresolved());
        assert!(!place.location_resolved);
    }
}
