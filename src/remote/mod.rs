//! PostgREST-style storage backend (`stores` / `products` tables).
//!
//! Each upsert is one `POST … ?on_conflict=<key>` with
//! `resolution=merge-duplicates`, so the merge happens inside the database.

use crate::config::StorageCredentials;
use crate::core::upsert::Storage;
use crate::errors::{PersistenceError, StorageOp};
use crate::models::inventory::NewInventory;
use crate::models::place::{ADDRESS_UNKNOWN, NewPlace};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

const PLACES_TABLE: &str = "stores";
const INVENTORY_TABLE: &str = "products";

#[derive(Debug, Deserialize)]
struct IdRow {
    id: i64,
}

/// Request body for the `stores` table. Sentinel coordinates and the
/// sentinel address are left out so a merge keeps the stored values.
pub fn place_body(place: &NewPlace) -> Value {
    let mut row = serde_json::Map::new();
    row.insert("name".into(), json!(place.name));
    if place.location_resolved {
        row.insert("lat".into(), json!(place.lat));
        row.insert("lng".into(), json!(place.lng));
    }
    if place.address != ADDRESS_UNKNOWN {
        row.insert("address".into(), json!(place.address));
    }
    row.insert("is_open".into(), json!(place.is_open));
    Value::Array(vec![Value::Object(row)])
}

/// Request body for the `products` table. Absent fields are left out so the
/// merge keeps stored values and the insert takes column defaults.
pub fn inventory_body(inv: &NewInventory) -> Value {
    let mut row = serde_json::Map::new();
    row.insert("store_id".into(), json!(inv.place_id));
    if let Some(price) = inv.price {
        row.insert("price".into(), json!(price));
    }
    if let Some(status) = inv.status {
        row.insert("status".into(), json!(status.to_db_str()));
    }
    if let Some(stock) = inv.stock_count {
        row.insert("stock_count".into(), json!(stock));
    }
    if let Some(ts) = &inv.last_checked_at {
        row.insert("last_check_time".into(), json!(ts));
    }
    if let Some(owner) = &inv.owner_id {
        row.insert("owner_id".into(), json!(owner));
    }
    Value::Array(vec![Value::Object(row)])
}

/// Id of the first row of a `return=representation` response.
fn first_id(body: &str) -> Result<i64, String> {
    let rows: Vec<IdRow> = serde_json::from_str(body).map_err(|e| e.to_string())?;
    rows.first()
        .map(|r| r.id)
        .ok_or_else(|| "empty representation returned".to_string())
}

pub struct RestStore {
    agent: Agent,
    credentials: StorageCredentials,
}

impl RestStore {
    pub fn new(credentials: StorageCredentials, timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
            credentials,
        }
    }

    pub fn table_url(&self, table: &str, conflict_key: &str) -> String {
        format!(
            "{}/rest/v1/{}?on_conflict={}",
            self.credentials.endpoint, table, conflict_key
        )
    }

    fn merge(&self, op: StorageOp, url: &str, body: Value) -> Result<i64, PersistenceError> {
        let result = self
            .agent
            .post(url)
            .set("apikey", &self.credentials.key)
            .set("Authorization", &format!("Bearer {}", self.credentials.key))
            .set(
                "Prefer",
                "resolution=merge-duplicates,missing=default,return=representation",
            )
            .send_json(body.clone());

        let payload = body.to_string();
        match result {
            Ok(resp) => {
                let text = resp
                    .into_string()
                    .map_err(|e| PersistenceError::new(op, payload.clone(), e))?;
                first_id(&text).map_err(|e| PersistenceError::new(op, payload, e))
            }
            Err(ureq::Error::Status(code, resp)) => {
                let detail = resp.into_string().unwrap_or_default();
                Err(PersistenceError::new(
                    op,
                    payload,
                    format!("HTTP {code}: {detail}"),
                ))
            }
            Err(ureq::Error::Transport(t)) => Err(PersistenceError::new(op, payload, t)),
        }
    }
}

impl Storage for RestStore {
    fn upsert_place(&mut self, place: &NewPlace) -> Result<i64, PersistenceError> {
        let url = self.table_url(PLACES_TABLE, "name");
        self.merge(StorageOp::UpsertPlace, &url, place_body(place))
    }

    fn upsert_inventory(&mut self, inventory: &NewInventory) -> Result<i64, PersistenceError> {
        let url = self.table_url(INVENTORY_TABLE, "store_id");
        self.merge(StorageOp::UpsertInventory, &url, inventory_body(inventory))
    }

    fn backend_name(&self) -> &'static str {
        "rest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::inventory::InventoryStatus;
    use crate::models::place::Coordinates;

    #[test]
    fn place_body_matches_store_columns() {
        let place = NewPlace::new(
            "두바이초콜릿",
            Coordinates::new(37.3690694, 127.1136432),
            "경기 성남시 분당구",
        );
        let body = place_body(&place);
        assert_eq!(body[0]["name"], "두바이초콜릿");
        assert_eq!(body[0]["is_open"], true);
        assert_eq!(body[0]["lng"], 127.1136432);
        assert!(body[0].get("location_resolved").is_none());
    }

    #[test]
    fn place_body_leaves_out_sentinels() {
        let weak = place_body(&NewPlace::new(
            "두바이초콜릿",
            Coordinates::UNRESOLVED,
            ADDRESS_UNKNOWN,
        ));
        assert_eq!(weak, json!([{ "name": "두바이초콜릿", "is_open": true }]));

        let located = place_body(&NewPlace::new(
            "두바이초콜릿",
            Coordinates::new(37.3690694, 127.1136432),
            ADDRESS_UNKNOWN,
        ));
        assert_eq!(located[0]["lat"], 37.3690694);
        assert!(located[0].get("address").is_none());
    }

    #[test]
    fn inventory_body_omits_unknown_fields() {
        let bare = inventory_body(&NewInventory::for_place(7));
        assert_eq!(bare, json!([{ "store_id": 7 }]));

        let rich = inventory_body(&NewInventory {
            price: Some(15000),
            status: Some(InventoryStatus::SoldOut),
            stock_count: Some(0),
            ..NewInventory::for_place(7)
        });
        assert_eq!(rich[0]["status"], "SOLD_OUT");
        assert_eq!(rich[0]["price"], 15000);
        assert_eq!(rich[0]["stock_count"], 0);
    }

    #[test]
    fn representation_yields_first_id() {
        assert_eq!(first_id(r#"[{"id": 42, "name": "x"}]"#), Ok(42));
        assert!(first_id("[]").is_err());
        assert!(first_id("{\"message\":\"nope\"}").is_err());
    }

    #[test]
    fn urls_carry_conflict_key() {
        let store = RestStore::new(
            StorageCredentials {
                endpoint: "https://abc.supabase.co".into(),
                key: "k".into(),
            },
            Duration::from_secs(1),
        );
        assert_eq!(
            store.table_url("stores", "name"),
            "https://abc.supabase.co/rest/v1/stores?on_conflict=name"
        );
    }
}
