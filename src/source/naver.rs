//! Local search API strategy (`/v1/search/local.json`).

use crate::config::ApiCredentials;
use crate::errors::DiscoveryError;
use crate::models::candidate::Candidate;
use crate::models::position::RawPosition;
use crate::source::CandidateSource;
use serde::Deserialize;
use std::time::Duration;
use ureq::{Agent, AgentBuilder};

pub const LOCAL_SEARCH_URL: &str = "https://openapi.naver.com/v1/search/local.json";

/// The endpoint refuses `display` above this.
const MAX_DISPLAY: usize = 5;

#[derive(Debug, Deserialize)]
struct LocalSearchResponse {
    #[serde(default)]
    items: Vec<LocalItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LocalItem {
    title: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    road_address: String,
    #[serde(default)]
    mapx: String,
    #[serde(default)]
    mapy: String,
}

impl LocalItem {
    fn into_candidate(self) -> Candidate {
        let raw_position = match (self.mapx.trim().parse(), self.mapy.trim().parse()) {
            (Ok(x), Ok(y)) => RawPosition::from_map_xy(x, y),
            _ => RawPosition::Text {
                x: self.mapx.clone(),
                y: self.mapy.clone(),
            },
        };

        let structured = [&self.road_address, &self.address]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string);

        let free_text = [&self.category, &self.description, &self.road_address, &self.address]
            .into_iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Candidate {
            raw_name: self.title,
            raw_position,
            free_text: (!free_text.is_empty()).then_some(free_text),
            structured_address: structured,
            hints: Default::default(),
        }
    }
}

fn parse_items(body: &str) -> Result<Vec<Candidate>, DiscoveryError> {
    let response: LocalSearchResponse =
        serde_json::from_str(body).map_err(|e| DiscoveryError::Malformed(e.to_string()))?;
    Ok(response
        .items
        .into_iter()
        .map(LocalItem::into_candidate)
        .collect())
}

pub struct NaverLocalSource {
    agent: Agent,
    credentials: ApiCredentials,
    query: String,
    display: usize,
}

impl NaverLocalSource {
    /// `timeout` bounds the whole search call.
    pub fn new(credentials: ApiCredentials, query: &str, limit: usize, timeout: Duration) -> Self {
        Self {
            agent: AgentBuilder::new().timeout(timeout).build(),
            credentials,
            query: query.to_string(),
            display: limit.clamp(1, MAX_DISPLAY),
        }
    }
}

impl CandidateSource for NaverLocalSource {
    fn fetch(&self) -> Result<Vec<Candidate>, DiscoveryError> {
        let response = self
            .agent
            .get(LOCAL_SEARCH_URL)
            .set("X-Naver-Client-Id", &self.credentials.client_id)
            .set("X-Naver-Client-Secret", &self.credentials.client_secret)
            .query("query", &self.query)
            .query("display", &self.display.to_string())
            .query("sort", "random")
            .call();

        match response {
            Ok(resp) => {
                let body = resp
                    .into_string()
                    .map_err(|e| DiscoveryError::Transport(e.to_string()))?;
                parse_items(&body)
            }
            Err(ureq::Error::Status(status, resp)) => Err(DiscoveryError::Status {
                status,
                body: resp.into_string().unwrap_or_default(),
            }),
            Err(ureq::Error::Transport(t)) => Err(DiscoveryError::Transport(t.to_string())),
        }
    }

    fn describe(&self) -> String {
        format!("local search API (query: {})", self.query)
    }
}
