//! Best-effort address line detection.
//!
//! A heuristic, not a parser: the rules are an ordered list of matchers and the
//! first line accepted by any of them wins.

use crate::config::Config;
use crate::models::place::ADDRESS_UNKNOWN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressMatcher {
    /// Line contains the keyword (province / city / district name).
    Keyword(String),
    /// Line contains every token (e.g. a road marker and a lane marker).
    AllOf(Vec<String>),
}

impl AddressMatcher {
    pub fn matches(&self, line: &str) -> bool {
        match self {
            AddressMatcher::Keyword(k) => !k.is_empty() && line.contains(k.as_str()),
            AddressMatcher::AllOf(tokens) => {
                !tokens.is_empty() && tokens.iter().all(|t| line.contains(t.as_str()))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRules {
    matchers: Vec<AddressMatcher>,
}

impl AddressRules {
    pub fn new(matchers: Vec<AddressMatcher>) -> Self {
        Self { matchers }
    }

    /// Keyword matchers for each region, then one dual-token street matcher.
    pub fn from_config(cfg: &Config) -> Self {
        let mut matchers: Vec<AddressMatcher> = cfg
            .region_keywords
            .iter()
            .map(|k| AddressMatcher::Keyword(k.clone()))
            .collect();
        if !cfg.road_markers.is_empty() {
            matchers.push(AddressMatcher::AllOf(cfg.road_markers.clone()));
        }
        Self::new(matchers)
    }

    pub fn matchers(&self) -> &[AddressMatcher] {
        &self.matchers
    }

    /// First line of `text` accepted by any matcher, trimmed.
    pub fn find_line(&self, text: &str) -> Option<String> {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .find(|line| self.matchers.iter().any(|m| m.matches(line)))
            .map(str::to_string)
    }

    /// Like [`find_line`](Self::find_line) but falls back to the sentinel.
    pub fn extract(&self, text: Option<&str>) -> String {
        text.and_then(|t| self.find_line(t))
            .unwrap_or_else(|| ADDRESS_UNKNOWN.to_string())
    }
}

impl Default for AddressRules {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_first_region_line() {
        let rules = AddressRules::default();
        let text = "두바이초콜릿 전문점\n디저트\n경기 성남시 분당구 정자일로 95\n서울 강남구";
        assert_eq!(
            rules.find_line(text).as_deref(),
            Some("경기 성남시 분당구 정자일로 95")
        );
    }

    #[test]
    fn street_pattern_needs_both_markers() {
        let rules = AddressRules::default();
        assert_eq!(
            rules.find_line("리뷰 120\n도산대로 13길 10\n").as_deref(),
            Some("도산대로 13길 10")
        );
        assert_eq!(rules.find_line("도산대로 앞"), None);
    }

    #[test]
    fn no_match_yields_sentinel() {
        let rules = AddressRules::default();
        assert_eq!(rules.extract(Some("영업 중\n리뷰 300\n")), ADDRESS_UNKNOWN);
        assert_eq!(rules.extract(Some("")), ADDRESS_UNKNOWN);
        assert_eq!(rules.extract(None), ADDRESS_UNKNOWN);
    }

    #[test]
    fn custom_matchers_are_swappable() {
        let rules = AddressRules::new(vec![AddressMatcher::Keyword("부산".into())]);
        assert_eq!(
            rules.find_line("서울 강남구\n부산 해운대구").as_deref(),
            Some("부산 해운대구")
        );
        assert!(AddressRules::new(Vec::new()).find_line("서울").is_none());
    }
}
