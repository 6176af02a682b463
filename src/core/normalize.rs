//! Field normalizer: display-name cleaning and address selection.

use crate::config::Config;
use crate::core::address::AddressRules;
use crate::models::candidate::Candidate;
use regex::Regex;
use std::sync::LazyLock;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</?[A-Za-z][A-Za-z0-9]*[^>]*>").expect("hardcoded"));

static SPACES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded"));

const ENTITIES: [(&str, &str); 6] = [
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

/// Strips markup wrappers and promotional badge tokens from display names.
#[derive(Debug, Clone)]
pub struct NameCleaner {
    badges: Vec<String>,
}

impl NameCleaner {
    pub fn new(badges: &[String]) -> Self {
        let mut badges: Vec<String> = badges
            .iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        // longest first, so "네이버페이" goes before any shorter overlapping badge
        badges.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        Self { badges }
    }

    pub fn clean(&self, raw: &str) -> String {
        let mut name = MARKUP.replace_all(raw, "").into_owned();
        for (entity, ch) in ENTITIES {
            name = name.replace(entity, ch);
        }
        for badge in &self.badges {
            name = name.replace(badge.as_str(), "");
        }
        SPACES.replace_all(name.trim(), " ").into_owned()
    }
}

/// Output of the normalizer for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub name: String,
    pub address: String,
}

pub struct FieldNormalizer {
    names: NameCleaner,
    addresses: AddressRules,
}

impl FieldNormalizer {
    pub fn new(names: NameCleaner, addresses: AddressRules) -> Self {
        Self { names, addresses }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(NameCleaner::new(&cfg.badges), AddressRules::from_config(cfg))
    }

    pub fn name(&self, raw: &str) -> String {
        self.names.clean(raw)
    }

    /// Structured address when supplied, else the heuristic over the free text.
    pub fn address(&self, candidate: &Candidate) -> String {
        match candidate.structured_address.as_deref().map(str::trim) {
            Some(a) if !a.is_empty() => a.to_string(),
            _ => self.addresses.extract(candidate.free_text.as_deref()),
        }
    }

    pub fn normalize(&self, candidate: &Candidate) -> NormalizedFields {
        NormalizedFields {
            name: self.name(&candidate.raw_name),
            address: self.address(candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::place::ADDRESS_UNKNOWN;
    use crate::models::position::RawPosition;

    fn normalizer() -> FieldNormalizer {
        FieldNormalizer::from_config(&Config::default())
    }

    #[test]
    fn removes_badges_inside_and_around_the_name() {
        let n = normalizer();
        assert_eq!(n.name("맛집쿠폰리뷰"), "맛집리뷰");
        assert_eq!(n.name("두바이초콜릿 쿠폰"), "두바이초콜릿");
        assert_eq!(n.name("  카페 예약 배달 네이버페이  "), "카페");
    }

    #[test]
    fn strips_bold_markup_and_entities() {
        let n = normalizer();
        assert_eq!(n.name("<b>두바이</b> 초콜릿 &amp; 쿠키"), "두바이 초콜릿 & 쿠키");
    }

    #[test]
    fn n_pay_does_not_leave_fragments() {
        let cleaner = NameCleaner::new(&["페이".to_string(), "네이버페이".to_string()]);
        assert_eq!(cleaner.clean("디저트랩 네이버페이"), "디저트랩");
    }

    #[test]
    fn structured_address_wins_over_heuristic() {
        let n = normalizer();
        let c = Candidate::new("x", RawPosition::Degrees { lat: 1.0, lng: 1.0 })
            .with_free_text("서울 마포구 동교로 242")
            .with_address("  경기 성남시 분당구 ");
        assert_eq!(n.address(&c), "경기 성남시 분당구");
    }

    #[test]
    fn blank_structured_address_falls_back() {
        let n = normalizer();
        let c = Candidate::new("x", RawPosition::Degrees { lat: 1.0, lng: 1.0 })
            .with_address("   ")
            .with_free_text("영업 중");
        assert_eq!(n.address(&c), ADDRESS_UNKNOWN);
    }
}
