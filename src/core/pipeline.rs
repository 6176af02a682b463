//! Pipeline driver.
//!
//! Candidates are processed one at a time in source order:
//! FETCHING → NORMALIZING → RESOLVING → PERSISTING → SUCCESS | SKIPPED.
//! A failure on one candidate only skips that candidate.

use crate::core::coords::{self, Resolution};
use crate::core::normalize::FieldNormalizer;
use crate::core::upsert::{PersistedIds, Storage, UpsertEngine};
use crate::errors::DiscoveryError;
use crate::models::candidate::Candidate;
use crate::models::place::NewPlace;
use crate::source::CandidateSource;
use crate::ui::messages::{error, info, item, warning};

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Persisted(PersistedIds),
    /// The storage write failed; nothing else was attempted for it.
    Skipped { message: String },
}

/// What happened to one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReport {
    pub raw_name: String,
    pub name: String,
    pub address: String,
    pub resolution: Resolution,
    pub outcome: Outcome,
}

/// End-of-run tally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub processed: usize,
    pub persisted: usize,
    pub skipped: usize,
    pub unresolved: usize,
    pub reports: Vec<CandidateReport>,
}

impl RunSummary {
    fn record(&mut self, report: CandidateReport) {
        self.processed += 1;
        match report.outcome {
            Outcome::Persisted(_) => self.persisted += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
        }
        if !report.resolution.is_resolved() {
            self.unresolved += 1;
        }
        self.reports.push(report);
    }

    /// `(raw name, error message)` for each skipped candidate.
    pub fn skipped_items(&self) -> Vec<(&str, &str)> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                Outcome::Skipped { message } => Some((r.raw_name.as_str(), message.as_str())),
                Outcome::Persisted(_) => None,
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "processed: {}, persisted: {}, skipped: {}",
            self.processed, self.persisted, self.skipped
        );
        for (name, message) in self.skipped_items() {
            out.push_str(&format!("\n  - {name}: {message}"));
        }
        out
    }
}

pub struct Pipeline<S: Storage> {
    normalizer: FieldNormalizer,
    engine: UpsertEngine<S>,
    limit: usize,
}

impl<S: Storage> Pipeline<S> {
    pub fn new(normalizer: FieldNormalizer, engine: UpsertEngine<S>, limit: usize) -> Self {
        Self {
            normalizer,
            engine,
            limit,
        }
    }

    pub fn engine(&self) -> &UpsertEngine<S> {
        &self.engine
    }

    /// Fetch from `source` and process at most `limit` candidates.
    ///
    /// Only a discovery failure aborts the run.
    pub fn run(&mut self, source: &dyn CandidateSource) -> Result<RunSummary, DiscoveryError> {
        info(format!("Fetching candidates from {}…", source.describe()));
        let candidates = source.fetch()?;
        if candidates.is_empty() {
            return Err(DiscoveryError::Empty);
        }
        info(format!("Found {} candidates.", candidates.len()));

        Ok(self.process_all(&candidates))
    }

    pub fn process_all(&mut self, candidates: &[Candidate]) -> RunSummary {
        let mut summary = RunSummary::default();
        for candidate in candidates.iter().take(self.limit) {
            summary.record(self.process(candidate));
        }
        summary
    }

    pub fn process(&mut self, candidate: &Candidate) -> CandidateReport {
        let fields = self.normalizer.normalize(candidate);

        let resolution = coords::resolve(&candidate.raw_position);
        if let Resolution::Unresolved(reason) = resolution {
            warning(format!(
                "{}: {} ({}), stored without location",
                fields.name,
                reason,
                candidate.raw_position.kind()
            ));
        }

        let place = NewPlace::new(&fields.name, resolution.coordinates(), &fields.address);
        let outcome = match self.engine.persist(&place, &candidate.hints) {
            Ok(ids) => {
                item(&fields.name, Some(fields.address.as_str()));
                Outcome::Persisted(ids)
            }
            Err(e) => {
                error(format!("Skipping '{}': {}", candidate.raw_name, e));
                Outcome::Skipped {
                    message: e.to_string(),
                }
            }
        };

        CandidateReport {
            raw_name: candidate.raw_name.clone(),
            name: fields.name,
            address: fields.address,
            resolution,
            outcome,
        }
    }
}
