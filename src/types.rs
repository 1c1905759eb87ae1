use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// Normalized TIC identifiers known to host confirmed or candidate planets
pub type IdentifierSet = HashSet<String>;

/// A TESS target with a light curve, as written to the output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub tic_id: String,
    /// Exposure duration in seconds
    pub cadence: f64,
}

impl CandidateRow {
    pub fn new(tic_id: impl Into<String>, cadence: f64) -> Self {
        Self {
            tic_id: tic_id.into(),
            cadence,
        }
    }

    /// Key used for identifier+cadence deduplication. `-0.0` and `0.0` share a key.
    pub fn dedup_key(&self) -> (String, u64) {
        let cadence = if self.cadence == 0.0 { 0.0 } else { self.cadence };
        (self.tic_id.clone(), cadence.to_bits())
    }
}

/// Outcome of one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub known_identifiers: usize,
    pub candidates: usize,
    pub written: usize,
    pub output_path: PathBuf,
}

/// A remote service that lists identifiers to exclude
#[async_trait::async_trait]
pub trait IdentifierSource: Send + Sync {
    /// Name used in logs
    fn source_name(&self) -> &'static str;

    async fn fetch_identifiers(&self) -> Result<IdentifierSet>;
}

/// A remote service that lists candidate targets with their cadence
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    /// Name used in logs
    fn source_name(&self) -> &'static str;

    async fn fetch_candidates(&self) -> Result<Vec<CandidateRow>>;
}
