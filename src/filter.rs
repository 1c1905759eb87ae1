use crate::tic::normalize_tic_id;
use crate::types::{CandidateRow, IdentifierSet};
use std::collections::HashSet;

/// Drops repeated identifier+cadence pairs, keeping first occurrences in order.
pub fn deduplicate(rows: Vec<CandidateRow>) -> Vec<CandidateRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.dedup_key()))
        .collect()
}

/// Candidates whose normalized identifier is not in `known`, deduplicated.
///
/// The identifier set is expected to hold normalized ids already; candidate
/// ids are normalized here so `"TIC 123"` and `"123"` compare equal.
pub fn exclude_known(known: &IdentifierSet, candidates: Vec<CandidateRow>) -> Vec<CandidateRow> {
    let remaining = candidates
        .into_iter()
        .filter_map(|row| {
            let tic_id = normalize_tic_id(&row.tic_id)?;
            if known.contains(&tic_id) {
                None
            } else {
                Some(CandidateRow {
                    tic_id,
                    cadence: row.cadence,
                })
            }
        })
        .collect();
    deduplicate(remaining)
}
