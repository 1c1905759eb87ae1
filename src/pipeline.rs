use crate::error::Result;
use crate::filter::exclude_known;
use crate::output::write_csv;
use crate::types::{CandidateSource, IdentifierSource, RunSummary};
use std::path::Path;
use tracing::{info, instrument};

pub struct Pipeline;

impl Pipeline {
    /// Fetches the known identifiers, then the candidates, filters and writes
    /// the CSV. Steps run strictly in order; the first error ends the run.
    #[instrument(
        skip(identifiers, candidates),
        fields(
            identifier_source = identifiers.source_name(),
            candidate_source = candidates.source_name()
        )
    )]
    pub async fn run(
        identifiers: &dyn IdentifierSource,
        candidates: &dyn CandidateSource,
        output_path: &Path,
    ) -> Result<RunSummary> {
        info!("Step 1: fetching known planet hosts");
        let known = identifiers.fetch_identifiers().await?;

        info!("Step 2: fetching light-curve targets");
        let candidate_rows = candidates.fetch_candidates().await?;
        let candidate_count = candidate_rows.len();

        info!("Step 3: filtering");
        let filtered = exclude_known(&known, candidate_rows);

        info!("Step 4: writing {}", output_path.display());
        let written = write_csv(output_path, &filtered)?;

        let summary = RunSummary {
            known_identifiers: known.len(),
            candidates: candidate_count,
            written,
            output_path: output_path.to_path_buf(),
        };
        info!(
            known = summary.known_identifiers,
            candidates = summary.candidates,
            written = summary.written,
            "Pipeline finished"
        );
        Ok(summary)
    }
}
