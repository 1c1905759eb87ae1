use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tempfile::tempdir;
use tess_no_planets::error::{FilterError, Result as FilterResult};
use tess_no_planets::pipeline::Pipeline;
use tess_no_planets::types::{CandidateRow, CandidateSource, IdentifierSet, IdentifierSource};

struct StaticIdentifiers(Vec<&'static str>);

#[async_trait::async_trait]
impl IdentifierSource for StaticIdentifiers {
    fn source_name(&self) -> &'static str {
        "static_identifiers"
    }

    async fn fetch_identifiers(&self) -> FilterResult<IdentifierSet> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

struct StaticCandidates(Vec<CandidateRow>);

#[async_trait::async_trait]
impl CandidateSource for StaticCandidates {
    fn source_name(&self) -> &'static str {
        "static_candidates"
    }

    async fn fetch_candidates(&self) -> FilterResult<Vec<CandidateRow>> {
        Ok(self.0.clone())
    }
}

struct FailingIdentifiers;

#[async_trait::async_trait]
impl IdentifierSource for FailingIdentifiers {
    fn source_name(&self) -> &'static str {
        "failing_identifiers"
    }

    async fn fetch_identifiers(&self) -> FilterResult<IdentifierSet> {
        Err(FilterError::Status {
            url: "https://exoplanetarchive.example/TAP/sync".into(),
            status: 503,
        })
    }
}

/// Records whether it was asked for candidates.
#[derive(Default)]
struct TrackingCandidates {
    called: AtomicBool,
}

#[async_trait::async_trait]
impl CandidateSource for TrackingCandidates {
    fn source_name(&self) -> &'static str {
        "tracking_candidates"
    }

    async fn fetch_candidates(&self) -> FilterResult<Vec<CandidateRow>> {
        self.called.store(true, Ordering::SeqCst);
        Ok(Vec::new())
    }
}

#[tokio::test]
async fn test_known_hosts_are_excluded_from_output() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("out.csv");

    let identifiers = StaticIdentifiers(vec!["123"]);
    let candidates = StaticCandidates(vec![
        CandidateRow::new("123", 120.0),
        CandidateRow::new("456", 20.0),
    ]);

    let summary = Pipeline::run(&identifiers, &candidates, &output).await?;

    assert_eq!(summary.known_identifiers, 1);
    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.written, 1);
    assert_eq!(std::fs::read_to_string(&output)?, "tic_id,cadence\n456,20.0\n");
    Ok(())
}

#[tokio::test]
async fn test_empty_sources_write_header_only() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("empty.csv");

    let summary = Pipeline::run(
        &StaticIdentifiers(Vec::new()),
        &StaticCandidates(Vec::new()),
        &output,
    )
    .await?;

    assert_eq!(summary.written, 0);
    assert_eq!(std::fs::read_to_string(&output)?, "tic_id,cadence\n");
    Ok(())
}

#[tokio::test]
async fn test_output_rows_are_unique_and_unknown() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("out.csv");

    let identifiers = StaticIdentifiers(vec!["2", "4"]);
    let candidates = StaticCandidates(vec![
        CandidateRow::new("1", 120.0),
        CandidateRow::new("2", 120.0),
        CandidateRow::new("1", 120.0),
        CandidateRow::new("3", 1800.0),
        CandidateRow::new("TIC 4", 20.0),
        CandidateRow::new("1", 20.0),
    ]);

    Pipeline::run(&identifiers, &candidates, &output).await?;

    let mut reader = csv::Reader::from_path(&output)?;
    let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    assert_eq!(headers, vec!["tic_id", "cadence"]);

    let rows: Vec<CandidateRow> = reader.deserialize().collect::<Result<_, _>>()?;
    assert_eq!(
        rows,
        vec![
            CandidateRow::new("1", 120.0),
            CandidateRow::new("3", 1800.0),
            CandidateRow::new("1", 20.0),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_identifier_failure_aborts_before_candidates() -> Result<()> {
    let temp_dir = tempdir()?;
    let output = temp_dir.path().join("never.csv");
    let candidates = TrackingCandidates::default();

    let result = Pipeline::run(&FailingIdentifiers, &candidates, &output).await;

    assert!(matches!(result, Err(FilterError::Status { status: 503, .. })));
    assert!(!candidates.called.load(Ordering::SeqCst));
    assert!(!output.exists());
    Ok(())
}
