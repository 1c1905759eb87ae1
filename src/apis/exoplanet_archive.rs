use crate::config::ExoplanetArchiveConfig;
use crate::constants::EXOPLANET_ARCHIVE_TIC_FIELD;
use crate::error::{FilterError, Result};
use crate::infra::http_client::ReqwestHttp;
use crate::tic::normalize_tic_id;
use crate::types::{IdentifierSet, IdentifierSource};
use serde_json::Value;
use tracing::{debug, info, instrument};

/// Lists TIC identifiers of known planet hosts from the NASA Exoplanet
/// Archive TAP service.
pub struct ExoplanetArchiveSource {
    config: ExoplanetArchiveConfig,
    http: ReqwestHttp,
}

impl Default for ExoplanetArchiveSource {
    fn default() -> Self {
        Self::new(ExoplanetArchiveConfig::default())
    }
}

impl ExoplanetArchiveSource {
    pub fn new(config: ExoplanetArchiveConfig) -> Self {
        let http = ReqwestHttp::new(config.timeout());
        Self { config, http }
    }

    fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("query", self.config.query.clone()),
            ("format", "json".to_string()),
            ("maxrec", self.config.maxrec.to_string()),
        ]
    }
}

/// Reads the TAP JSON rows and collects the normalized `tic_id` values.
pub fn parse_identifier_rows(payload: &[u8]) -> Result<IdentifierSet> {
    let data: Value = serde_json::from_slice(payload)?;
    let rows = data.as_array().ok_or_else(|| FilterError::Api {
        message: "Exoplanet Archive response is not a JSON array".into(),
    })?;

    let mut identifiers = IdentifierSet::new();
    for row in rows {
        let raw = match &row[EXOPLANET_ARCHIVE_TIC_FIELD] {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => continue,
        };
        if let Some(tic_id) = normalize_tic_id(&raw) {
            identifiers.insert(tic_id);
        }
    }
    debug!(
        "Parsed {} rows into {} identifiers",
        rows.len(),
        identifiers.len()
    );
    Ok(identifiers)
}

#[async_trait::async_trait]
impl IdentifierSource for ExoplanetArchiveSource {
    fn source_name(&self) -> &'static str {
        "exoplanet_archive"
    }

    #[instrument(skip(self))]
    async fn fetch_identifiers(&self) -> Result<IdentifierSet> {
        let payload = self
            .http
            .get(&self.config.url, &self.query_params())
            .await?;
        let identifiers = parse_identifier_rows(&payload)?;
        info!(
            "Fetched {} planet-host identifiers from the Exoplanet Archive",
            identifiers.len()
        );
        Ok(identifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_and_deduplicates() {
        let payload = br#"[
            {"tic_id": "TIC 123"},
            {"tic_id": "123"},
            {"tic_id": " TIC 456 "},
            {"tic_id": 789}
        ]"#;
        let ids = parse_identifier_rows(payload).unwrap();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("123"));
        assert!(ids.contains("456"));
        assert!(ids.contains("789"));
    }

    #[test]
    fn test_parse_skips_missing_and_empty_values() {
        let payload = br#"[
            {"tic_id": null},
            {"tic_id": ""},
            {"tic_id": "TIC"},
            {"other": "TIC 1"}
        ]"#;
        assert!(parse_identifier_rows(payload).unwrap().is_empty());
    }

    #[test]
    fn test_parse_empty_table() {
        assert!(parse_identifier_rows(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_identifier_rows(br#"{"error": "bad query"}"#).unwrap_err();
        assert!(matches!(err, FilterError::Api { .. }));

        let err = parse_identifier_rows(b"<VOTABLE/>").unwrap_err();
        assert!(matches!(err, FilterError::Json(_)));
    }

    #[test]
    fn test_query_params() {
        let source = ExoplanetArchiveSource::default();
        let params = source.query_params();
        assert_eq!(
            params[0],
            (
                "query",
                "select distinct tic_id from pscomppars where tic_id is not null".to_string()
            )
        );
        assert_eq!(params[1], ("format", "json".to_string()));
        assert_eq!(params[2], ("maxrec", "100000".to_string()));
    }
}
