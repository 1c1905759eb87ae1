use crate::config::MastConfig;
use crate::constants::{
    MAST_CRITERIA, MAST_EXPTIME_COLUMN, MAST_SERVICE, MAST_TARGET_NAME_COLUMN,
};
use crate::error::{FilterError, Result};
use crate::filter::deduplicate;
use crate::infra::http_client::ReqwestHttp;
use crate::tic::extract_tic_id;
use crate::types::{CandidateRow, CandidateSource};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, instrument, warn};

const STATUS_COMPLETE: &str = "COMPLETE";
const STATUS_EXECUTING: &str = "EXECUTING";

/// Seconds MAST may hold a search open before answering "EXECUTING".
/// Kept below the HTTP deadline so the answer arrives before the client gives up.
const SERVER_WAIT_MARGIN_SECONDS: u64 = 10;

#[derive(Debug, Deserialize)]
struct MastResponse {
    status: String,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    paging: Option<MastPaging>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MastPaging {
    #[serde(default)]
    pages_filtered: Option<u64>,
    #[serde(default)]
    rows_filtered: Option<u64>,
}

/// Lists TESS time-series observations from the MAST CAOM search.
pub struct MastSource {
    config: MastConfig,
    http: ReqwestHttp,
}

impl Default for MastSource {
    fn default() -> Self {
        Self::new(MastConfig::default())
    }
}

impl MastSource {
    pub fn new(config: MastConfig) -> Self {
        let http = ReqwestHttp::new(config.timeout());
        Self { config, http }
    }

    /// The JSON document sent as the `request` form field.
    pub fn request_body(&self) -> Value {
        let filters: Vec<Value> = MAST_CRITERIA
            .iter()
            .map(|(param, value)| json!({ "paramName": param, "values": [value] }))
            .collect();
        let server_wait = self
            .config
            .timeout_seconds
            .saturating_sub(SERVER_WAIT_MARGIN_SECONDS)
            .max(1);

        json!({
            "service": MAST_SERVICE,
            "format": "json",
            "params": {
                "columns": format!("{MAST_TARGET_NAME_COLUMN},{MAST_EXPTIME_COLUMN}"),
                "filters": filters,
            },
            "pagesize": self.config.pagesize,
            "page": 1,
            "removenullcolumns": true,
            "timeout": server_wait,
        })
    }

    /// Total submissions allowed: the first one plus `max_polls` resubmissions.
    pub fn submission_limit(&self) -> u32 {
        self.config.max_polls.saturating_add(1)
    }

    async fn submit(&self, form: &[(&str, String)]) -> Result<MastResponse> {
        let payload = self.http.post_form(&self.config.url, form).await?;
        let parsed: MastResponse = serde_json::from_slice(&payload)?;
        Ok(parsed)
    }
}

fn cadence_value(value: &Value) -> Option<f64> {
    let cadence = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    cadence.is_finite().then_some(cadence)
}

/// Turns MAST rows into candidate rows, dropping rows with a missing or
/// unparseable name or exposure time, then deduplicating.
pub fn parse_candidate_rows(rows: &[Value]) -> Vec<CandidateRow> {
    let mut candidates = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;
    for row in rows {
        let tic_id = row[MAST_TARGET_NAME_COLUMN].as_str().and_then(extract_tic_id);
        let cadence = cadence_value(&row[MAST_EXPTIME_COLUMN]);
        match (tic_id, cadence) {
            (Some(tic_id), Some(cadence)) => candidates.push(CandidateRow { tic_id, cadence }),
            _ => dropped += 1,
        }
    }
    let candidates = deduplicate(candidates);
    debug!(
        "Kept {} unique candidates from {} rows ({} dropped)",
        candidates.len(),
        rows.len(),
        dropped
    );
    candidates
}

#[async_trait::async_trait]
impl CandidateSource for MastSource {
    fn source_name(&self) -> &'static str {
        "mast"
    }

    #[instrument(skip(self))]
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRow>> {
        let form = [("request", self.request_body().to_string())];

        let limit = self.submission_limit();
        for submission in 1..=limit {
            let response = self.submit(&form).await?;
            match response.status.as_str() {
                STATUS_COMPLETE => {
                    let rows = response.data.unwrap_or_default();
                    if let Some(paging) = &response.paging {
                        if paging.pages_filtered.unwrap_or(1) > 1 {
                            warn!(
                                "MAST matched {} rows but only the first {} were requested",
                                paging.rows_filtered.unwrap_or_default(),
                                self.config.pagesize
                            );
                        }
                    }
                    let candidates = parse_candidate_rows(&rows);
                    info!(
                        "Fetched {} candidate targets from MAST ({} rows)",
                        candidates.len(),
                        rows.len()
                    );
                    return Ok(candidates);
                }
                STATUS_EXECUTING => {
                    debug!("MAST search still executing (submission {}/{})", submission, limit);
                }
                other => {
                    return Err(FilterError::Api {
                        message: format!(
                            "MAST returned status {}: {}",
                            other,
                            response.msg.unwrap_or_default()
                        ),
                    });
                }
            }
        }

        Err(FilterError::Api {
            message: format!(
                "MAST search did not complete after {} submissions",
                limit
            ),
        })
    }
}
