use crate::error::{is_tls_failure, FilterError, Result};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{debug, info, warn};

const USER_AGENT: &str = concat!("tess_no_planets/", env!("CARGO_PKG_VERSION"));

/// reqwest wrapper shared by both catalog fetchers.
///
/// Requests go out with certificate verification on. If that attempt fails
/// during TLS negotiation, the same request is sent once more with
/// verification disabled. Environment proxies are ignored.
pub struct ReqwestHttp {
    timeout: Duration,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn client(&self, verify_certificates: bool) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .no_proxy()
            .danger_accept_invalid_certs(!verify_certificates)
            .build()?;
        Ok(client)
    }

    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Vec<u8>> {
        info!("HTTP GET request to: {}", url);
        self.send_with_tls_fallback(url, |client| client.get(url).query(query))
            .await
    }

    pub async fn post_form(&self, url: &str, form: &[(&str, String)]) -> Result<Vec<u8>> {
        info!("HTTP POST request to: {}", url);
        self.send_with_tls_fallback(url, |client| client.post(url).form(form))
            .await
    }

    async fn send_with_tls_fallback<F>(&self, url: &str, build: F) -> Result<Vec<u8>>
    where
        F: Fn(&reqwest::Client) -> reqwest::RequestBuilder,
    {
        let verified = self.client(true)?;
        let resp = match build(&verified).send().await {
            Ok(resp) => resp,
            Err(e) if is_tls_failure(&e) => {
                warn!(
                    "TLS failure talking to {}: {}; retrying without certificate verification",
                    url, e
                );
                let insecure = self.client(false)?;
                build(&insecure).send().await?
            }
            Err(e) => return Err(e.into()),
        };

        let status = resp.status();
        if !status.is_success() {
            return Err(FilterError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();
        debug!(
            "HTTP response: status={}, size={} bytes, content_type={}",
            status.as_u16(),
            bytes.len(),
            content_type
        );
        Ok(bytes)
    }
}
