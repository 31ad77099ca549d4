//! Blocking HTTP transport to the mail relay.
//!
//! Success is HTTP 2xx with `{ok:true}`; anything else surfaces as a
//! transport error with the relay's message when it sent one.

use serde::Deserialize;

use line_core::errors::{ConfigError, ConfigResult};
use line_core::submission::{MailTransport, SendRequest};

#[derive(Deserialize)]
struct RelayResponse {
    ok: bool,
    error: Option<String>,
}

/// POSTs submissions to a mail-relay endpoint
pub struct RelayTransport {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl RelayTransport {
    pub fn new(endpoint: impl Into<String>) -> ConfigResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("line_cli/{}", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ConfigError::transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(RelayTransport {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl MailTransport for RelayTransport {
    fn send(&self, request: &SendRequest) -> ConfigResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(|e| ConfigError::transport(format!("Network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::transport(format!("Relay returned {status}")));
        }

        let body: RelayResponse = response
            .json()
            .map_err(|e| ConfigError::transport(format!("Failed to parse relay response: {e}")))?;
        if body.ok {
            Ok(())
        } else {
            Err(ConfigError::transport(
                body.error.unwrap_or_else(|| "Relay reported failure".to_string()),
            ))
        }
    }
}
