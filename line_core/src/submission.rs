//! # Mail Submission Boundary
//!
//! Glue between a finished configuration and the mail relay. The relay
//! itself is an external collaborator reached over HTTP; this module owns
//! the payload shape, the client-side mirror of the relay's validation, and
//! the in-flight guard that rejects a second submission while one is
//! pending.
//!
//! Modal control is a capability the presentation layer injects through
//! [`Overlay`] - no part of the engine touches UI globals.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConfigError, ConfigResult};

/// Overlay handle for the submission modal
pub const SEND_MODAL: &str = "sendModal";

/// Payload POSTed to the mail relay.
///
/// The relay requires `name`, `location` and a well-formed `email`; any
/// extra entries (the configuration summary) are flattened alongside them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SendRequest {
    /// Contact name
    pub name: String,
    /// Province / country
    pub location: String,
    /// Reply-to address
    pub email: String,
    /// Configuration summary fields, flattened into the JSON object
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SendRequest {
    /// Client-side mirror of the relay's field validation (it answers 422
    /// for the same cases).
    pub fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::missing_field("name"));
        }
        if self.location.trim().is_empty() {
            return Err(ConfigError::missing_field("location"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ConfigError::missing_field("email"));
        }
        if !is_plausible_email(email) {
            return Err(ConfigError::invalid_input(
                "email",
                email,
                "Not a well-formed email address",
            ));
        }
        Ok(())
    }
}

/// Minimal well-formedness check: one `@` with a non-empty local part and
/// a dotted, non-empty domain. Deliverability is the relay's problem.
fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

/// Submission lifecycle flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SubmissionStatus {
    /// Nothing sent yet
    #[default]
    Idle,
    /// A request is in flight; further submits are rejected
    Pending,
    /// The relay accepted the last submission
    Succeeded,
    /// The last submission failed (message for the user)
    Failed(String),
}

/// Transport to the mail relay.
///
/// `Ok(())` means HTTP 2xx with `{ok:true}`; anything else is a
/// [`ConfigError::TransportError`].
pub trait MailTransport {
    fn send(&self, request: &SendRequest) -> ConfigResult<()>;
}

/// Modal open/close capability injected by the presentation layer
pub trait Overlay {
    fn open(&mut self, handle: &str);
    fn close(&mut self, handle: &str);
}

/// Drives one submission at a time through a transport.
#[derive(Debug, Default)]
pub struct Submitter {
    status: SubmissionStatus,
}

impl Submitter {
    pub fn new() -> Self {
        Submitter::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Open the submission modal
    pub fn open_form(&self, overlay: &mut dyn Overlay) {
        overlay.open(SEND_MODAL);
    }

    /// Validate and send one request.
    ///
    /// Rejected with [`ConfigError::SubmissionInFlight`] while a previous
    /// submit is pending. The pending flag is always released, success or
    /// failure - there is no stuck in-flight state. On success the modal is
    /// closed through the injected overlay.
    pub fn submit(
        &mut self,
        request: &SendRequest,
        transport: &dyn MailTransport,
        overlay: &mut dyn Overlay,
    ) -> ConfigResult<()> {
        if self.status == SubmissionStatus::Pending {
            return Err(ConfigError::SubmissionInFlight);
        }
        request.validate()?;

        self.status = SubmissionStatus::Pending;
        match transport.send(request) {
            Ok(()) => {
                self.status = SubmissionStatus::Succeeded;
                overlay.close(SEND_MODAL);
                Ok(())
            }
            Err(error) => {
                self.status = SubmissionStatus::Failed(error.to_string());
                Err(error)
            }
        }
    }
}
