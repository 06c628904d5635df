//! Contact form submission state and response interpretation
//!
//! The browser side performs the POST; this module decides what the status
//! line says and whether the form is reset.

use serde::Deserialize;
use tracing::{debug, warn};

use super::surface::Rgba;

pub const SENDING_TEXT: &str = "Sending...";
pub const SUCCESS_TEXT: &str = "Message sent successfully!";
pub const FAILURE_TEXT: &str = "Oops! There was a problem submitting your form";

/// Value written to the organisation input by the "None" button
pub const ORG_NONE: &str = "None";

const NEUTRAL: Rgba = Rgba::opaque(255, 255, 255);
const SUCCESS: Rgba = Rgba::opaque(0, 255, 0);
const FAILURE: Rgba = Rgba::opaque(255, 77, 77);

/// Error body returned by the form backend
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub errors: Option<Vec<FieldError>>,
}

#[derive(Debug, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub message: String,
}

/// Result of one submission attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx response
    Sent,
    /// Non-2xx response listing field errors
    Rejected(Vec<String>),
    /// Non-2xx response without usable detail, or no response at all
    Failed,
}

impl SubmitOutcome {
    /// Interpret an HTTP response
    pub fn from_response(status: u16, body: &str) -> Self {
        if (200..300).contains(&status) {
            return SubmitOutcome::Sent;
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody { errors: Some(errors) }) => {
                let messages = errors.into_iter().map(|e| e.message).collect();
                SubmitOutcome::Rejected(messages)
            }
            Ok(_) => {
                debug!(status, "Error response without errors list");
                SubmitOutcome::Failed
            }
            Err(e) => {
                warn!(status, error = %e, "Unreadable error response");
                SubmitOutcome::Failed
            }
        }
    }

    /// Status line for this outcome
    pub fn status(&self) -> FormStatus {
        match self {
            SubmitOutcome::Sent => FormStatus::new(SUCCESS_TEXT, SUCCESS),
            SubmitOutcome::Rejected(messages) => FormStatus::new(messages.join(", "), FAILURE),
            SubmitOutcome::Failed => FormStatus::new(FAILURE_TEXT, FAILURE),
        }
    }

    /// Whether the form fields should be cleared
    pub fn resets_form(&self) -> bool {
        matches!(self, SubmitOutcome::Sent)
    }
}

/// Text and colour of the status line under the form
#[derive(Clone, Debug, PartialEq)]
pub struct FormStatus {
    pub text: String,
    pub color: Rgba,
}

impl FormStatus {
    fn new(text: impl Into<String>, color: Rgba) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }

    pub fn sending() -> Self {
        Self::new(SENDING_TEXT, NEUTRAL)
    }
}

/// Submission lifecycle
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Sending,
    Done(SubmitOutcome),
}

/// Contact form controller; one request in flight at a time
#[derive(Debug, Default)]
pub struct ContactForm {
    state: SubmitState,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission. Returns the "sending" status, or `None` while a
    /// previous request is still outstanding.
    pub fn begin(&mut self) -> Option<FormStatus> {
        if self.state == SubmitState::Sending {
            debug!("Submit ignored, request already in flight");
            return None;
        }
        self.state = SubmitState::Sending;
        Some(FormStatus::sending())
    }

    /// Record the outcome and return the status to show
    pub fn finish(&mut self, outcome: SubmitOutcome) -> FormStatus {
        let status = outcome.status();
        self.state = SubmitState::Done(outcome);
        status
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }
}
