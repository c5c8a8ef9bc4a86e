//! HTTP response handling.

use crate::error::{Error, ErrorKind, Result};
use crate::security::redact;

/// A fully read HTTP response.
///
/// Zoho reports API-level failures inside 2xx bodies, so the body is always
/// read eagerly and handed to the caller as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    content_type: Option<String>,
    body: String,
}

impl Response {
    /// Create a response from its parts.
    pub fn new(status: u16, content_type: Option<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the Content-Type header.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Borrow the body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Take the body text.
    pub fn into_text(self) -> String {
        self.body
    }

    /// Turn a non-2xx response into an error; pass 2xx through.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        Err(Error::new(ErrorKind::Http {
            status: self.status,
            message: sanitize_error_message(&self.body),
        }))
    }
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// This function:
/// - Removes auth tokens echoed back in query strings
/// - Truncates messages longer than 500 characters
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = redact::authtoken_params(message);

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
