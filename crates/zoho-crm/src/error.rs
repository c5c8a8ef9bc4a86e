//! Error types for zoho-crm.

/// Result type alias for CRM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for CRM operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Error reported by the Zoho API itself.
    pub fn upstream(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UpstreamApi {
            code: code.into(),
            message: message.into(),
        })
    }

    /// Returns true if Zoho reported the failure in its response body.
    pub fn is_upstream(&self) -> bool {
        matches!(self.kind, ErrorKind::UpstreamApi { .. })
    }

    /// The Zoho error code, for upstream errors.
    pub fn upstream_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::UpstreamApi { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns true if the call was rejected before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self.kind, ErrorKind::Precondition(_))
    }

    /// Returns true if the transport failed (network, timeout, HTTP status).
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_))
    }
}

/// Kinds of errors that can occur.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// An `error` object in the response body.
    #[error("Zoho API error {code}: {message}")]
    UpstreamApi { code: String, message: String },

    /// A write succeeded but the expected field (such as `Id`) was absent.
    #[error("Missing result: {0}")]
    MissingResult(String),

    /// Rejected locally, before any request was sent.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Network, timeout or HTTP status failure.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("XML parse error: {0}")]
    Xml(String),

    /// A body that decoded but matches no known response shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<zoho_crm_client::Error> for Error {
    fn from(err: zoho_crm_client::Error) -> Self {
        Error::with_source(ErrorKind::Transport(err.to_string()), err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::with_source(ErrorKind::Xml(err.to_string()), err)
    }
}
