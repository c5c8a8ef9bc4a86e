//! Zoho CRM credentials.
//!
//! The auth token is redacted in Debug output.

use crate::error::{Error, ErrorKind, Result};
use crate::DEFAULT_DOMAIN;

/// Auth token plus the region domain it is valid for.
///
/// Credentials are immutable once built; a client holds one copy for its
/// whole lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    auth_token: String,
    domain: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &"[REDACTED]")
            .field("domain", &self.domain)
            .finish()
    }
}

impl Credentials {
    /// Create credentials for the production domain.
    pub fn new(auth_token: impl Into<String>) -> Result<Self> {
        let auth_token = auth_token.into();
        if auth_token.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "auth token must not be empty".to_string(),
            )));
        }
        Ok(Self {
            auth_token,
            domain: DEFAULT_DOMAIN.to_string(),
        })
    }

    /// Target a different region, e.g. [`EU_DOMAIN`](crate::EU_DOMAIN).
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into().trim_end_matches('/').to_string();
        self
    }

    /// Load credentials from environment variables.
    ///
    /// Required:
    /// - `ZOHO_CRM_AUTHTOKEN`
    ///
    /// Optional:
    /// - `ZOHO_CRM_DOMAIN` (default: `https://crm.zoho.com`)
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("ZOHO_CRM_AUTHTOKEN").map_err(|_| {
            Error::new(ErrorKind::Config(
                "environment variable ZOHO_CRM_AUTHTOKEN is not set".to_string(),
            ))
        })?;

        let creds = Self::new(token)?;
        Ok(match std::env::var("ZOHO_CRM_DOMAIN") {
            Ok(domain) if !domain.trim().is_empty() => creds.with_domain(domain),
            _ => creds,
        })
    }

    /// The auth token.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// The region domain, without a trailing slash.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
