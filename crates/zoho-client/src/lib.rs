//! # zoho-client
//!
//! Core HTTP client infrastructure for the Zoho CRM API.
//!
//! This crate provides the transport the CRM operations are built on:
//! - Credentials (auth token + region domain) with redacted Debug output
//! - Request building for url-encoded form and multipart bodies
//! - Connect/request timeouts and optional certificate-verification bypass
//! - An optional append-only debug log of every request and raw response
//! - Request/response tracing
//!
//! There is no retry, caching or rate limiting: a failed call surfaces
//! immediately to the caller.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (zoho-crm: records, XML, normalizer, operations)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ZohoClient                             │
//! │  - Holds credentials + HTTP client + debug log              │
//! │  - Builds endpoint URLs (json / xml sub-APIs)               │
//! │  - Posts form and multipart bodies, returns raw text        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ZohoHttpClient                           │
//! │  - Raw HTTP with timeouts, compression, TLS options         │
//! │  - Response status handling                                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use zoho_crm_client::{ApiFormat, ClientConfig, Credentials, ZohoClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zoho_crm_client::Error> {
//!     let creds = Credentials::from_env()?;
//!     let client = ZohoClient::new(creds)?;
//!
//!     let url = client.endpoint_url(ApiFormat::Json, "Leads", "getRecords");
//!     let body = client
//!         .post_form(&url, &[("authtoken".into(), client.credentials().auth_token().into())])
//!         .await?;
//!     println!("{body}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod credentials;
mod debug_log;
mod error;
mod request;
mod response;
pub mod security;
mod zoho_client;

pub use client::ZohoHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::Credentials;
pub use debug_log::DebugLog;
pub use error::{Error, ErrorKind, Result};
pub use request::{FilePart, RequestBody, RequestBuilder, RequestMethod};
pub use response::Response;
pub use zoho_client::{ApiFormat, ZohoClient};

/// Default Zoho CRM domain (US data center).
pub const DEFAULT_DOMAIN: &str = "https://crm.zoho.com";

/// Zoho CRM domain for the EU data center.
pub const EU_DOMAIN: &str = "https://crm.zoho.eu";

/// Zoho CRM domain for the India data center.
pub const IN_DOMAIN: &str = "https://crm.zoho.in";

/// Zoho CRM domain for the Australia data center.
pub const AU_DOMAIN: &str = "https://crm.zoho.com.au";

/// Zoho CRM domain for the China data center.
pub const CN_DOMAIN: &str = "https://crm.zoho.com.cn";

/// API version sent with every request.
pub const API_VERSION: &str = "2";

/// API scope sent with every request.
pub const API_SCOPE: &str = "crmapi";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("zoho-crm-api/", env!("CARGO_PKG_VERSION"));
