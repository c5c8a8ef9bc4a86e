//! # zoho-crm-api
//!
//! A Zoho CRM API client library for Rust.
//!
//! Builds authenticated requests, serializes records into Zoho's row/field
//! XML, and normalizes the API's many response shapes into one result type.
//!
//! ## Security
//!
//! - The auth token is redacted in Debug output
//! - Tracing spans never record the auth token
//! - Debug-log lines and error messages have the token removed
//!
//! ## Crates
//!
//! - **zoho-crm-client** - HTTP transport: credentials, config, timeouts, debug log
//! - **zoho-crm** - CRM operations: reads, writes, lead conversion, uploads, normalization
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use zoho_crm_api::{CrmClient, Credentials, ExtraParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // ZOHO_CRM_AUTHTOKEN, and optionally ZOHO_CRM_DOMAIN
//!     let client = CrmClient::new(Credentials::from_env()?)?;
//!
//!     let found = client
//!         .search("Leads", "(Company:Acme)", &ExtraParams::new())
//!         .await?;
//!
//!     for lead in found.into_records()? {
//!         println!("{:?}", lead.get("Last Name"));
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use zoho_crm_client as client;
#[cfg(feature = "crm")]
pub use zoho_crm as crm;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use zoho_crm_client::{ClientConfig, Credentials, ZohoClient};
#[cfg(feature = "crm")]
pub use zoho_crm::{
    CrmClient, ExtraParams, ListOptions, Normalized, Record, RecordSet, WriteOptions,
};
