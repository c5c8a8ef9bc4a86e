//! # zoho-crm
//!
//! Zoho CRM API client with record reads, XML writes and response normalization.
//!
//! ## Features
//!
//! - **Reads** - Fetch by id, search by criteria, ranged search, list (own records, sorted)
//! - **Writes** - Insert, update one, batch update (up to 100), related-record updates
//! - **Lead conversion** - Convert a lead into a Potential
//! - **Attachments** - Upload a file to a record
//! - **Normalization** - Every response shape collapses into [`Normalized`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use zoho_crm::{CrmClient, ExtraParams, ListOptions, Record, WriteOptions};
//! use zoho_crm_client::Credentials;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zoho_crm::Error> {
//!     let client = CrmClient::new(Credentials::from_env()?)?;
//!
//!     // Search
//!     let found = client
//!         .search("Leads", "(Last Name:Doe)", &ExtraParams::new())
//!         .await?;
//!
//!     // List the newest 20 of my leads
//!     let leads = client
//!         .list("Leads", 1, 20, &ListOptions::default().mine_only(true).sort_by("Created Time", false))
//!         .await?;
//!
//!     // Insert
//!     let id = client
//!         .insert("Leads", &Record::new().with("Last Name", "Doe"), &WriteOptions::default())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod decode;
mod error;
mod normalize;
mod options;
pub mod params;
mod record;
pub mod xml;

pub use client::{CrmClient, MAX_BATCH_RECORDS, POTENTIALS_MODULE};
pub use decode::Decoded;
pub use error::{Error, ErrorKind, Result};
pub use normalize::{
    check_error, find_field, flatten_row, normalize, Cardinality, Normalized, ResultMessage, Shape,
};
pub use options::{ExtraParams, ListOptions, WriteOptions};
pub use record::{Record, RecordSet};
pub use xml::xmlfy;
