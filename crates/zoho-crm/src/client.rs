//! Zoho CRM operations.
//!
//! Each operation assembles its parameters, makes exactly one HTTP call
//! through [`ZohoClient`], and normalizes the decoded body.

use std::path::Path;

use tracing::{debug, instrument};

use zoho_crm_client::security::url as url_security;
use zoho_crm_client::{ApiFormat, ClientConfig, Credentials, ZohoClient};

use crate::decode::Decoded;
use crate::error::{Error, ErrorKind, Result};
use crate::normalize::{check_error, find_field, normalize, Cardinality, Normalized};
use crate::options::{ExtraParams, ListOptions, WriteOptions};
use crate::params::{self, ParamSet};
use crate::record::{Record, RecordSet};
use crate::xml::xmlfy;

/// Most records a single batch update may carry.
pub const MAX_BATCH_RECORDS: usize = 100;

/// Module that lead conversion creates records in.
pub const POTENTIALS_MODULE: &str = "Potentials";

const LEADS_MODULE: &str = "Leads";

/// Multipart field name Zoho expects for uploaded file content.
const UPLOAD_FIELD: &str = "content";

/// Zoho CRM API client.
///
/// Reads go through the JSON sub-API, writes through the XML sub-API. Both
/// are decoded into the same shape and normalized into a [`Normalized`]
/// result or a typed [`Error`].
///
/// # Example
///
/// ```rust,ignore
/// use zoho_crm::{CrmClient, Record, WriteOptions};
/// use zoho_crm_client::Credentials;
///
/// let client = CrmClient::new(Credentials::from_env()?)?;
///
/// let id = client
///     .insert("Leads", &Record::new().with("Last Name", "Doe"), &WriteOptions::default())
///     .await?;
///
/// let lead = client.get_record_by_id("Leads", &id).await?.into_record();
/// ```
#[derive(Debug, Clone)]
pub struct CrmClient {
    client: ZohoClient,
}

impl CrmClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self {
            client: ZohoClient::new(credentials)?,
        })
    }

    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: ZohoClient::with_config(credentials, config)?,
        })
    }

    pub fn from_client(client: ZohoClient) -> Self {
        Self { client }
    }

    /// Get the underlying ZohoClient.
    pub fn inner(&self) -> &ZohoClient {
        &self.client
    }

    pub fn domain(&self) -> &str {
        self.client.domain()
    }

    fn auth_token(&self) -> &str {
        self.client.credentials().auth_token()
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetch one record by id.
    ///
    /// A missing record comes back as an empty [`Normalized::Records`].
    #[instrument(skip(self))]
    pub async fn get_record_by_id(&self, module: &str, id: &str) -> Result<Normalized> {
        ensure_module(module)?;
        let params = params::fetch_by_id(self.auth_token(), id, &ExtraParams::new());
        let decoded = self.call(ApiFormat::Json, module, "getRecordById", params).await?;
        normalize(&decoded, module, Cardinality::Single)
    }

    /// Search by criteria such as `(Last Name:Doe)`.
    ///
    /// One match comes back as [`Normalized::Record`], several as
    /// [`Normalized::Records`].
    #[instrument(skip(self, extra))]
    pub async fn search(
        &self,
        module: &str,
        criteria: &str,
        extra: &ExtraParams,
    ) -> Result<Normalized> {
        ensure_module(module)?;
        let params = params::search(self.auth_token(), criteria, None, extra);
        let decoded = self.call(ApiFormat::Json, module, "searchRecords", params).await?;
        normalize(&decoded, module, Cardinality::Single)
    }

    /// Search within `from_index..=to_index`. The bounds are passed to Zoho as given.
    #[instrument(skip(self, extra))]
    pub async fn search_range(
        &self,
        module: &str,
        criteria: &str,
        from_index: u32,
        to_index: u32,
        extra: &ExtraParams,
    ) -> Result<RecordSet> {
        ensure_module(module)?;
        let params = params::search(
            self.auth_token(),
            criteria,
            Some((from_index, to_index)),
            extra,
        );
        let decoded = self.call(ApiFormat::Json, module, "searchRecords", params).await?;
        let records = normalize(&decoded, module, Cardinality::Collection)?.into_records()?;
        debug!(count = records.len(), "search_range returned records");
        Ok(records)
    }

    /// List records in `from_index..=to_index`, optionally only the caller's own and sorted.
    #[instrument(skip(self, options))]
    pub async fn list(
        &self,
        module: &str,
        from_index: u32,
        to_index: u32,
        options: &ListOptions,
    ) -> Result<RecordSet> {
        ensure_module(module)?;
        let method = if options.mine_only {
            "getMyRecords"
        } else {
            "getRecords"
        };
        let params = params::list(self.auth_token(), from_index, to_index, options);
        let decoded = self.call(ApiFormat::Json, module, method, params).await?;
        let records = normalize(&decoded, module, Cardinality::Collection)?.into_records()?;
        debug!(count = records.len(), "list returned records");
        Ok(records)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Insert one record and return the new record's id.
    #[instrument(skip(self, record, options))]
    pub async fn insert(
        &self,
        module: &str,
        record: &Record,
        options: &WriteOptions,
    ) -> Result<String> {
        ensure_module(module)?;
        let params = ParamSet::base(self.auth_token())
            .write(xmlfy([record], module), options)
            .merge(&options.extra);
        let decoded = self.call(ApiFormat::Xml, module, "insertRecords", params).await?;

        check_error(&decoded)?;
        let id = find_field(&decoded, "Id").ok_or_else(|| {
            Error::new(ErrorKind::MissingResult(format!(
                "insert into {} returned no Id",
                module
            )))
        })?;
        debug!(id = %id, "record inserted");
        Ok(id)
    }

    /// Update one record by id.
    #[instrument(skip(self, record, options))]
    pub async fn update(
        &self,
        module: &str,
        id: &str,
        record: &Record,
        options: &WriteOptions,
    ) -> Result<Normalized> {
        ensure_module(module)?;
        let params = ParamSet::base(self.auth_token())
            .with("id", id)
            .write(xmlfy([record], module), options)
            .merge(&options.extra);
        let decoded = self.call(ApiFormat::Xml, module, "updateRecords", params).await?;
        normalize(&decoded, module, Cardinality::Single)
    }

    /// Update up to [`MAX_BATCH_RECORDS`] records in one call.
    ///
    /// Each record must carry its own `Id` field.
    #[instrument(skip(self, records, options), fields(count = records.len()))]
    pub async fn update_many(
        &self,
        module: &str,
        records: &[Record],
        options: &WriteOptions,
    ) -> Result<Normalized> {
        ensure_batch_size(records)?;
        ensure_module(module)?;
        let params = ParamSet::base(self.auth_token())
            .with("version", "4")
            .write(xmlfy(records, module), options)
            .merge(&options.extra);
        let decoded = self.call(ApiFormat::Xml, module, "updateRecords", params).await?;
        normalize(&decoded, module, Cardinality::Single)
    }

    /// Update records of `related_module` linked to record `id` of `module`.
    #[instrument(skip(self, records, options), fields(count = records.len()))]
    pub async fn update_related(
        &self,
        module: &str,
        id: &str,
        related_module: &str,
        records: &[Record],
        options: &WriteOptions,
    ) -> Result<Normalized> {
        ensure_module(module)?;
        ensure_module(related_module)?;
        let params = ParamSet::base(self.auth_token())
            .with("id", id)
            .with("relatedModule", related_module)
            .write(xmlfy(records, related_module), options)
            .merge(&options.extra);
        let decoded = self
            .call(ApiFormat::Xml, module, "updateRelatedRecords", params)
            .await?;
        normalize(&decoded, related_module, Cardinality::Single)
    }

    /// Convert a lead, creating a Potential from `potential`.
    #[instrument(skip(self, potential, options))]
    pub async fn convert_lead(
        &self,
        lead_id: &str,
        potential: &Record,
        options: &WriteOptions,
    ) -> Result<Normalized> {
        let params = ParamSet::base(self.auth_token())
            .with("leadId", lead_id)
            .write(xmlfy([potential], POTENTIALS_MODULE), options)
            .merge(&options.extra);
        let decoded = self
            .call(ApiFormat::Xml, LEADS_MODULE, "convertLead", params)
            .await?;
        normalize(&decoded, POTENTIALS_MODULE, Cardinality::Single)
    }

    /// Attach a file to a record.
    #[instrument(skip(self))]
    pub async fn upload_file(
        &self,
        module: &str,
        record_id: &str,
        path: &Path,
    ) -> Result<Normalized> {
        ensure_module(module)?;
        let fields = ParamSet::auth(self.auth_token()).with("id", record_id);
        let url = self.client.endpoint_url(ApiFormat::Xml, module, "uploadFile");
        let body = self
            .client
            .post_file(&url, fields.as_slice(), UPLOAD_FIELD, path)
            .await?;
        let decoded = Decoded::from_text(&body)?;
        normalize(&decoded, module, Cardinality::Single)
    }

    async fn call(
        &self,
        format: ApiFormat,
        module: &str,
        method: &str,
        params: ParamSet,
    ) -> Result<Decoded> {
        let url = self.client.endpoint_url(format, module, method);
        let body = self.client.post_form(&url, params.as_slice()).await?;
        Decoded::from_text(&body)
    }
}

fn ensure_module(module: &str) -> Result<()> {
    if url_security::is_safe_module_name(module) {
        Ok(())
    } else {
        Err(Error::new(ErrorKind::Precondition(format!(
            "invalid module name: {:?}",
            module
        ))))
    }
}

fn ensure_batch_size(records: &[Record]) -> Result<()> {
    if records.len() > MAX_BATCH_RECORDS {
        return Err(Error::new(ErrorKind::Precondition(format!(
            "batch too large: {} records (max {})",
            records.len(),
            MAX_BATCH_RECORDS
        ))));
    }
    Ok(())
}
