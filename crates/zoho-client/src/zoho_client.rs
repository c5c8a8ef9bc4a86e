//! High-level Zoho client: credentials + transport + debug log.
//!
//! ## Security
//!
//! - The auth token is redacted in Debug output
//! - The auth token is redacted from every debug-log entry

use std::path::Path;

use tracing::instrument;

use crate::client::ZohoHttpClient;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::debug_log::DebugLog;
use crate::error::Result;
use crate::request::RequestBuilder;
use crate::security::{redact, url as url_security};

/// The two Zoho CRM sub-APIs. Reads use JSON, writes use XML.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFormat {
    Json,
    Xml,
}

impl ApiFormat {
    /// Path segment for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiFormat::Json => "json",
            ApiFormat::Xml => "xml",
        }
    }
}

/// Authenticated Zoho CRM transport.
///
/// Combines immutable [`Credentials`] with an HTTP client and the optional
/// debug log. Higher-level crates (zoho-crm) build parameters and decode
/// bodies; this type only moves text over the wire.
#[derive(Clone)]
pub struct ZohoClient {
    http: ZohoHttpClient,
    credentials: Credentials,
    debug_log: DebugLog,
}

impl std::fmt::Debug for ZohoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZohoClient")
            .field("credentials", &self.credentials)
            .field("debug_log", &self.debug_log.path())
            .finish_non_exhaustive()
    }
}

impl ZohoClient {
    /// Create a client with default configuration.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        url::Url::parse(credentials.domain())?;
        let debug_log = DebugLog::from(config.debug_log.clone());
        let http = ZohoHttpClient::new(config)?;
        Ok(Self {
            http,
            credentials,
            debug_log,
        })
    }

    /// The credentials this client was built with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The region domain.
    pub fn domain(&self) -> &str {
        self.credentials.domain()
    }

    /// The debug log sink.
    pub fn debug_log(&self) -> &DebugLog {
        &self.debug_log
    }

    /// Build an endpoint URL.
    ///
    /// Example: `endpoint_url(ApiFormat::Json, "Leads", "getRecords")` ->
    /// `https://crm.zoho.com/crm/private/json/Leads/getRecords`
    pub fn endpoint_url(&self, format: ApiFormat, module: &str, method: &str) -> String {
        format!(
            "{}/crm/private/{}/{}/{}",
            self.credentials.domain(),
            format.as_str(),
            url_security::encode_segment(module),
            url_security::encode_segment(method)
        )
    }

    /// POST a url-encoded form and return the raw body text.
    #[instrument(skip(self, params), fields(url = %url))]
    pub async fn post_form(&self, url: &str, params: &[(String, String)]) -> Result<String> {
        let request = self.http.post(url).form(params.to_vec());
        self.send(request).await
    }

    /// POST a multipart form with one file and return the raw body text.
    #[instrument(skip(self, fields), fields(url = %url, file = %path.display()))]
    pub async fn post_file(
        &self,
        url: &str,
        fields: &[(String, String)],
        field_name: &str,
        path: &Path,
    ) -> Result<String> {
        let request = self.http.post(url).multipart(fields.to_vec(), field_name, path);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        if self.debug_log.is_enabled() {
            let token = self.credentials.auth_token();
            self.debug_log
                .append("URL", &redact::token(request.url(), token))
                .await;
            if let Some(body) = request.encoded_body()? {
                self.debug_log
                    .append("BODY", &redact::token(&body, token))
                    .await;
            }
        }

        let result = self.http.execute(request).await;

        match &result {
            Ok(response) => self.debug_log.append("RESPONSE", response.text()).await,
            Err(err) => self.debug_log.append("ERROR", &err.to_string()).await,
        }

        Ok(result?.into_text())
    }
}
