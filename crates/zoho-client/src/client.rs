//! Core HTTP client with Zoho-specific handling.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{FilePart, RequestBody, RequestBuilder, RequestMethod};
use crate::response::Response;

/// HTTP client for the Zoho CRM API.
///
/// Each call is a single request/response round trip bounded by the
/// configured timeouts. The client is cheap to clone and safe to share
/// across tasks.
#[derive(Debug, Clone)]
pub struct ZohoHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl ZohoHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed)
            .danger_accept_invalid_certs(config.accept_invalid_certs);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Execute a request and read the full body.
    ///
    /// Non-2xx statuses become [`ErrorKind::Http`]; 2xx bodies are returned
    /// untouched for the caller to decode.
    #[instrument(skip(self, request), fields(method = ?request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(ref body) = request.body {
            req = match body {
                RequestBody::Form(params) => req.body(serde_urlencoded::to_string(params)?),
                RequestBody::Multipart { fields, file } => {
                    req.multipart(multipart_form(fields, file).await?)
                }
            };
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method, "Sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if self.config.enable_tracing {
            let content_length = response.content_length();
            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        let body = response.text().await?;
        Response::new(status, content_type, body).error_for_status()
    }
}

/// The file part streams from disk; its content type is guessed from the
/// file extension, falling back to `application/octet-stream`.
async fn multipart_form(
    fields: &[(String, String)],
    file: &FilePart,
) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in fields {
        form = form.text(name.clone(), value.clone());
    }
    let part = reqwest::multipart::Part::file(&file.path).await?;
    Ok(form.part(file.field_name.clone(), part))
}
