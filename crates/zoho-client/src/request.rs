//! HTTP request building for the Zoho CRM API.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Post,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Post => reqwest::Method::POST,
        }
    }
}

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field the file is sent under.
    pub field_name: String,
    /// Local path of the file.
    pub path: PathBuf,
}

/// Request body content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` parameters, in order.
    Form(Vec<(String, String)>),
    /// Text fields plus one file.
    Multipart {
        fields: Vec<(String, String)>,
        file: FilePart,
    },
}

/// Builder for HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) body: Option<RequestBody>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Set a url-encoded form body.
    pub fn form(mut self, params: Vec<(String, String)>) -> Self {
        self.body = Some(RequestBody::Form(params));
        self.headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );
        self
    }

    /// Set a multipart body made of text fields and one file.
    ///
    /// The Content-Type (with boundary) is set by the transport.
    pub fn multipart(
        mut self,
        fields: Vec<(String, String)>,
        field_name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.body = Some(RequestBody::Multipart {
            fields,
            file: FilePart {
                field_name: field_name.into(),
                path: path.into(),
            },
        });
        self
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request body, if any.
    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    /// Render the body as it goes on the wire, for the debug log.
    ///
    /// Multipart bodies are summarized as their text fields plus the file path.
    pub fn encoded_body(&self) -> Result<Option<String>> {
        match &self.body {
            None => Ok(None),
            Some(RequestBody::Form(params)) => Ok(Some(serde_urlencoded::to_string(params)?)),
            Some(RequestBody::Multipart { fields, file }) => {
                let encoded = serde_urlencoded::to_string(fields)?;
                Ok(Some(format!(
                    "{encoded} [file {}={}]",
                    file.field_name,
                    file.path.display()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_request_builder() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://crm.zoho.com/crm");

        assert_eq!(req.method(), RequestMethod::Post);
        assert_eq!(req.url(), "https://crm.zoho.com/crm");
        assert!(req.headers.is_empty());
        assert!(req.body().is_none());
        assert_eq!(req.encoded_body().unwrap(), None);
    }

    #[test]
    fn test_form_body_is_url_encoded_in_order() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://crm.zoho.com")
            .form(params(&[("scope", "crmapi"), ("criteria", "(Last Name:Doe & Co)")]));

        assert_eq!(
            req.headers.get("Content-Type"),
            Some(&"application/x-www-form-urlencoded".to_string())
        );
        assert_eq!(
            req.encoded_body().unwrap().unwrap(),
            "scope=crmapi&criteria=%28Last+Name%3ADoe+%26+Co%29"
        );
    }

    #[test]
    fn test_multipart_body() {
        let req = RequestBuilder::new(RequestMethod::Post, "https://crm.zoho.com")
            .multipart(params(&[("id", "42")]), "content", "/tmp/report.pdf");

        match req.body() {
            Some(RequestBody::Multipart { fields, file }) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(file.field_name, "content");
                assert_eq!(file.path, PathBuf::from("/tmp/report.pdf"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
        assert_eq!(
            req.encoded_body().unwrap().unwrap(),
            "id=42 [file content=/tmp/report.pdf]"
        );
    }
}
