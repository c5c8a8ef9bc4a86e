//! Security utilities for Zoho CRM API operations.
//!
//! ## Token redaction
//!
//! The Zoho auth token travels as an ordinary form parameter, so it ends up
//! in anything that echoes a request: debug logs, tracing fields, error
//! bodies. Everything written out of this crate goes through [`redact`].
//!
//! ```rust
//! use zoho_crm_client::security::redact;
//!
//! let line = redact::authtoken_params("authtoken=abc123&scope=crmapi");
//! assert_eq!(line, "authtoken=[REDACTED]&scope=crmapi");
//! ```
//!
//! ## URL path segments
//!
//! Module names are interpolated into the endpoint path and MUST be
//! validated first:
//!
//! ```rust
//! use zoho_crm_client::security::url;
//!
//! assert!(url::is_safe_module_name("Leads"));
//! assert!(!url::is_safe_module_name("Leads/../admin"));
//! ```

/// Token redaction helpers.
pub mod redact {
    use std::sync::LazyLock;

    static AUTHTOKEN_PARAM: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
        regex_lite::Regex::new(r#"(?i)(authtoken=)[^&\s"'<>]+"#)
            .expect("authtoken pattern is a valid regex")
    });

    /// Replace the value of every `authtoken=` parameter with `[REDACTED]`.
    #[must_use]
    pub fn authtoken_params(text: &str) -> String {
        AUTHTOKEN_PARAM
            .replace_all(text, "${1}[REDACTED]")
            .into_owned()
    }

    /// Replace every literal occurrence of `token` in `text`.
    ///
    /// Covers places where the token appears outside a query string, e.g. as
    /// a multipart field value.
    #[must_use]
    pub fn token(text: &str, token: &str) -> String {
        let text = authtoken_params(text);
        if token.is_empty() {
            return text;
        }
        text.replace(token, "[REDACTED]")
    }
}

/// URL helpers for path safety.
pub mod url {
    /// URL-encode a path segment.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zoho_crm_client::security::url;
    ///
    /// assert_eq!(url::encode_segment("Leads"), "Leads");
    /// assert_eq!(url::encode_segment("a/b"), "a%2Fb");
    /// ```
    #[must_use]
    pub fn encode_segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Validate that a module name contains only safe characters.
    ///
    /// Zoho module API names (`Leads`, `Potentials`, `CustomModule1`,
    /// `SalesOrders`) are ASCII letters, digits and underscores, starting
    /// with a letter.
    #[must_use]
    pub fn is_safe_module_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    }
}

/// XML escaping utilities.
pub mod xml {
    /// Escape a string for safe inclusion in XML content or attribute values.
    ///
    /// This escapes the five predefined XML entities.
    ///
    /// # Example
    ///
    /// ```rust
    /// use zoho_crm_client::security::xml;
    ///
    /// let safe = xml::escape("Hello <World> & 'Friends'");
    /// assert_eq!(safe, "Hello &lt;World&gt; &amp; &apos;Friends&apos;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}
