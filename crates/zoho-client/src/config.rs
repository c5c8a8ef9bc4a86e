//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Accept gzip/deflate compressed responses.
    pub accept_compressed: bool,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
    /// Append-only file receiving every request and raw response.
    pub debug_log: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            accept_invalid_certs: false,
            accept_compressed: true,
            user_agent: crate::USER_AGENT.to_string(),
            enable_tracing: true,
            debug_log: None,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Disable (or re-enable) TLS certificate verification.
    ///
    /// Some Zoho deployments sit behind proxies with certificates the
    /// platform trust store rejects; this is the escape hatch for those.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Accept compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Append every outgoing URL, body and raw response to `path`.
    pub fn with_debug_log(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.debug_log = Some(path.into());
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert!(!config.accept_invalid_certs);
        assert!(config.debug_log.is_none());
        assert!(config.user_agent.contains("zoho-crm-api"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .with_timeout(Duration::from_secs(60))
            .accept_invalid_certs(true)
            .with_compression(false)
            .with_user_agent("custom-agent/1.0")
            .with_debug_log("/tmp/zoho.log")
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.accept_invalid_certs);
        assert!(!config.accept_compressed);
        assert_eq!(config.user_agent, "custom-agent/1.0");
        assert_eq!(config.debug_log, Some(PathBuf::from("/tmp/zoho.log")));
    }
}
