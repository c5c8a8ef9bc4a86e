//! Append-only debug log of requests and raw responses.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Optional diagnostic sink.
///
/// When a path is configured every entry is appended to it with an RFC 3339
/// timestamp; otherwise [`DebugLog::append`] is a no-op. Write failures are
/// reported through `tracing` and never fail the surrounding call.
#[derive(Debug, Clone, Default)]
pub struct DebugLog {
    path: Option<PathBuf>,
}

impl DebugLog {
    /// A log that appends to `path`.
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A log that discards everything.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    /// The configured file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns true if entries are written somewhere.
    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Append one labelled entry.
    pub async fn append(&self, label: &str, text: &str) {
        let Some(path) = &self.path else {
            return;
        };

        let line = format!("[{}] {}: {}\n", chrono::Utc::now().to_rfc3339(), label, text);
        if let Err(e) = write_line(path, &line).await {
            warn!(path = %path.display(), error = %e, "Failed to write debug log");
        }
    }
}

impl From<Option<PathBuf>> for DebugLog {
    fn from(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

async fn write_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await?;
    file.write_all(line.as_bytes()).await?;
    file.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_log_is_noop() {
        let log = DebugLog::disabled();
        assert!(!log.is_enabled());
        log.append("URL", "https://crm.zoho.com").await;
    }

    #[tokio::test]
    async fn test_entries_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zoho.log");
        let log = DebugLog::to_file(&path);

        log.append("URL", "https://crm.zoho.com/crm/private/json/Leads/getRecords")
            .await;
        log.append("RESPONSE", "{\"response\":{}}").await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("] URL: https://crm.zoho.com"));
        assert!(lines[1].contains("RESPONSE: {\"response\":{}}"));
    }

    #[tokio::test]
    async fn test_unwritable_path_does_not_panic() {
        let dir = tempfile::tempdir().unwrap();
        let log = DebugLog::to_file(dir.path().join("missing").join("zoho.log"));
        log.append("URL", "x").await;
    }
}
