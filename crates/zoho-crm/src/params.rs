//! Request parameter assembly.
//!
//! Every call starts from the base parameters (auth token, scope, API
//! version, response format), adds its operation-specific fields, and merges
//! caller extras last so they override anything computed here.

use zoho_crm_client::{API_SCOPE, API_VERSION};

use crate::options::{ExtraParams, ListOptions, WriteOptions};

/// Zoho's "update the existing record on duplicate" mode.
pub const DUPLICATE_CHECK_MODE: &str = "2";

/// Ordered request parameters. Setting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet(Vec<(String, String)>);

impl ParamSet {
    /// `authtoken` and `scope` only.
    pub fn auth(auth_token: &str) -> Self {
        Self::default()
            .with("authtoken", auth_token)
            .with("scope", API_SCOPE)
    }

    /// Parameters every data call carries.
    pub fn base(auth_token: &str) -> Self {
        Self::auth(auth_token)
            .with("version", API_VERSION)
            .with("newFormat", "1")
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.0.retain(|(k, _)| k != name);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Apply caller extras; they win over everything already set.
    pub fn merge(mut self, extra: &ExtraParams) -> Self {
        for (name, value) in extra.iter() {
            self.set(name, value);
        }
        self
    }

    /// `xmlData`, `duplicateCheck` and `wfTrigger` for a write.
    pub fn write(mut self, xml_data: String, options: &WriteOptions) -> Self {
        self.set("xmlData", xml_data);
        if options.allow_duplicates {
            self.remove("duplicateCheck");
        } else {
            self.set("duplicateCheck", DUPLICATE_CHECK_MODE);
        }
        self.set("wfTrigger", options.trigger_workflow.to_string());
        self
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

/// `getRecordById`.
pub fn fetch_by_id(auth_token: &str, id: &str, extra: &ExtraParams) -> ParamSet {
    ParamSet::base(auth_token)
        .with("selectColumns", "All")
        .with("id", id)
        .merge(extra)
}

/// `searchRecords`, optionally bounded by `fromIndex`/`toIndex`.
pub fn search(
    auth_token: &str,
    criteria: &str,
    range: Option<(u32, u32)>,
    extra: &ExtraParams,
) -> ParamSet {
    let mut params = ParamSet::base(auth_token)
        .with("selectColumns", "All")
        .with("criteria", criteria);
    if let Some((from, to)) = range {
        params.set("fromIndex", from.to_string());
        params.set("toIndex", to.to_string());
    }
    params.merge(extra)
}

/// `getRecords` / `getMyRecords`.
pub fn list(auth_token: &str, from_index: u32, to_index: u32, options: &ListOptions) -> ParamSet {
    let mut params = ParamSet::base(auth_token)
        .with("newFormat", "2")
        .with("selectColumns", "All")
        .with("fromIndex", from_index.to_string())
        .with("toIndex", to_index.to_string());
    if let Some(column) = &options.sort_column {
        params.set("sortColumnString", column.as_str());
        params.set(
            "sortOrderString",
            if options.sort_ascending { "asc" } else { "desc" },
        );
    }
    params.merge(&options.extra)
}
