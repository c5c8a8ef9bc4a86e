//! Per-operation options.
//!
//! Every operation takes its optional knobs as a value with documented
//! defaults. Caller-supplied [`ExtraParams`] are merged last and override
//! anything the client computed.

/// Extra request parameters, merged after the computed ones (last wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraParams(Vec<(String, String)>);

impl ExtraParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Options for [`CrmClient::list`](crate::CrmClient::list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Only records owned by the token's user (`getMyRecords`). Default: false.
    pub mine_only: bool,
    /// Column to sort by. Default: none (server order).
    pub sort_column: Option<String>,
    /// Sort direction when `sort_column` is set. Default: ascending.
    pub sort_ascending: bool,
    pub extra: ExtraParams,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            mine_only: false,
            sort_column: None,
            sort_ascending: true,
            extra: ExtraParams::default(),
        }
    }
}

impl ListOptions {
    pub fn mine_only(mut self, mine_only: bool) -> Self {
        self.mine_only = mine_only;
        self
    }

    pub fn sort_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.sort_column = Some(column.into());
        self.sort_ascending = ascending;
        self
    }

    pub fn with_extra(mut self, extra: ExtraParams) -> Self {
        self.extra = extra;
        self
    }
}

/// Options for write operations (insert, update, convert, related updates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Skip Zoho's duplicate check (omit `duplicateCheck`). Default: false.
    pub allow_duplicates: bool,
    /// Run workflow rules on write (`wfTrigger`). Default: true.
    pub trigger_workflow: bool,
    pub extra: ExtraParams,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            trigger_workflow: true,
            extra: ExtraParams::default(),
        }
    }
}

impl WriteOptions {
    pub fn allow_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    pub fn trigger_workflow(mut self, trigger: bool) -> Self {
        self.trigger_workflow = trigger;
        self
    }

    pub fn with_extra(mut self, extra: ExtraParams) -> Self {
        self.extra = extra;
        self
    }
}
