//! Response normalization.
//!
//! Zoho encodes the same logical answer in several shapes depending on the
//! endpoint, the number of matching records and the sub-API. Every decoded
//! body is classified into exactly one [`Shape`], tried in this order:
//!
//! 1. `Error`: an `error` object anywhere in the body
//! 2. `MultiRow`: `result.<module>.row` is an array
//! 3. `Message`: a `result` section with no entry for the module, or a bare
//!    `<success>` document
//! 4. `Empty`: no `result` section at all
//! 5. `SingleRow`: `result.<module>.row` is a single object
//!
//! An error always wins, even when a partial `result` is present.

use serde::Serialize;
use serde_json::Value;

use crate::decode::{scalar_text, Decoded};
use crate::error::{Error, ErrorKind, Result};
use crate::record::{Record, RecordSet};

/// Whether a single row is returned bare or wrapped in a one-element set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// One row comes back as [`Normalized::Record`].
    #[default]
    Single,
    /// Always [`Normalized::Records`], even for one row.
    Collection,
}

/// A status/summary payload returned instead of record rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultMessage {
    /// The `message` text, when Zoho sent one.
    pub message: Option<String>,
    /// Fields from a `recorddetail` list, or the children of a `<success>` document.
    pub detail: Record,
    /// The undecoded section the message came from.
    pub raw: Value,
}

/// The uniform result of every CRM operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Normalized {
    Records(RecordSet),
    Record(Record),
    Message(ResultMessage),
}

impl Normalized {
    /// The records in this result. A single record becomes a one-element set.
    ///
    /// Fails with `InvalidResponse` when the result is a message rather than records.
    pub fn into_records(self) -> Result<RecordSet> {
        match self {
            Normalized::Records(records) => Ok(records),
            Normalized::Record(record) => Ok(vec![record]),
            Normalized::Message(msg) => Err(Error::new(ErrorKind::InvalidResponse(format!(
                "expected records, got result message: {}",
                msg.message.as_deref().unwrap_or("<none>")
            )))),
        }
    }

    /// The single record, or the first of a set. `None` for an empty set or a message.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Normalized::Record(record) => Some(record),
            Normalized::Records(records) => records.into_iter().next(),
            Normalized::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&ResultMessage> {
        match self {
            Normalized::Message(msg) => Some(msg),
            _ => None,
        }
    }

    /// True for an empty record set ("zero matches").
    pub fn is_empty(&self) -> bool {
        matches!(self, Normalized::Records(records) if records.is_empty())
    }
}

/// The classified shape of a decoded body.
#[derive(Debug, PartialEq)]
pub enum Shape<'a> {
    Error { code: String, message: String },
    MultiRow(&'a [Value]),
    Message(ResultMessage),
    Empty,
    SingleRow(&'a Value),
}

impl<'a> Shape<'a> {
    /// Classify a decoded body for `module`.
    pub fn classify(decoded: &'a Decoded, module: &str) -> Result<Self> {
        if let Some((code, message)) = find_error(decoded.value()) {
            return Ok(Shape::Error { code, message });
        }

        let envelope = decoded.envelope();
        let Some(result) = envelope.get("result") else {
            if let Some(success) = envelope.get("success") {
                return Ok(Shape::Message(success_message(success)));
            }
            return Ok(Shape::Empty);
        };

        let Some(entry) = result.get(module) else {
            return Ok(Shape::Message(result_message(result)?));
        };

        match entry.get("row") {
            Some(Value::Array(rows)) => Ok(Shape::MultiRow(rows)),
            Some(row @ Value::Object(_)) => Ok(Shape::SingleRow(row)),
            _ => Err(Error::new(ErrorKind::InvalidResponse(format!(
                "result for {} has no row",
                module
            )))),
        }
    }
}

/// Normalize a decoded body for `module`.
pub fn normalize(decoded: &Decoded, module: &str, cardinality: Cardinality) -> Result<Normalized> {
    match Shape::classify(decoded, module)? {
        Shape::Error { code, message } => Err(Error::upstream(code, message)),
        Shape::MultiRow(rows) => Ok(Normalized::Records(
            rows.iter().map(flatten_row).collect::<Result<_>>()?,
        )),
        Shape::Message(msg) => Ok(Normalized::Message(msg)),
        Shape::Empty => Ok(Normalized::Records(Vec::new())),
        Shape::SingleRow(row) => {
            let record = flatten_row(row)?;
            Ok(match cardinality {
                Cardinality::Single => Normalized::Record(record),
                Cardinality::Collection => Normalized::Records(vec![record]),
            })
        }
    }
}

/// Fail with `UpstreamApi` if the body carries an error object anywhere.
pub fn check_error(decoded: &Decoded) -> Result<()> {
    match find_error(decoded.value()) {
        Some((code, message)) => Err(Error::upstream(code, message)),
        None => Ok(()),
    }
}

/// Flatten a row's `FL` entries into a record, in entry order.
///
/// `FL` may be a single entry or a list. A repeated `val` overwrites the
/// earlier value.
pub fn flatten_row(row: &Value) -> Result<Record> {
    let mut record = Record::new();
    let entries = match row.get("FL") {
        Some(Value::Array(entries)) => entries.as_slice(),
        Some(entry) => std::slice::from_ref(entry),
        None => &[],
    };

    for entry in entries {
        let name = entry
            .get("val")
            .and_then(scalar_text)
            .ok_or_else(|| {
                Error::new(ErrorKind::InvalidResponse(
                    "FL entry without val".to_string(),
                ))
            })?;
        record.insert(name, field_content(entry));
    }
    Ok(record)
}

fn field_content(entry: &Value) -> String {
    match entry.get("content") {
        None => String::new(),
        Some(content) => scalar_text(content).unwrap_or_else(|| content.to_string()),
    }
}

/// Find the first `FL` entry named `name` anywhere in the body and return its content.
pub fn find_field(decoded: &Decoded, name: &str) -> Option<String> {
    find_field_in(decoded.value(), name)
}

fn find_field_in(value: &Value, name: &str) -> Option<String> {
    match value {
        Value::Object(map) => {
            if map.get("val").and_then(Value::as_str) == Some(name) {
                return Some(field_content(value));
            }
            map.values().find_map(|child| find_field_in(child, name))
        }
        Value::Array(items) => items.iter().find_map(|item| find_field_in(item, name)),
        _ => None,
    }
}

fn find_error(value: &Value) -> Option<(String, String)> {
    match value {
        Value::Object(map) => {
            if let Some(error) = map.get("error") {
                return Some(error_parts(error));
            }
            map.values().find_map(find_error)
        }
        Value::Array(items) => items.iter().find_map(find_error),
        _ => None,
    }
}

fn error_parts(error: &Value) -> (String, String) {
    let part = |key: &str| error.get(key).and_then(scalar_text).unwrap_or_default();
    match error {
        Value::Object(_) => (part("code"), part("message")),
        other => (String::new(), scalar_text(other).unwrap_or_default()),
    }
}

fn result_message(result: &Value) -> Result<ResultMessage> {
    let detail = match result.get("recorddetail") {
        Some(detail) => flatten_row(detail)?,
        None => Record::new(),
    };
    Ok(ResultMessage {
        message: result.get("message").and_then(scalar_text),
        detail,
        raw: result.clone(),
    })
}

fn success_message(success: &Value) -> ResultMessage {
    let mut detail = Record::new();
    if let Value::Object(children) = success {
        for (tag, child) in children {
            let text = scalar_text(child).unwrap_or_else(|| field_content(child));
            detail.insert(tag.as_str(), text);
        }
    }
    ResultMessage {
        message: success.get("message").and_then(scalar_text),
        detail,
        raw: success.clone(),
    }
}
