//! One decoded shape for both wire formats.

use serde_json::Value;

use crate::error::Result;
use crate::xml;

/// A response body decoded into the JSON sub-API's generic shape.
///
/// XML bodies are converted with [`xml::to_value`], so `<FL val="Id">1</FL>`
/// and `{"val":"Id","content":"1"}` look the same to the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded(Value);

impl Decoded {
    pub fn from_json_str(body: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(body)?))
    }

    pub fn from_xml_str(body: &str) -> Result<Self> {
        Ok(Self(xml::to_value(body)?))
    }

    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Decode text of unknown format: a body starting with `<` is XML, anything else JSON.
    pub fn from_text(body: &str) -> Result<Self> {
        if body.trim_start().starts_with('<') {
            Self::from_xml_str(body)
        } else {
            Self::from_json_str(body)
        }
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The `response` envelope, or the whole body when there is none.
    pub(crate) fn envelope(&self) -> &Value {
        self.0.get("response").unwrap_or(&self.0)
    }
}

impl From<Value> for Decoded {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

/// Render a scalar the way Zoho means it: strings as-is, numbers and bools
/// stringified, null as empty.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_and_xml_decode_alike() {
        let from_json = Decoded::from_json_str(
            r#"{"response":{"result":{"Leads":{"row":{"no":"1","FL":{"val":"Id","content":"1"}}}}}}"#,
        )
        .unwrap();
        let from_xml = Decoded::from_xml_str(
            r#"<response><result><Leads><row no="1"><FL val="Id">1</FL></row></Leads></result></response>"#,
        )
        .unwrap();

        assert_eq!(from_json, from_xml);
    }

    #[test]
    fn test_from_text_sniffs_format() {
        let xml = Decoded::from_text("  \n<response><nodata/></response>").unwrap();
        assert_eq!(xml.value(), &json!({"response": {"nodata": ""}}));

        let json = Decoded::from_text(r#"{"response":{}}"#).unwrap();
        assert_eq!(json.into_value(), json!({"response": {}}));

        assert!(Decoded::from_text("not a body").is_err());
    }

    #[test]
    fn test_envelope() {
        let wrapped = Decoded::from(json!({"response": {"result": {}}}));
        assert_eq!(wrapped.envelope(), &json!({"result": {}}));

        let bare = Decoded::from(json!({"success": {}}));
        assert_eq!(bare.envelope(), &json!({"success": {}}));
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!("a")), Some("a".to_string()));
        assert_eq!(scalar_text(&json!(4832)), Some("4832".to_string()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&Value::Null), Some(String::new()));
        assert_eq!(scalar_text(&json!({})), None);
    }
}
