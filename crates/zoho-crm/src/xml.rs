//! XML on the wire: outgoing `xmlData` payloads and incoming response bodies.
//!
//! Outgoing rows use Zoho's row/field schema:
//!
//! ```text
//! <Leads><row no="1"><FL val="Last Name">Doe</FL></row></Leads>
//! ```
//!
//! Incoming XML is converted into the same `serde_json::Value` shape the JSON
//! sub-API returns, so one normalizer handles both formats.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};
use zoho_crm_client::security::xml::escape;

use crate::error::{Error, ErrorKind, Result};
use crate::record::Record;

/// Serialize records into `<root><row no="N"><FL val="name">value</FL>...</row>...</root>`.
///
/// Rows are numbered from 1. Values are trimmed; values containing XML markup
/// characters are emitted as CDATA so they reach Zoho verbatim.
pub fn xmlfy<'a, I>(records: I, root: &str) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = String::new();
    out.push('<');
    out.push_str(root);
    out.push('>');

    for (index, record) in records.into_iter().enumerate() {
        out.push_str(&format!("<row no=\"{}\">", index + 1));
        for (name, value) in record.iter() {
            out.push_str("<FL val=\"");
            out.push_str(&escape(name));
            out.push_str("\">");
            push_text(&mut out, value.trim());
            out.push_str("</FL>");
        }
        out.push_str("</row>");
    }

    out.push_str("</");
    out.push_str(root);
    out.push('>');
    out
}

fn push_text(out: &mut String, value: &str) {
    if !value.contains(['<', '>', '&']) {
        out.push_str(value);
        return;
    }
    out.push_str("<![CDATA[");
    // "]]>" cannot appear inside CDATA; close and reopen around the '>'
    out.push_str(&value.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]>");
}

struct Frame {
    name: String,
    entries: Map<String, Value>,
    text: String,
    has_children: bool,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let mut entries = Map::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            entries.insert(key, Value::String(value));
        }
        Ok(Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            entries,
            text: String::new(),
            has_children: false,
        })
    }

    /// Text is kept as written, except whitespace-only text between child
    /// elements, which is indentation.
    fn close(self) -> (String, Value) {
        let text = if self.has_children && self.text.trim().is_empty() {
            String::new()
        } else {
            self.text
        };
        let value = if self.entries.is_empty() {
            Value::String(text)
        } else {
            let mut entries = self.entries;
            if !text.is_empty() {
                entries.insert("content".to_string(), Value::String(text));
            }
            Value::Object(entries)
        };
        (self.name, value)
    }
}

/// Hand a closed element to its parent, or make it the document root.
fn emit(
    stack: &mut [Frame],
    root: &mut Option<(String, Value)>,
    (name, value): (String, Value),
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.has_children = true;
            attach(&mut parent.entries, name, value);
        }
        None if root.is_some() => {
            return Err(Error::new(ErrorKind::Xml(format!(
                "second root element <{}>",
                name
            ))));
        }
        None => *root = Some((name, value)),
    }
    Ok(())
}

fn attach(parent: &mut Map<String, Value>, name: String, value: Value) {
    match parent.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            parent.insert(name, value);
        }
    }
}

/// Parse an XML document into a `serde_json::Value` keyed by the root element.
///
/// Attributes become string entries, child elements become entries keyed by
/// tag name (repeated tags collapse into an array), and text becomes a
/// `content` entry unless the element is bare text, in which case the element
/// is just the string. A second root element is an error.
pub fn to_value(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                emit(&mut stack, &mut root, Frame::open(&start)?.close())?;
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| {
                    Error::new(ErrorKind::Xml("unbalanced closing tag".to_string()))
                })?;
                emit(&mut stack, &mut root, frame.close())?;
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::new(ErrorKind::Xml(
            "unexpected end of document".to_string(),
        )));
    }

    let (name, value) = root.ok_or_else(|| {
        Error::new(ErrorKind::InvalidResponse("empty XML document".to_string()))
    })?;
    let mut top = Map::new();
    top.insert(name, value);
    Ok(Value::Object(top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_xmlfy_single_record() {
        let record = Record::new().with("Last Name", "Doe");
        assert_eq!(
            xmlfy([&record], "Leads"),
            r#"<Leads><row no="1"><FL val="Last Name">Doe</FL></row></Leads>"#
        );
    }

    #[test]
    fn test_xmlfy_numbers_rows_and_trims() {
        let records = vec![
            Record::new().with("Last Name", "  Doe ").with("Company", "Acme"),
            Record::new().with("Last Name", "Roe\n"),
        ];
        assert_eq!(
            xmlfy(&records, "Leads"),
            concat!(
                r#"<Leads><row no="1"><FL val="Last Name">Doe</FL><FL val="Company">Acme</FL></row>"#,
                r#"<row no="2"><FL val="Last Name">Roe</FL></row></Leads>"#
            )
        );
    }

    #[test]
    fn test_xmlfy_is_deterministic() {
        let records = vec![Record::new().with("A", "1").with("B", "x & y")];
        assert_eq!(xmlfy(&records, "Leads"), xmlfy(&records, "Leads"));
    }

    #[test]
    fn test_xmlfy_escapes_field_names_and_wraps_markup() {
        let record = Record::new()
            .with("Notes \"quoted\"", "<b>bold</b> & more")
            .with("Tricky", "a]]>b");
        let xml = xmlfy([&record], "Leads");

        assert!(xml.contains(r#"<FL val="Notes &quot;quoted&quot;">"#));
        assert!(xml.contains("<![CDATA[<b>bold</b> & more]]>"));
        assert!(xml.contains("<![CDATA[a]]]]><![CDATA[>b]]>"));
    }

    #[test]
    fn test_xmlfy_output_parses_back() {
        let records = vec![
            Record::new().with("Last Name", " Doe ").with("Notes", "1 < 2 && 3 > 2"),
            Record::new().with("Last Name", "Roe").with("Notes", "x]]>y"),
            Record::new().with("Last Name", "Moe"),
        ];
        let value = to_value(&xmlfy(&records, "Leads")).unwrap();
        let rows = value["Leads"]["row"].as_array().unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["no"], "1");
        assert_eq!(rows[0]["FL"][0], json!({"val": "Last Name", "content": "Doe"}));
        assert_eq!(rows[0]["FL"][1]["content"], "1 < 2 && 3 > 2");
        assert_eq!(rows[1]["FL"][1]["content"], "x]]>y");
        assert_eq!(rows[2]["no"], "3");
        assert_eq!(rows[2]["FL"], json!({"val": "Last Name", "content": "Moe"}));
    }

    #[test]
    fn test_to_value_insert_response() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" ?>
<response uri="/crm/private/xml/Leads/insertRecords">
  <result>
    <message>Record(s) added successfully</message>
    <recorddetail>
      <FL val="Id">2000000022020</FL>
      <FL val="Created By"><![CDATA[Jane Admin]]></FL>
    </recorddetail>
  </result>
</response>"#;
        let value = to_value(xml).unwrap();

        assert_eq!(
            value,
            json!({
                "response": {
                    "uri": "/crm/private/xml/Leads/insertRecords",
                    "result": {
                        "message": "Record(s) added successfully",
                        "recorddetail": {
                            "FL": [
                                {"val": "Id", "content": "2000000022020"},
                                {"val": "Created By", "content": "Jane Admin"}
                            ]
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn test_to_value_error_and_empty_elements() {
        let xml = r#"<response><error><code>4600</code><message>Unable to process your request &amp; retry</message></error><flag/><FL val="Empty"/></response>"#;
        let value = to_value(xml).unwrap();

        assert_eq!(value["response"]["error"]["code"], "4600");
        assert_eq!(
            value["response"]["error"]["message"],
            "Unable to process your request & retry"
        );
        assert_eq!(value["response"]["flag"], "");
        assert_eq!(value["response"]["FL"], json!({"val": "Empty"}));
    }

    #[test]
    fn test_to_value_keeps_content_whitespace() {
        let xml = "<response>\n  <FL val=\"Description\"><![CDATA[  indented line\n]]></FL>\n  <FL val=\"Padded\">  two  </FL>\n</response>";
        let value = to_value(xml).unwrap();

        assert_eq!(
            value,
            json!({
                "response": {
                    "FL": [
                        {"val": "Description", "content": "  indented line\n"},
                        {"val": "Padded", "content": "  two  "}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_to_value_keeps_element_order() {
        let value =
            to_value("<success><Contact>1</Contact><Account>2</Account></success>").unwrap();
        let keys: Vec<&str> = value["success"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["Contact", "Account"]);
    }

    #[test]
    fn test_to_value_rejects_malformed() {
        assert!(to_value("<response><result></response>").is_err());
        assert!(to_value("<response>").is_err());

        let err = to_value("<response>a</response><response>b</response>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));
        let err = to_value("<response/><other/>").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Xml(_)));

        let err = to_value("").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidResponse(_)));
    }
}
