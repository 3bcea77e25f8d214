//! Typed view of a document-intelligence service response.
//!
//! The service returns loosely shaped JSON: any field may be missing or
//! `null`, and numbers sometimes arrive as decorated strings. Every field is
//! therefore optional (or defaults to empty) and numeric fields go through
//! the same coercion the extractors use. Fields this model does not name are
//! kept in `extra`, and a response decoded from JSON also keeps the payload
//! exactly as received so it can be written back out for audit.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::statement::rules::numeric::coerce_number;

/// A complete document response as returned by the service.
///
/// Serializes as the received payload when there is one, otherwise from the
/// typed fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct DocumentResponse {
    /// Full text layer of the document.
    #[serde(rename = "ocr_text", default, deserialize_with = "null_as_default", skip_serializing_if = "String::is_empty")]
    pub recognized_text: String,

    /// Itemized statement entries, in document order.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub line_items: Vec<LineItem>,

    /// Named values extracted outside the standard schema.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,

    /// Vendor block (for mortgage statements, usually the lender).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<Party>,

    /// Bill-to block (usually the borrower or the property).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_to: Option<Party>,

    /// Document grand total.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    /// Statement date as reported by the service.
    #[serde(rename = "date", default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub statement_date: Option<String>,

    /// Payment due date as reported by the service.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    /// Service-level confidence score.
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,

    /// Document classification.
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,

    /// Every other field of the response, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    /// The payload as received, set when the response was decoded from JSON.
    #[serde(skip)]
    pub raw: Option<Value>,
}

impl<'de> Deserialize<'de> for DocumentResponse {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        let mut response = DocumentResponse::deserialize(raw.clone()).map_err(D::Error::custom)?;
        response.raw = Some(raw);
        Ok(response)
    }
}

impl Serialize for DocumentResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.raw {
            Some(raw) => raw.serialize(serializer),
            None => DocumentResponse::serialize(self, serializer),
        }
    }
}

/// One itemized entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A named, loosely typed value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default)]
    pub value: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Vendor or bill-to block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Party {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentResponse {
    /// Parse a response from its JSON text.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Decode a response from an already parsed JSON value.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Vendor name, if the vendor block carries one.
    pub fn vendor_name(&self) -> Option<&str> {
        self.vendor.as_ref().and_then(|v| v.name.as_deref())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
