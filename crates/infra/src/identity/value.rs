//! Typed-value codec for the document REST API
//!
//! The service wraps every field in a type tag (`stringValue`,
//! `integerValue`, `mapValue`, ...). Documents travel through the core as
//! plain JSON objects; this module converts between the two shapes.

use doctorfinder_core::DocumentFields;
use doctorfinder_domain::{DoctorFinderError, Result};
use serde_json::{json, Map, Number, Value};

/// Wrap a plain JSON value in its typed representation.
pub fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                json!({ "integerValue": int.to_string() })
            } else if let Some(int) = number.as_u64() {
                json!({ "integerValue": int.to_string() })
            } else {
                json!({ "doubleValue": number.as_f64() })
            }
        }
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Encode every field of a document.
pub fn encode_fields(fields: &DocumentFields) -> Map<String, Value> {
    fields.iter().map(|(name, value)| (name.clone(), encode_value(value))).collect()
}

/// Unwrap a typed value into plain JSON.
///
/// Timestamps and references become strings; geo points become
/// `{latitude, longitude}` objects.
pub fn decode_value(value: &Value) -> Result<Value> {
    let Value::Object(tagged) = value else {
        return Err(malformed("typed value must be an object"));
    };
    let Some((tag, inner)) = tagged.iter().next() else {
        return Err(malformed("typed value has no type tag"));
    };

    match tag.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => inner.as_bool().map(Value::Bool).ok_or_else(|| malformed(tag)),
        "integerValue" => decode_integer(inner),
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            // NaN and the infinities arrive as strings and have no JSON form.
            Value::String(_) => Ok(Value::Null),
            _ => Err(malformed(tag)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => {
            inner.as_str().map(|s| Value::String(s.to_string())).ok_or_else(|| malformed(tag))
        }
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values = match inner.get("values") {
                None => return Ok(Value::Array(Vec::new())),
                Some(Value::Array(values)) => values,
                Some(_) => return Err(malformed(tag)),
            };
            values.iter().map(decode_value).collect::<Result<Vec<_>>>().map(Value::Array)
        }
        "mapValue" => match inner.get("fields") {
            None => Ok(Value::Object(Map::new())),
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            Some(_) => Err(malformed(tag)),
        },
        other => Err(malformed(&format!("unknown type tag {other}"))),
    }
}

/// Decode every field of a document.
pub fn decode_fields(fields: &Map<String, Value>) -> Result<DocumentFields> {
    fields
        .iter()
        .map(|(name, value)| decode_value(value).map(|decoded| (name.clone(), decoded)))
        .collect()
}

fn decode_integer(inner: &Value) -> Result<Value> {
    match inner {
        Value::String(text) => text
            .parse::<i64>()
            .map(|int| Value::Number(Number::from(int)))
            .map_err(|_| malformed("integerValue")),
        Value::Number(_) => Ok(inner.clone()),
        _ => Err(malformed("integerValue")),
    }
}

fn malformed(detail: &str) -> DoctorFinderError {
    DoctorFinderError::Internal(format!("malformed document value: {detail}"))
}
