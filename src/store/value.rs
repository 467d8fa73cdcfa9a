//! Typed-value codec for the hosted wire format.
//!
//! The wire protocol tags every value with its type, e.g.
//! `{"stringValue": "x"}` or `{"integerValue": "42"}`. This module maps
//! between that representation and plain `serde_json` values.

use serde_json::{json, Map, Value};

/// Encode a JSON value into its typed wire representation.
pub fn to_wire(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => match number.as_i64() {
            // int64 travels as a decimal string on the wire
            Some(integer) => json!({ "integerValue": integer.to_string() }),
            None => json!({ "doubleValue": number.as_f64() }),
        },
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_wire).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({
            "mapValue": { "fields": encode_fields(map) }
        }),
    }
}

/// Encode a field map into the wire `fields` object.
pub fn encode_fields(fields: &Map<String, Value>) -> Value {
    Value::Object(
        fields
            .iter()
            .map(|(name, value)| (name.clone(), to_wire(value)))
            .collect(),
    )
}

/// Decode a typed wire value back into plain JSON.
///
/// Timestamp, reference, and bytes values decode to their string forms;
/// unrecognized tags decode to null.
pub fn from_wire(wire: &Value) -> Value {
    let map = match wire.as_object() {
        Some(map) => map,
        None => return Value::Null,
    };

    let (kind, inner) = match map.iter().next() {
        Some(entry) => entry,
        None => return Value::Null,
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" | "doubleValue" => inner.clone(),
        "integerValue" => match inner {
            Value::String(text) => text
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or(Value::Null),
            Value::Number(_) => inner.clone(),
            _ => Value::Null,
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => inner.clone(),
        "arrayValue" => {
            let items = inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(from_wire).collect())
                .unwrap_or_default();
            Value::Array(items)
        }
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(decode_fields)
                .unwrap_or_default();
            Value::Object(fields)
        }
        _ => Value::Null,
    }
}

/// Decode a wire `fields` object into a plain field map.
pub fn decode_fields(wire: &Map<String, Value>) -> Map<String, Value> {
    wire.iter()
        .map(|(name, value)| (name.clone(), from_wire(value)))
        .collect()
}
