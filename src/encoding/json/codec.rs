// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # JSON Codec
//!
//! Converts between JSON documents and values of a known type.
//!
//! Decoding is schema-guided: numbers become the exact primitive declared by
//! the field, fixed arrays must have the declared length, and every struct
//! field must be present (extra keys are ignored).
//!
//! JSON has no literal for non-finite floats, so they are written as the
//! strings `"NaN"`, `"inf"` and `"-inf"` and accepted back in that form. NaN
//! payload bits do not survive a trip through JSON.
//!
//! ## Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ros2cdr::encoding::{JsonCodec, MessageCodec};
//! use ros2cdr::schema::{builtin_schemas, IntWidth};
//!
//! let ty = builtin_schemas(IntWidth::Int32).resolve("Vector3")?;
//! let codec = JsonCodec::new();
//! let value = codec.decode(br#"{"x": 1, "y": 2.5, "z": -3}"#, &ty)?;
//! assert_eq!(codec.encode_string(&value)?, r#"{"x":1.0,"y":2.5,"z":-3.0}"#);
//! # Ok(())
//! # }
//! ```

use serde_json::{Map, Number, Value};

use crate::core::{CodecError, CodecValue, DecodedMessage, Encoding, Result};
use crate::encoding::cdr::calculator::{CdrCalculator, FieldPath, Segment};
use crate::encoding::cdr::cursor::DEFAULT_MAX_SEQUENCE_LENGTH;
use crate::encoding::cdr::encoder::Scalar;
use crate::encoding::codec::MessageCodec;
use crate::schema::ast::{FieldType, MessageType, PrimitiveType};

/// JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    /// Enable pretty printing
    pretty: bool,
}

impl JsonCodec {
    /// Create a new JSON codec producing compact output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON codec producing indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Render a value as a JSON string.
    pub fn encode_string(&self, value: &CodecValue) -> Result<String> {
        self.render(&value_to_json(value))
    }

    fn render(&self, json: &Value) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(json)
        } else {
            serde_json::to_string(json)
        }
        .map_err(|e| CodecError::json(e.to_string()))
    }

    /// Parse a JSON string as a value of type `ty`.
    pub fn decode_str(&self, json: &str, ty: &FieldType) -> Result<CodecValue> {
        let json: Value = serde_json::from_str(json).map_err(|e| CodecError::json(e.to_string()))?;
        json_to_value(&json, ty, &mut FieldPath::default())
    }
}

impl MessageCodec for JsonCodec {
    fn encode(&self, value: &CodecValue, ty: &FieldType) -> Result<Vec<u8>> {
        CdrCalculator::message_size(value, ty, DEFAULT_MAX_SEQUENCE_LENGTH)?;
        self.render(&typed_to_json(value, ty)).map(String::into_bytes)
    }

    fn decode(&self, data: &[u8], ty: &FieldType) -> Result<CodecValue> {
        let json: Value =
            serde_json::from_slice(data).map_err(|e| CodecError::json(e.to_string()))?;
        json_to_value(&json, ty, &mut FieldPath::default())
    }

    fn encoding_type(&self) -> Encoding {
        Encoding::Json
    }
}

/// Convert a value to JSON, keeping struct field order.
fn value_to_json(value: &CodecValue) -> Value {
    match value {
        CodecValue::Bool(b) => Value::Bool(*b),
        CodecValue::Int8(i) => Value::from(*i),
        CodecValue::Int16(i) => Value::from(*i),
        CodecValue::Int32(i) => Value::from(*i),
        CodecValue::Int64(i) => Value::from(*i),
        CodecValue::UInt8(u) => Value::from(*u),
        CodecValue::UInt16(u) => Value::from(*u),
        CodecValue::UInt32(u) => Value::from(*u),
        CodecValue::UInt64(u) => Value::from(*u),
        CodecValue::Float32(f) => float_to_json(f64::from(*f)),
        CodecValue::Float64(f) => float_to_json(*f),
        CodecValue::String(s) => Value::String(s.clone()),
        CodecValue::Array(items) => Value::Array(items.iter().map(value_to_json).collect()),
        CodecValue::Struct(msg) => Value::Object(
            msg.iter()
                .map(|(name, v)| (name.to_string(), value_to_json(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Convert a value already checked against `ty` to JSON, emitting exactly the
/// fields and wire types the schema declares.
fn typed_to_json(value: &CodecValue, ty: &FieldType) -> Value {
    match (ty, value) {
        (FieldType::Primitive(prim), _) => match Scalar::coerce(*prim, value) {
            Some(scalar) => value_to_json(&CodecValue::from(scalar)),
            None => value_to_json(value),
        },
        (
            FieldType::Array { element, .. } | FieldType::Sequence(element),
            CodecValue::Array(items),
        ) => Value::Array(items.iter().map(|item| typed_to_json(item, element)).collect()),
        (FieldType::Struct(msg_type), CodecValue::Struct(msg)) => Value::Object(
            msg_type
                .fields
                .iter()
                .filter_map(|field| {
                    let v = msg.get(&field.name)?;
                    Some((field.name.clone(), typed_to_json(v, &field.field_type)))
                })
                .collect::<Map<String, Value>>(),
        ),
        _ => value_to_json(value),
    }
}

fn float_to_json(f: f64) -> Value {
    match Number::from_f64(f) {
        Some(n) => Value::Number(n),
        None if f.is_nan() => Value::String("NaN".to_string()),
        None if f > 0.0 => Value::String("inf".to_string()),
        None => Value::String("-inf".to_string()),
    }
}

fn json_to_float(json: &Value) -> Option<f64> {
    match json {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            "NaN" | "nan" => Some(f64::NAN),
            "inf" | "+inf" | "Infinity" => Some(f64::INFINITY),
            "-inf" | "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

/// Describe a JSON value for an error message.
fn json_kind(json: &Value) -> String {
    match json {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("bool {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

fn json_to_value<'a>(json: &Value, ty: &'a FieldType, path: &mut FieldPath<'a>) -> Result<CodecValue> {
    let mismatch =
        |path: &FieldPath<'a>| CodecError::type_mismatch(path.to_string(), ty.label(), json_kind(json));

    match ty {
        FieldType::Primitive(prim) => {
            let raw = match (prim, json) {
                (PrimitiveType::Bool, Value::Bool(b)) => Some(CodecValue::Bool(*b)),
                (PrimitiveType::Float32 | PrimitiveType::Float64, _) => {
                    json_to_float(json).map(CodecValue::Float64)
                }
                (_, Value::Number(n)) => n
                    .as_i64()
                    .map(CodecValue::Int64)
                    .or_else(|| n.as_u64().map(CodecValue::UInt64)),
                _ => None,
            };
            raw.and_then(|v| Scalar::coerce(*prim, &v))
                .map(CodecValue::from)
                .ok_or_else(|| mismatch(path))
        }
        FieldType::String | FieldType::WString => json
            .as_str()
            .map(|s| CodecValue::String(s.to_string()))
            .ok_or_else(|| mismatch(path)),
        FieldType::Array { element, len } => {
            let items = json.as_array().ok_or_else(|| mismatch(path))?;
            if items.len() != *len {
                return Err(CodecError::LengthMismatch {
                    path: path.to_string(),
                    expected: *len,
                    actual: items.len(),
                });
            }
            json_elements(items, element, path)
        }
        FieldType::Sequence(element) => {
            let items = json.as_array().ok_or_else(|| mismatch(path))?;
            json_elements(items, element, path)
        }
        FieldType::Struct(msg_type) => {
            let obj = json.as_object().ok_or_else(|| mismatch(path))?;
            json_struct(obj, msg_type, path).map(CodecValue::Struct)
        }
    }
}

fn json_elements<'a>(
    items: &[Value],
    element: &'a FieldType,
    path: &mut FieldPath<'a>,
) -> Result<CodecValue> {
    let mut values = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(Segment::Index(i));
        values.push(json_to_value(item, element, path)?);
        path.pop();
    }
    Ok(CodecValue::Array(values))
}

fn json_struct<'a>(
    obj: &Map<String, Value>,
    msg_type: &'a MessageType,
    path: &mut FieldPath<'a>,
) -> Result<DecodedMessage> {
    let mut message = DecodedMessage::with_capacity(msg_type.fields.len());
    for field in &msg_type.fields {
        path.push(Segment::Field(&field.name));
        let json = obj.get(&field.name).ok_or_else(|| CodecError::MissingField {
            path: path.to_string(),
        })?;
        message.insert(field.name.clone(), json_to_value(json, &field.field_type, path)?);
        path.pop();
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::schema::builtin_types::{add_two_ints_request, twist, vector3, IntWidth};

    fn twist_type() -> FieldType {
        FieldType::Struct(Arc::new(twist(Arc::new(vector3()))))
    }

    #[test]
    fn test_decode_twist() {
        let codec = JsonCodec::new();
        let value = codec
            .decode_str(
                r#"{"linear": {"x": 0.5, "y": 0, "z": 0},
                    "angular": {"x": 0, "y": 0, "z": 0.2}}"#,
                &twist_type(),
            )
            .unwrap();
        let msg = value.as_struct().unwrap();
        assert_eq!(msg.get_path("linear.x"), Some(&CodecValue::Float64(0.5)));
        assert_eq!(msg.get_path("angular.y"), Some(&CodecValue::Float64(0.0)));
    }

    #[test]
    fn test_decode_exact_integer_width() {
        let ty = FieldType::Struct(Arc::new(add_two_ints_request(IntWidth::Int32)));
        let value = JsonCodec::new()
            .decode(br#"{"a": 3, "b": -5}"#, &ty)
            .unwrap();
        let msg = value.as_struct().unwrap();
        assert_eq!(msg.get("a"), Some(&CodecValue::Int32(3)));
        assert_eq!(msg.get("b"), Some(&CodecValue::Int32(-5)));
    }

    #[test]
    fn test_decode_errors() {
        let ty = FieldType::Struct(Arc::new(add_two_ints_request(IntWidth::Int32)));
        let codec = JsonCodec::new();

        assert_eq!(
            codec.decode(br#"{"a": 3}"#, &ty).unwrap_err(),
            CodecError::MissingField {
                path: "b".to_string()
            }
        );
        assert_eq!(
            codec.decode(br#"{"a": 3, "b": 4294967296}"#, &ty).unwrap_err(),
            CodecError::type_mismatch("b", "int32", "number 4294967296")
        );
        assert_eq!(
            codec.decode(br#"{"a": 3, "b": 1.5}"#, &ty).unwrap_err(),
            CodecError::type_mismatch("b", "int32", "number 1.5")
        );
        assert!(matches!(
            codec.decode(b"{not json", &ty).unwrap_err(),
            CodecError::Json { .. }
        ));
    }

    #[test]
    fn test_decode_array_length() {
        let ty = FieldType::array(FieldType::primitive(PrimitiveType::Float32), 2);
        let err = JsonCodec::new().decode(b"[1, 2, 3]", &ty).unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthMismatch {
                path: "<root>".to_string(),
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_non_finite_floats() {
        let ty = FieldType::sequence(FieldType::primitive(PrimitiveType::Float64));
        let value = CodecValue::from(vec![f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1.0]);
        let codec = JsonCodec::new();
        let json = codec.encode_string(&value).unwrap();
        assert_eq!(json, r#"["NaN","inf","-inf",1.0]"#);

        let back = codec.decode_str(&json, &ty).unwrap();
        let items = back.as_array().unwrap();
        assert!(items[0].as_f64().unwrap().is_nan());
        assert_eq!(items[1], CodecValue::Float64(f64::INFINITY));
        assert_eq!(items[2], CodecValue::Float64(f64::NEG_INFINITY));
    }

    #[test]
    fn test_encode_keeps_field_order() {
        let value = CodecValue::Struct(
            DecodedMessage::new()
                .with("linear", DecodedMessage::new().with("x", 1.0f64))
                .with("angular", DecodedMessage::new().with("x", 2.0f64)),
        );
        assert_eq!(
            JsonCodec::new().encode_string(&value).unwrap(),
            r#"{"linear":{"x":1.0},"angular":{"x":2.0}}"#
        );
    }

    #[test]
    fn test_encode_validates_against_type() {
        let ty = FieldType::Struct(Arc::new(vector3()));
        let value = CodecValue::Struct(DecodedMessage::new().with("x", 1.0f64));
        let err = JsonCodec::new().encode(&value, &ty).unwrap_err();
        assert_eq!(
            err,
            CodecError::MissingField {
                path: "y".to_string()
            }
        );
        assert_eq!(JsonCodec::new().encoding_type(), Encoding::Json);
    }

    #[test]
    fn test_encode_follows_schema_shape() {
        let ty = FieldType::Struct(Arc::new(vector3()));
        let value = CodecValue::Struct(
            DecodedMessage::new()
                .with("z", 3i32)
                .with("extra", "ignored")
                .with("x", 1.0f64)
                .with("y", 2.0f32),
        );
        let json = JsonCodec::new().encode(&value, &ty).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"x":1.0,"y":2.0,"z":3.0}"#
        );
    }

    #[test]
    fn test_pretty() {
        let value = CodecValue::Struct(DecodedMessage::new().with("sum", 8i32));
        assert_eq!(
            JsonCodec::pretty().encode_string(&value).unwrap(),
            "{\n  \"sum\": 8\n}"
        );
    }
}
