//! Decoder: converts a JSON document back into a [`ConfigValue`] tree.
//!
//! Two ambiguities have to be resolved that JSON itself does not mark:
//!
//! - **Object or polymorphic object?** An object carrying the reserved `"=="` key is
//!   handed to the [`Registry`] for reconstruction. An alias the registry does not
//!   know is an error; it never falls back to a plain mapping.
//! - **Which numeric width?** Resolved from the raw literal text by
//!   [`classify_literal`](crate::numeric::classify_literal).
//!
//! # Example
//! ```
//! use confjson_core::{decode_str, ConfigValue, Registry};
//!
//! let registry = Registry::with_builtins();
//! let value = decode_str(r#"{"a":4,"b":4.0,"c":4000000000}"#, &registry).unwrap();
//! let fields = value.as_fields().unwrap();
//! assert_eq!(fields["a"], ConfigValue::Integer32(4));
//! assert_eq!(fields["b"], ConfigValue::Float64(4.0));
//! assert_eq!(fields["c"], ConfigValue::Integer64(4_000_000_000));
//! ```

use crate::document::{self, DocumentNode};
use crate::error::DecodeError;
use crate::numeric::classify_literal;
use crate::registry::Registry;
use crate::value::{ConfigValue, Fields, TYPE_KEY};
use serde_json::{Map, Value};

/// Decode a document node into a configuration value.
pub fn decode(node: &DocumentNode, registry: &Registry) -> Result<ConfigValue, DecodeError> {
    match node {
        Value::Null => Ok(ConfigValue::Null),
        Value::Bool(b) => Ok(ConfigValue::Boolean(*b)),
        Value::String(s) => Ok(ConfigValue::Text(s.clone())),
        Value::Number(n) => classify_literal(&n.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| decode(item, registry))
            .collect::<Result<Vec<_>, _>>()
            .map(ConfigValue::Sequence),
        Value::Object(map) if map.contains_key(TYPE_KEY) => decode_object(map, registry),
        Value::Object(map) => decode_entries(map, registry).map(ConfigValue::Mapping),
    }
}

/// Parse JSON text and decode it.
pub fn decode_str(text: &str, registry: &Registry) -> Result<ConfigValue, DecodeError> {
    decode(&document::parse(text)?, registry)
}

/// Decode the entries of a top-level document, which must be a plain object.
pub fn decode_root(node: &DocumentNode, registry: &Registry) -> Result<Fields, DecodeError> {
    match node {
        Value::Object(map) if map.contains_key(TYPE_KEY) => Err(DecodeError::UnexpectedNode {
            expected: "object at document root",
            found: "polymorphic object",
        }),
        Value::Object(map) => decode_entries(map, registry),
        other => Err(DecodeError::UnexpectedNode {
            expected: "object at document root",
            found: document::node_kind(other),
        }),
    }
}

/// Reconstruct a polymorphic object. The alias entry is checked before anything else
/// is decoded, and the registry receives every entry including the alias.
fn decode_object(map: &Map<String, Value>, registry: &Registry) -> Result<ConfigValue, DecodeError> {
    match &map[TYPE_KEY] {
        Value::String(alias) if !registry.is_registered(alias) => {
            return Err(DecodeError::UnregisteredAlias(alias.clone()));
        }
        Value::String(_) => {}
        other => {
            return Err(DecodeError::UnexpectedNode {
                expected: "string type alias",
                found: document::node_kind(other),
            });
        }
    }
    let fields = decode_entries(map, registry)?;
    registry
        .reconstruct(&fields)
        .map(ConfigValue::Polymorphic)
}

fn decode_entries(map: &Map<String, Value>, registry: &Registry) -> Result<Fields, DecodeError> {
    let mut fields = Fields::with_capacity(map.len());
    for (key, value) in map {
        fields.insert(key.clone(), decode(value, registry)?);
    }
    Ok(fields)
}
