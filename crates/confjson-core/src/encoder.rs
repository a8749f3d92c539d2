//! Encoder: converts a [`ConfigValue`] tree into a JSON document.
//!
//! Every value kind maps onto exactly one document shape:
//!
//! | value                     | document                                   |
//! |---------------------------|--------------------------------------------|
//! | `Null`                    | `null`                                     |
//! | `Boolean` / `Text`        | `true` / `"text"`                          |
//! | `Integer32` / `Integer64` | integer literal, never with a decimal point|
//! | `Float64`                 | literal that always has a decimal point    |
//! | `Sequence`                | array, element order kept                  |
//! | `Mapping` / `Section`     | object, key order kept                     |
//! | `Polymorphic`             | object with `"=="` first, then its fields  |
//!
//! # Example
//! ```
//! use confjson_core::{encode_to_string, fields, ConfigSerializable, ConfigValue, Registry, Vector};
//!
//! let registry = Registry::with_builtins();
//! let value = ConfigValue::Mapping(fields! {
//!     "count" => 10,
//!     "ratio" => 4.0,
//!     "pos" => Vector::new(1.0, 2.0, 3.0).to_value(),
//! });
//! assert_eq!(
//!     encode_to_string(&value, &registry).unwrap(),
//!     r#"{"count":10,"ratio":4.0,"pos":{"==":"Vector","x":1.0,"y":2.0,"z":3.0}}"#
//! );
//! ```

use crate::document::{self, DocumentNode, NUMBER_TOKEN};
use crate::error::EncodeError;
use crate::numeric::float_number;
use crate::registry::Registry;
use crate::value::{ConfigValue, Fields, PolymorphicObject, TYPE_KEY};
use serde_json::{Map, Number, Value};

/// Encode a configuration value into a document node.
///
/// Fails only when a registered serializer fails, a float is not finite, or a reserved
/// key (`"=="` or [`NUMBER_TOKEN`]) shows up where it would be misread on decode.
pub fn encode(value: &ConfigValue, registry: &Registry) -> Result<DocumentNode, EncodeError> {
    Ok(match value {
        ConfigValue::Null => Value::Null,
        ConfigValue::Boolean(b) => Value::Bool(*b),
        ConfigValue::Integer32(n) => Value::Number(Number::from(*n)),
        ConfigValue::Integer64(n) => Value::Number(Number::from(*n)),
        ConfigValue::Float64(f) => Value::Number(float_number(*f)?),
        ConfigValue::Text(s) => Value::String(s.clone()),
        ConfigValue::Sequence(items) => Value::Array(
            items
                .iter()
                .map(|item| encode(item, registry))
                .collect::<Result<_, _>>()?,
        ),
        ConfigValue::Mapping(fields) | ConfigValue::Section(fields) => {
            check_reserved_keys(fields, || format!("{} keys", value.kind()))?;
            Value::Object(encode_entries(Map::with_capacity(fields.len()), fields, registry)?)
        }
        ConfigValue::Polymorphic(obj) => encode_object(obj, registry)?,
    })
}

/// Encode a value and print it as compact JSON.
pub fn encode_to_string(value: &ConfigValue, registry: &Registry) -> Result<String, EncodeError> {
    encode(value, registry).map(|node| document::to_text(&node))
}

/// Encode a value and print it as indented JSON.
pub fn encode_to_string_pretty(
    value: &ConfigValue,
    registry: &Registry,
) -> Result<String, EncodeError> {
    encode(value, registry).map(|node| document::to_text_pretty(&node))
}

/// A polymorphic object is written as its alias under the reserved key, followed by
/// the fields its registered serializer produces, in that serializer's order.
fn encode_object(obj: &PolymorphicObject, registry: &Registry) -> Result<Value, EncodeError> {
    let fields = registry.serialize(obj)?;
    check_reserved_keys(&fields, || format!("fields of object type '{}'", obj.alias))?;
    let mut map = Map::with_capacity(fields.len() + 1);
    map.insert(
        TYPE_KEY.to_string(),
        Value::String(registry.alias_for(obj).to_string()),
    );
    encode_entries(map, &fields, registry).map(Value::Object)
}

/// The alias key would be misread as a type tag and the number token as a number.
fn check_reserved_keys(fields: &Fields, place: impl FnOnce() -> String) -> Result<(), EncodeError> {
    match [TYPE_KEY, NUMBER_TOKEN]
        .into_iter()
        .find(|key| fields.contains_key(*key))
    {
        Some(key) => Err(EncodeError::ReservedKey {
            key,
            place: place(),
        }),
        None => Ok(()),
    }
}

fn encode_entries(
    mut map: Map<String, Value>,
    fields: &Fields,
    registry: &Registry,
) -> Result<Map<String, Value>, EncodeError> {
    for (key, value) in fields {
        map.insert(key.clone(), encode(value, registry)?);
    }
    Ok(map)
}
