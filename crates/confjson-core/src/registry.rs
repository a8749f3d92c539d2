//! Polymorphic object registry.
//!
//! A [`Registry`] maps a type alias to two capabilities:
//!
//! - **serialize**: flatten an object into its ordered field map (encoder side);
//! - **reconstruct**: rebuild an object from a field map that still contains the
//!   reserved [`TYPE_KEY`](crate::TYPE_KEY) entry (decoder side).
//!
//! The registry is an ordinary value owned by the caller and passed to every encode
//! and decode call. It is read-only once built and `Send + Sync`, so one instance can
//! be shared across threads behind an `Arc`.
//!
//! # Example
//! ```
//! use confjson_core::{fields, ConfigSerializable, ConfigValue, Fields, ReconstructionError, Registry};
//!
//! struct Color(String);
//!
//! impl ConfigSerializable for Color {
//!     const ALIAS: &'static str = "Color";
//!     fn serialize(&self) -> Fields {
//!         fields! { "name" => self.0.as_str() }
//!     }
//!     fn deserialize(fields: &Fields) -> Result<Self, ReconstructionError> {
//!         fields
//!             .get("name")
//!             .and_then(ConfigValue::as_str)
//!             .map(|s| Color(s.to_string()))
//!             .ok_or_else(|| ReconstructionError::missing_field("name", "text"))
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register::<Color>();
//! assert!(registry.is_registered("Color"));
//! ```

use crate::error::{DecodeError, EncodeError, ReconstructionError};
use crate::value::{ConfigValue, Fields, PolymorphicObject, TYPE_KEY};
use crate::vector::Vector;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, trace};

type SerializeFn = dyn Fn(&PolymorphicObject) -> Result<Fields, String> + Send + Sync;
type ReconstructFn = dyn Fn(&Fields) -> Result<Fields, ReconstructionError> + Send + Sync;

/// A Rust type that can live inside a configuration tree as a polymorphic object.
pub trait ConfigSerializable: Sized {
    /// Alias written under the reserved key. Must be unique within a registry.
    const ALIAS: &'static str;

    /// Flatten into ordered fields. Must not produce the reserved key.
    fn serialize(&self) -> Fields;

    /// Rebuild from fields. The map may contain the reserved key; implementations ignore it.
    fn deserialize(fields: &Fields) -> Result<Self, ReconstructionError>;

    /// Wrap `self` as a configuration value.
    fn to_value(&self) -> ConfigValue {
        ConfigValue::Polymorphic(PolymorphicObject::new(Self::ALIAS, self.serialize()))
    }

    /// Recover the typed object from a decoded value.
    fn from_value(value: &ConfigValue) -> Result<Self, ReconstructionError> {
        match value {
            ConfigValue::Polymorphic(obj) if obj.alias == Self::ALIAS => {
                Self::deserialize(&obj.fields)
            }
            ConfigValue::Polymorphic(obj) => Err(ReconstructionError::new(format!(
                "expected object of type '{}', found '{}'",
                Self::ALIAS,
                obj.alias
            ))),
            other => Err(ReconstructionError::new(format!(
                "expected object of type '{}', found {}",
                Self::ALIAS,
                other.kind()
            ))),
        }
    }
}

struct ObjectType {
    serialize: Box<SerializeFn>,
    reconstruct: Box<ReconstructFn>,
}

/// Alias → (serialize, reconstruct) table injected into the codec.
#[derive(Default)]
pub struct Registry {
    types: HashMap<String, ObjectType>,
}

impl Registry {
    /// An empty registry. Every polymorphic object will fail to decode.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the bundled object types (currently [`Vector`]).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register::<Vector>();
        registry
    }

    /// Register a typed object. Reconstruction round-trips through `T`, so field
    /// sets `T` cannot represent are rejected and accepted ones are normalized.
    pub fn register<T: ConfigSerializable + 'static>(&mut self) -> &mut Self {
        self.register_fn(
            T::ALIAS,
            |obj| {
                T::deserialize(&obj.fields)
                    .map(|typed| typed.serialize())
                    .map_err(|e| e.message)
            },
            |fields| T::deserialize(fields).map(|typed| typed.serialize()),
        )
    }

    /// Register an alias with explicit closures.
    ///
    /// `reconstruct` receives the full decoded field map including the reserved key and
    /// returns the object's fields (without it). Registering an alias twice replaces the
    /// earlier entry.
    pub fn register_fn<S, R>(&mut self, alias: &str, serialize: S, reconstruct: R) -> &mut Self
    where
        S: Fn(&PolymorphicObject) -> Result<Fields, String> + Send + Sync + 'static,
        R: Fn(&Fields) -> Result<Fields, ReconstructionError> + Send + Sync + 'static,
    {
        debug!(alias, "registering object type");
        self.types.insert(
            alias.to_string(),
            ObjectType {
                serialize: Box::new(serialize),
                reconstruct: Box::new(reconstruct),
            },
        );
        self
    }

    /// Register an alias that accepts any field set unchanged.
    pub fn register_passthrough(&mut self, alias: &str) -> &mut Self {
        self.register_fn(
            alias,
            |obj| Ok(obj.fields.clone()),
            |fields| {
                Ok(fields
                    .iter()
                    .filter(|(key, _)| key.as_str() != TYPE_KEY)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect())
            },
        )
    }

    pub fn is_registered(&self, alias: &str) -> bool {
        self.types.contains_key(alias)
    }

    /// Registered aliases, sorted.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<&str> = self.types.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    /// The alias written for `obj`.
    pub fn alias_for<'a>(&self, obj: &'a PolymorphicObject) -> &'a str {
        &obj.alias
    }

    /// Produce the field map written for `obj`.
    ///
    /// Unregistered aliases are written from the object's own fields; only decoding
    /// requires registration.
    pub fn serialize(&self, obj: &PolymorphicObject) -> Result<Fields, EncodeError> {
        match self.types.get(&obj.alias) {
            Some(ty) => (ty.serialize)(obj).map_err(|message| EncodeError::Serialization {
                alias: obj.alias.clone(),
                message,
            }),
            None => Ok(obj.fields.clone()),
        }
    }

    /// Rebuild an object from a decoded field map carrying the reserved alias entry.
    pub fn reconstruct(&self, fields: &Fields) -> Result<PolymorphicObject, DecodeError> {
        let alias = match fields.get(TYPE_KEY) {
            Some(ConfigValue::Text(alias)) => alias,
            Some(other) => {
                return Err(DecodeError::UnexpectedNode {
                    expected: "string type alias",
                    found: other.kind(),
                })
            }
            None => {
                return Err(DecodeError::Reconstruction {
                    alias: String::new(),
                    source: ReconstructionError::missing_field(TYPE_KEY, "a type alias"),
                })
            }
        };
        let ty = self
            .types
            .get(alias)
            .ok_or_else(|| DecodeError::UnregisteredAlias(alias.clone()))?;
        trace!(alias = alias.as_str(), fields = fields.len(), "reconstructing object");
        let object_fields = (ty.reconstruct)(fields).map_err(|source| DecodeError::Reconstruction {
            alias: alias.clone(),
            source,
        })?;
        Ok(PolymorphicObject::new(alias.clone(), object_fields))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("aliases", &self.aliases())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn unregistered_alias_serializes_own_fields() {
        let registry = Registry::new();
        let obj = PolymorphicObject::new("Unknown", fields! { "a" => 1 });
        assert_eq!(registry.serialize(&obj).unwrap(), fields! { "a" => 1 });
    }

    #[test]
    fn unregistered_alias_fails_reconstruction() {
        let registry = Registry::new();
        let err = registry
            .reconstruct(&fields! { TYPE_KEY => "Unknown" })
            .unwrap_err();
        assert!(matches!(err, DecodeError::UnregisteredAlias(a) if a == "Unknown"));
    }

    #[test]
    fn passthrough_strips_reserved_key() {
        let mut registry = Registry::new();
        registry.register_passthrough("Any");
        let obj = registry
            .reconstruct(&fields! { TYPE_KEY => "Any", "k" => true })
            .unwrap();
        assert_eq!(obj, PolymorphicObject::new("Any", fields! { "k" => true }));
    }

    #[test]
    fn serializer_failure_names_alias() {
        let mut registry = Registry::new();
        registry.register_fn("Broken", |_| Err("nope".to_string()), |f| Ok(f.clone()));
        let err = registry
            .serialize(&PolymorphicObject::new("Broken", Fields::new()))
            .unwrap_err();
        assert!(matches!(err, EncodeError::Serialization { alias, .. } if alias == "Broken"));
    }

    #[test]
    fn non_text_alias_is_rejected() {
        let registry = Registry::with_builtins();
        let err = registry.reconstruct(&fields! { TYPE_KEY => 3 }).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedNode { found: "int32", .. }));
    }

    #[test]
    fn debug_lists_aliases() {
        let mut registry = Registry::with_builtins();
        registry.register_passthrough("Alpha");
        assert_eq!(
            format!("{registry:?}"),
            r#"Registry { aliases: ["Alpha", "Vector"] }"#
        );
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
        assert_send_sync::<std::sync::Arc<Registry>>();
    }
}
