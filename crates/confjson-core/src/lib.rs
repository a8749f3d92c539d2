//! # confjson-core
//!
//! JSON codec for hierarchical configuration values.
//!
//! A configuration tree holds booleans, text, three distinct numeric widths
//! (`i32`, `i64`, `f64`), ordered lists, ordered maps, nested sections, and
//! *polymorphic objects*: values of a registered type, written as a JSON object
//! whose first key `"=="` names the type. Encoding and decoding round-trip all of
//! these without schema information: numeric width is recovered from the literal
//! text, and object identity from the type alias.
//!
//! ## Quick start
//!
//! ```rust
//! use confjson_core::{decode_str, encode_to_string, fields, ConfigSerializable, ConfigValue, Registry, Vector};
//!
//! let registry = Registry::with_builtins();
//! let value = ConfigValue::Mapping(fields! {
//!     "name" => "Arrow",
//!     "count" => 10,
//!     "active" => true,
//!     "pos" => Vector::new(1.0, 2.0, 3.0).to_value(),
//! });
//!
//! let json = encode_to_string(&value, &registry).unwrap();
//! assert_eq!(
//!     json,
//!     r#"{"name":"Arrow","count":10,"active":true,"pos":{"==":"Vector","x":1.0,"y":2.0,"z":3.0}}"#
//! );
//! assert_eq!(decode_str(&json, &registry).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `ConfigValue` model and the reserved `"=="` key
//! - [`numeric`]: literal formatting and the int32/int64/float64 width policy
//! - [`encoder`]: `ConfigValue` → JSON document
//! - [`decoder`]: JSON document → `ConfigValue`
//! - [`registry`]: alias → (serialize, reconstruct) table for polymorphic objects
//! - [`document`]: JSON text transport
//! - [`section`]: dotted-path section tree and tree assembly
//! - [`configuration`]: file-backed `JsonConfiguration`
//! - [`error`]: error types

pub mod configuration;
pub mod decoder;
pub mod document;
pub mod encoder;
pub mod error;
pub mod numeric;
pub mod registry;
pub mod section;
pub mod value;
pub mod vector;

pub use configuration::JsonConfiguration;
pub use decoder::{decode, decode_root, decode_str};
pub use document::DocumentNode;
pub use encoder::{encode, encode_to_string, encode_to_string_pretty};
pub use error::{ConfigError, DecodeError, EncodeError, ReconstructionError};
pub use registry::{ConfigSerializable, Registry};
pub use section::ConfigSection;
pub use value::{ConfigValue, Fields, PolymorphicObject, TYPE_KEY};
pub use vector::Vector;
