//! The dynamic configuration value model.
//!
//! [`ConfigValue`] keeps the three numeric widths apart (`Integer32`, `Integer64`,
//! `Float64`) because the width of a stored number is part of its meaning for the
//! host: a value read back as a 64-bit integer is not the same setting as one read
//! back as a 32-bit integer. Ordered maps use `IndexMap` so that entries are written
//! in the order they were inserted.

use indexmap::IndexMap;

/// Reserved document key marking an object as a polymorphic value. Its value is the type alias.
pub const TYPE_KEY: &str = "==";

/// Ordered name → value entries. Keys are unique; iteration follows insertion order.
pub type Fields = IndexMap<String, ConfigValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Boolean(bool),
    Integer32(i32),
    Integer64(i64),
    Float64(f64),
    Text(String),
    Sequence(Vec<ConfigValue>),
    Mapping(Fields),
    /// A nested configuration node. Encodes exactly like `Mapping`.
    Section(Fields),
    Polymorphic(PolymorphicObject),
}

/// A registry-backed object: a type alias plus the fields its type serializes to.
///
/// `fields` never holds [`TYPE_KEY`]; the alias lives in `alias` only.
#[derive(Debug, Clone, PartialEq)]
pub struct PolymorphicObject {
    pub alias: String,
    pub fields: Fields,
}

impl PolymorphicObject {
    pub fn new(alias: impl Into<String>, fields: Fields) -> Self {
        Self {
            alias: alias.into(),
            fields,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.fields.get(key)
    }
}

impl ConfigValue {
    /// Short lowercase name of the value's kind, used by diagnostics and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::Integer32(_) => "int32",
            ConfigValue::Integer64(_) => "int64",
            ConfigValue::Float64(_) => "float64",
            ConfigValue::Text(_) => "text",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
            ConfigValue::Section(_) => "section",
            ConfigValue::Polymorphic(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view. `Integer32` and `Integer64` both qualify; floats do not.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer32(n) => Some(i64::from(*n)),
            ConfigValue::Integer64(n) => Some(*n),
            _ => None,
        }
    }

    /// Narrowing integer view; `Integer64` values outside the `i32` range yield `None`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConfigValue::Integer32(n) => Some(*n),
            ConfigValue::Integer64(n) => i32::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Numeric view accepting any of the three widths.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer32(n) => Some(f64::from(*n)),
            ConfigValue::Integer64(n) => Some(*n as f64),
            ConfigValue::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Entries of a `Mapping` or a `Section`.
    pub fn as_fields(&self) -> Option<&Fields> {
        match self {
            ConfigValue::Mapping(fields) | ConfigValue::Section(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&PolymorphicObject> {
        match self {
            ConfigValue::Polymorphic(obj) => Some(obj),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Boolean(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer32(n)
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer64(n)
    }
}

impl From<f64> for ConfigValue {
    fn from(f: f64) -> Self {
        ConfigValue::Float64(f)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Text(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Text(s)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Sequence(items)
    }
}

impl From<PolymorphicObject> for ConfigValue {
    fn from(obj: PolymorphicObject) -> Self {
        ConfigValue::Polymorphic(obj)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(ConfigValue::Null, Into::into)
    }
}

/// Build an ordered [`Fields`] map from `key => value` pairs.
///
/// ```
/// use confjson_core::{fields, ConfigValue};
/// let f = fields! { "a" => 1, "b" => "two" };
/// assert_eq!(f.get_index(1).map(|(k, _)| k.as_str()), Some("b"));
/// assert_eq!(f["a"], ConfigValue::Integer32(1));
/// ```
#[macro_export]
macro_rules! fields {
    () => { $crate::Fields::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Fields::new();
        $( map.insert(::std::string::String::from($key), $crate::ConfigValue::from($value)); )+
        map
    }};
}
