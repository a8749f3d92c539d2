//! Configuration sections and tree assembly.
//!
//! A [`ConfigSection`] is an ordered set of entries addressed by dotted paths
//! (`"server.limits.max"`). Nested sections are stored as [`ConfigValue::Section`]
//! entries, so a whole section flattens into a single value without copying keys
//! around.

use crate::error::{ConfigError, Result};
use crate::registry::ConfigSerializable;
use crate::value::{ConfigValue, Fields};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSection {
    entries: Fields,
}

impl ConfigSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a section tree from decoded entries: mapping values become nested
    /// sections, everything else is set directly. Keys are treated as paths.
    pub fn from_fields(fields: Fields) -> Result<Self> {
        let mut section = Self::new();
        section.merge(fields)?;
        Ok(section)
    }

    fn merge(&mut self, fields: Fields) -> Result<()> {
        for (key, value) in fields {
            match value {
                ConfigValue::Mapping(nested) | ConfigValue::Section(nested) => {
                    self.create_section(&key, nested)?
                }
                other => self.set(&key, other)?,
            }
        }
        Ok(())
    }

    /// Direct entries of this section, in insertion order.
    pub fn entries(&self) -> &Fields {
        &self.entries
    }

    pub fn into_fields(self) -> Fields {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order. With `deep`, nested sections contribute their full
    /// dotted paths after the section's own key.
    pub fn keys(&self, deep: bool) -> Vec<String> {
        let mut out = Vec::new();
        collect_keys(&self.entries, "", deep, &mut out);
        out
    }

    pub fn get(&self, path: &str) -> Option<&ConfigValue> {
        let segments = split_path(path).ok()?;
        let (leaf, parents) = segments.split_last()?;
        let mut current = &self.entries;
        for segment in parents {
            match current.get(*segment)? {
                ConfigValue::Section(child) => current = child,
                _ => return None,
            }
        }
        current.get(*leaf)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Set the value at `path`, creating intermediate sections as needed. An
    /// intermediate entry that is not a section is replaced by one. Setting
    /// [`ConfigValue::Null`] removes the entry.
    pub fn set(&mut self, path: &str, value: impl Into<ConfigValue>) -> Result<()> {
        let value = value.into();
        let segments = split_path(path)?;
        if value.is_null() {
            self.remove(path);
            return Ok(());
        }
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(ConfigError::InvalidPath(path.to_string()));
        };
        insert_at(&mut self.entries, parents, leaf, value);
        Ok(())
    }

    /// Remove and return the entry at `path`. Remaining entries keep their order.
    pub fn remove(&mut self, path: &str) -> Option<ConfigValue> {
        let segments = split_path(path).ok()?;
        let (leaf, parents) = segments.split_last()?;
        let mut current = &mut self.entries;
        for segment in parents {
            match current.get_mut(*segment)? {
                ConfigValue::Section(child) => current = child,
                _ => return None,
            }
        }
        current.shift_remove(*leaf)
    }

    /// Create a section at `path` from `fields`, turning nested mappings into sections.
    pub fn create_section(&mut self, path: &str, fields: Fields) -> Result<()> {
        let section = Self::from_fields(fields)?;
        self.set(path, ConfigValue::from(section))
    }

    /// Entries of the section at `path`, if that path holds a section.
    pub fn get_section(&self, path: &str) -> Option<&Fields> {
        match self.get(path)? {
            ConfigValue::Section(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(ConfigValue::as_bool)
    }

    pub fn get_i32(&self, path: &str) -> Option<i32> {
        self.get(path).and_then(ConfigValue::as_i32)
    }

    pub fn get_i64(&self, path: &str) -> Option<i64> {
        self.get(path).and_then(ConfigValue::as_i64)
    }

    pub fn get_f64(&self, path: &str) -> Option<f64> {
        self.get(path).and_then(ConfigValue::as_f64)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(ConfigValue::as_str)
    }

    /// Typed view of a polymorphic entry. `None` if absent or of another type.
    pub fn get_object<T: ConfigSerializable>(&self, path: &str) -> Option<T> {
        self.get(path).and_then(|value| T::from_value(value).ok())
    }
}

impl From<ConfigSection> for ConfigValue {
    fn from(section: ConfigSection) -> Self {
        ConfigValue::Section(section.entries)
    }
}

fn split_path(path: &str) -> Result<Vec<&str>> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ConfigError::InvalidPath(path.to_string()));
    }
    Ok(segments)
}

/// Walk `parents`, turning each into a section if it is not one, and insert at `leaf`.
fn insert_at(fields: &mut Fields, parents: &[&str], leaf: &str, value: ConfigValue) {
    let Some((head, rest)) = parents.split_first() else {
        fields.insert(leaf.to_string(), value);
        return;
    };
    let slot = fields
        .entry(head.to_string())
        .or_insert_with(|| ConfigValue::Section(Fields::new()));
    if !matches!(slot, ConfigValue::Section(_)) {
        *slot = ConfigValue::Section(Fields::new());
    }
    if let ConfigValue::Section(child) = slot {
        insert_at(child, rest, leaf, value);
    }
}

fn collect_keys(fields: &Fields, prefix: &str, deep: bool, out: &mut Vec<String>) {
    for (key, value) in fields {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{PATH_SEPARATOR}{key}")
        };
        out.push(path.clone());
        if deep {
            if let ConfigValue::Section(child) = value {
                collect_keys(child, &path, deep, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields;

    #[test]
    fn set_creates_intermediate_sections() {
        let mut root = ConfigSection::new();
        root.set("Map.ItemOne", "myTestString").unwrap();
        root.set("Map.ItemTwo", 10).unwrap();
        assert_eq!(root.get_str("Map.ItemOne"), Some("myTestString"));
        assert_eq!(root.get_i32("Map.ItemTwo"), Some(10));
        assert_eq!(
            root.get_section("Map"),
            Some(&fields! { "ItemOne" => "myTestString", "ItemTwo" => 10 })
        );
    }

    #[test]
    fn set_null_removes_entry_and_keeps_order() {
        let mut root = ConfigSection::new();
        root.set("a", 1).unwrap();
        root.set("b", 2).unwrap();
        root.set("c", 3).unwrap();
        root.set("b", ConfigValue::Null).unwrap();
        assert_eq!(root.keys(false), ["a", "c"]);
    }

    #[test]
    fn set_replaces_non_section_parent() {
        let mut root = ConfigSection::new();
        root.set("a", 1).unwrap();
        root.set("a.b", true).unwrap();
        assert_eq!(root.get_bool("a.b"), Some(true));
    }

    #[test]
    fn set_through_nested_parents_keeps_siblings() {
        let mut root = ConfigSection::new();
        root.set("a.x", 1).unwrap();
        root.set("a.b", "leaf").unwrap();
        root.set("a.b.c.d", 2.5).unwrap();
        assert_eq!(root.get_i32("a.x"), Some(1));
        assert_eq!(root.get_f64("a.b.c.d"), Some(2.5));
        assert_eq!(root.keys(true), ["a", "a.x", "a.b", "a.b.c", "a.b.c.d"]);
    }

    #[test]
    fn empty_segments_are_invalid() {
        let mut root = ConfigSection::new();
        for path in ["", "a..b", ".a", "a."] {
            assert!(matches!(
                root.set(path, 1),
                Err(ConfigError::InvalidPath(_))
            ));
        }
    }

    #[test]
    fn deep_keys_list_full_paths() {
        let root = ConfigSection::from_fields(fields! {
            "name" => "x",
            "server" => ConfigValue::Mapping(fields! {
                "port" => 8080,
                "tls" => ConfigValue::Mapping(fields! { "enabled" => false }),
            }),
        })
        .unwrap();
        assert_eq!(root.keys(false), ["name", "server"]);
        assert_eq!(
            root.keys(true),
            ["name", "server", "server.port", "server.tls", "server.tls.enabled"]
        );
    }

    #[test]
    fn mappings_inside_sequences_stay_mappings() {
        let inner = ConfigValue::Mapping(fields! { "k" => 1 });
        let root = ConfigSection::from_fields(fields! {
            "list" => ConfigValue::Sequence(vec![inner.clone()]),
        })
        .unwrap();
        assert_eq!(root.get("list"), Some(&ConfigValue::Sequence(vec![inner])));
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut root = ConfigSection::new();
        root.set("a.b", 5_i64).unwrap();
        assert_eq!(root.remove("a.b"), Some(ConfigValue::Integer64(5)));
        assert!(!root.contains("a.b"));
        assert!(root.contains("a"));
    }
}
