//! File-backed JSON configuration.
//!
//! [`JsonConfiguration`] owns a root [`ConfigSection`] and moves it to and from JSON
//! text using the codec in [`encoder`](crate::encoder) and [`decoder`](crate::decoder).
//! Saved documents are pretty-printed, write `null`s, and have no header.

use crate::decoder::decode_root;
use crate::document;
use crate::encoder::encode_to_string_pretty;
use crate::error::Result;
use crate::registry::Registry;
use crate::section::ConfigSection;
use crate::value::ConfigValue;
use std::ops::{Deref, DerefMut};
use std::path::Path;
use tracing::{debug, error};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonConfiguration {
    root: ConfigSection,
}

impl JsonConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a file, logging and returning an empty configuration on failure.
    pub fn load_configuration(path: impl AsRef<Path>, registry: &Registry) -> Self {
        let path = path.as_ref();
        let mut config = Self::new();
        if let Err(e) = config.load(path, registry) {
            error!(path = %path.display(), error = %e, "cannot load configuration");
        }
        config
    }

    /// Replace the contents with the document in `text`.
    pub fn load_from_str(&mut self, text: &str, registry: &Registry) -> Result<()> {
        let node = document::parse(text)?;
        let fields = decode_root(&node, registry)?;
        self.root = ConfigSection::from_fields(fields)?;
        debug!(bytes = text.len(), entries = self.root.len(), "loaded configuration");
        Ok(())
    }

    pub fn save_to_string(&self, registry: &Registry) -> Result<String> {
        let value = ConfigValue::Section(self.root.entries().clone());
        Ok(encode_to_string_pretty(&value, registry)?)
    }

    pub fn load(&mut self, path: impl AsRef<Path>, registry: &Registry) -> Result<()> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.load_from_str(&text, registry)
    }

    /// Write the configuration to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>, registry: &Registry) -> Result<()> {
        let path = path.as_ref();
        let text = self.save_to_string(registry)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &text)?;
        debug!(path = %path.display(), bytes = text.len(), "saved configuration");
        Ok(())
    }

    /// Always empty: JSON has no comment syntax to carry a header.
    pub fn build_header(&self) -> String {
        String::new()
    }

    pub fn into_section(self) -> ConfigSection {
        self.root
    }
}

impl From<ConfigSection> for JsonConfiguration {
    fn from(root: ConfigSection) -> Self {
        Self { root }
    }
}

impl Deref for JsonConfiguration {
    type Target = ConfigSection;

    fn deref(&self) -> &ConfigSection {
        &self.root
    }
}

impl DerefMut for JsonConfiguration {
    fn deref_mut(&mut self) -> &mut ConfigSection {
        &mut self.root
    }
}
