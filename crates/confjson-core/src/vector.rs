//! Bundled `Vector` object type: a 3D double-precision vector.

use crate::error::ReconstructionError;
use crate::registry::ConfigSerializable;
use crate::value::{ConfigValue, Fields};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl ConfigSerializable for Vector {
    const ALIAS: &'static str = "Vector";

    fn serialize(&self) -> Fields {
        let mut fields = Fields::with_capacity(3);
        fields.insert("x".to_string(), ConfigValue::Float64(self.x));
        fields.insert("y".to_string(), ConfigValue::Float64(self.y));
        fields.insert("z".to_string(), ConfigValue::Float64(self.z));
        fields
    }

    /// Missing components default to zero; present ones may be any numeric width.
    fn deserialize(fields: &Fields) -> Result<Self, ReconstructionError> {
        let component = |name: &str| match fields.get(name) {
            None => Ok(0.0),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| ReconstructionError::missing_field(name, "a number")),
        };
        Ok(Self {
            x: component("x")?,
            y: component("y")?,
            z: component("z")?,
        })
    }
}
