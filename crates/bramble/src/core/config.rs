use serde::Deserialize;

use crate::error::Result;

/// Settings for a [`Canvas`](crate::Canvas).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Root width.
    pub width: i32,
    /// Root height.
    pub height: i32,
    /// Check tree invariants after every frame.
    pub validate_tree: bool,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            validate_tree: cfg!(debug_assertions),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
