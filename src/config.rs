use crate::core::Result;
use serde::{Deserialize, Serialize};

/// Behaviour switches for a [`DynamicRecord`](crate::DynamicRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Seed the dynamic map with every declared attribute at construction.
    ///
    /// When enabled, `attributes()` is exactly the map's keys and declared
    /// attributes shadow native members of the same name. When disabled,
    /// `attributes()` is the declared names followed by the dynamic-only ones.
    pub seed_declared: bool,

    /// Coerce raw row values to the declared tag during standard hydration.
    pub coerce_on_hydrate: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            seed_declared: true,
            coerce_on_hydrate: true,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether declared attributes are seeded into the dynamic map
    pub fn seed_declared(mut self, seed: bool) -> Self {
        self.seed_declared = seed;
        self
    }

    /// Set whether hydration coerces values to declared tags
    pub fn coerce_on_hydrate(mut self, coerce: bool) -> Self {
        self.coerce_on_hydrate = coerce;
        self
    }

    /// Parse from a JSON object. Missing keys keep their defaults.
    ///
    /// ```
    /// # use dynrecord::OverlayConfig;
    /// let config = OverlayConfig::from_json_str(r#"{"seed_declared": false}"#).unwrap();
    /// assert!(!config.seed_declared);
    /// assert!(config.coerce_on_hydrate);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
