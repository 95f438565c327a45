use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How methods sharing a canonical signature within one type are named.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictNumbering {
    /// Every member of a colliding group is suffixed with its arrival index,
    /// the first one included (`bar().conflicted0`, `bar().conflicted1`).
    /// The group is renumbered on every new arrival.
    #[default]
    Renumber,
    /// The first arrival keeps the bare signature; later arrivals are
    /// suffixed with their arrival index, so assigned names never change.
    Stable,
}

/// Configuration for declaration mapping.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// Naming policy for overloads with identical signatures.
    pub conflict_numbering: ConflictNumbering,
    /// When `true`, every type gets a `[CS]` tree even without constructors.
    /// Fields never get an empty `[FE]` tree.
    pub always_emit_constructors: bool,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            conflict_numbering: ConflictNumbering::Renumber,
            always_emit_constructors: true,
        }
    }
}

impl MapperConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
