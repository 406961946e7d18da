//! Pipeline configuration, loadable from TOML.
//!
//! ```text
//! backend = "mathml"
//! sentinel = "No mathematical content detected."
//! parallel = false
//!
//! [scan]
//! skip_escaped_dollars = false
//! ```

use crate::assemble::NO_MATH_SENTINEL;
use crate::error::{ConfigError, Result};
use crate::render::{create_renderer, MathBackend, MathRenderer};
use crate::scanner::ScanConfig;
use serde::Deserialize;
use std::path::Path;

/// Configuration for extraction.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Renderer backend used by [`crate::extract_mathml`].
    pub backend: MathBackend,
    /// Output returned when no span could be normalized.
    pub sentinel: String,
    /// Normalize spans on worker threads (output order is unaffected).
    pub parallel: bool,
    /// Scanner options.
    pub scan: ScanConfig,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            backend: MathBackend::default(),
            sentinel: NO_MATH_SENTINEL.to_string(),
            parallel: false,
            scan: ScanConfig::default(),
        }
    }
}

impl ExtractConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if self.sentinel.is_empty() {
            return Err(ConfigError::EmptySentinel.into());
        }
        Ok(())
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Build the configured renderer.
    pub fn renderer(&self) -> Result<Box<dyn MathRenderer>> {
        create_renderer(self.backend)
    }
}
