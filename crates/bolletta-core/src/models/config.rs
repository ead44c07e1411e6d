//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{BollettaError, Result};

/// Main configuration for the bolletta pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BollettaConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Extraction pipeline configuration.
///
/// Pattern tables, validation gates and score weights are part of the
/// pipeline contract and are not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Enable the ENEL literal-fallback tier (known-sample matches).
    pub literal_fallbacks: bool,

    /// Require exactly 14 digits for the PDR on the ENEL path, instead of
    /// the generic 8-14 digit rule.
    pub strict_enel_pdr: bool,

    /// Characters of raw text echoed back in the result preview.
    pub preview_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            literal_fallbacks: true,
            strict_enel_pdr: true,
            preview_chars: 200,
        }
    }
}

impl BollettaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| BollettaError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| BollettaError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
