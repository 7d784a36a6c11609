//! Engine settings
//!
//! One JSON object with a section per subsystem. Missing sections and fields
//! take their defaults, so older settings files keep loading.

use crate::Result;
use edit_engine::HistoryConfig;
use serde::{Deserialize, Serialize};
use shape_search::{InteractionConfig, SearchConfig};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineSettings {
    /// Spatial index tuning
    pub search: SearchConfig,
    /// Undo/redo recording
    pub history: HistoryConfig,
    /// Handle hit-testing
    pub interaction: InteractionConfig,
}

impl EngineSettings {
    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match Self::parse(json) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
