//! Color ramp styles described in JSON.
//!
//! ```json
//! {
//!   "version": "1",
//!   "ramps": {
//!     "elevation": {
//!       "name": "Elevation",
//!       "default": true,
//!       "colors": ["#004080", "#008080", "#00A040"]
//!     }
//!   }
//! }
//! ```
//!
//! Colors are listed low to high. Reading the document from disk is left to
//! the host.

use crate::ramp::ColorRamp;
use relief_common::{ReliefError, ReliefResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ramp configuration loaded from JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RampConfig {
    pub version: String,
    pub ramps: HashMap<String, RampDefinition>,
}

/// A single named ramp
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RampDefinition {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub default: bool,
    pub colors: Vec<String>,
}

impl RampConfig {
    /// Parse a ramp document.
    pub fn from_json(json_str: &str) -> ReliefResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Get a specific ramp definition
    pub fn get_ramp(&self, key: &str) -> Option<&RampDefinition> {
        self.ramps.get(key)
    }

    /// Build the ramp stored under `key`.
    pub fn build_ramp(&self, key: &str) -> ReliefResult<ColorRamp> {
        self.get_ramp(key)
            .ok_or_else(|| ReliefError::StyleNotFound(key.to_string()))?
            .to_color_ramp()
    }

    /// Build the ramp marked `default`, or the only ramp in the document.
    ///
    /// More than one ramp marked `default` is ambiguous and rejected.
    pub fn default_ramp(&self) -> ReliefResult<ColorRamp> {
        let mut flagged: Vec<&String> = self
            .ramps
            .iter()
            .filter(|(_, r)| r.default)
            .map(|(key, _)| key)
            .collect();
        match flagged.len() {
            0 => {}
            1 => return self.build_ramp(flagged[0]),
            _ => {
                flagged.sort();
                return Err(ReliefError::Config(format!(
                    "several ramps are marked default: {:?}",
                    flagged
                )));
            }
        }
        match self.ramps.len() {
            1 => self
                .ramps
                .values()
                .next()
                .ok_or_else(|| ReliefError::StyleNotFound("default".to_string()))?
                .to_color_ramp(),
            0 => Err(ReliefError::StyleNotFound("default".to_string())),
            n => Err(ReliefError::Config(format!(
                "{} ramps defined and none is marked default",
                n
            ))),
        }
    }
}

impl RampDefinition {
    /// Parse the hex colors into a ramp.
    pub fn to_color_ramp(&self) -> ReliefResult<ColorRamp> {
        let colors = self
            .colors
            .iter()
            .map(|hex| {
                hex_to_rgb(hex).map(|(r, g, b)| [r, g, b]).ok_or_else(|| {
                    ReliefError::invalid_ramp(format!("'{}': bad color '{}'", self.name, hex))
                })
            })
            .collect::<ReliefResult<Vec<_>>>()?;

        ColorRamp::new(colors)
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}
