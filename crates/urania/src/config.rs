//! Chart configuration, loadable from TOML.
//!
//! ```toml
//! [houses]
//! method = "semi-arc"      # or "trisection"
//! obliquity = "of-date"    # or "j2000"
//!
//! [aspects]
//! orb = 8.0
//! sextile_orb = 6.0
//! include_angles = true
//! include_angle_pairs = false
//!
//! [transits]
//! contact_orb = 4.0
//! bodies = ["jupiter", "saturn", "uranus", "neptune", "pluto"]
//! ```
//!
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::aspects::AspectSettings;
use crate::ephemeris::ObliquityModel;
use crate::houses::HouseMethod;
use crate::zodiac::Body;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseSettings {
    pub method: HouseMethod,
    pub obliquity: ObliquityModel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitSettings {
    pub contact_orb: f64,
    pub bodies: Vec<Body>,
}

impl Default for TransitSettings {
    fn default() -> Self {
        Self {
            contact_orb: 4.0,
            bodies: Body::SLOW_MOVING.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub houses: HouseSettings,
    pub aspects: AspectSettings,
    pub transits: TransitSettings,
}

impl ChartConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: ChartConfig = toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse chart config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read chart config {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let orbs = [
            ("aspects.orb", self.aspects.orb),
            ("aspects.sextile_orb", self.aspects.sextile_orb),
            ("transits.contact_orb", self.transits.contact_orb),
        ];
        for (key, orb) in orbs {
            if !orb.is_finite() || orb < 0.0 {
                anyhow::bail!("{key} must be a non-negative number, got {orb}");
            }
        }
        if self.transits.bodies.is_empty() {
            anyhow::bail!("transits.bodies must name at least one body");
        }
        if let Some(angle) = self.transits.bodies.iter().find(|b| b.is_angle()) {
            anyhow::bail!("transits.bodies cannot include the chart angle {angle}");
        }
        Ok(())
    }
}
