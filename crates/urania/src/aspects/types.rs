use serde::{Deserialize, Serialize};
use std::fmt;

use crate::zodiac::Body;

/// Deviation under which an aspect counts as exact, in degrees.
pub const EXACT_THRESHOLD: f64 = 0.1;

/// Major aspect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectKind {
    pub const ALL: [AspectKind; 5] = [
        AspectKind::Conjunction,
        AspectKind::Sextile,
        AspectKind::Square,
        AspectKind::Trine,
        AspectKind::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn angle(self) -> f64 {
        match self {
            AspectKind::Conjunction => 0.0,
            AspectKind::Sextile => 60.0,
            AspectKind::Square => 90.0,
            AspectKind::Trine => 120.0,
            AspectKind::Opposition => 180.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An aspect between two bodies. The pair is unordered; `first` is whichever
/// came first in the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AspectRecord {
    pub first: Body,
    pub second: Body,
    pub kind: AspectKind,
    /// Measured angular separation, [0, 180]
    pub separation: f64,
}

impl AspectRecord {
    /// Distance from the exact aspect angle.
    pub fn deviation(&self) -> f64 {
        (self.separation - self.kind.angle()).abs()
    }

    pub fn is_exact(&self) -> bool {
        self.deviation() < EXACT_THRESHOLD
    }

    pub fn involves(&self, body: Body) -> bool {
        self.first == body || self.second == body
    }
}

/// Settings for aspect detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AspectSettings {
    /// Orb for conjunction, square, trine and opposition
    pub orb: f64,
    /// Sextile orb; independent of `orb`
    pub sextile_orb: f64,
    /// Pair bodies with ASC/MC
    pub include_angles: bool,
    /// Also report the ASC-MC pair itself
    pub include_angle_pairs: bool,
}

impl Default for AspectSettings {
    fn default() -> Self {
        Self {
            orb: 8.0,
            sextile_orb: 6.0,
            include_angles: true,
            include_angle_pairs: false,
        }
    }
}

impl AspectSettings {
    /// Default settings with a different main orb.
    pub fn with_orb(orb: f64) -> Self {
        Self {
            orb,
            ..Self::default()
        }
    }

    pub fn orb_for(&self, kind: AspectKind) -> f64 {
        match kind {
            AspectKind::Sextile => self.sextile_orb,
            _ => self.orb,
        }
    }
}
