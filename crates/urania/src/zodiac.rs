//! Zodiac signs and chart bodies.
//!
//! Signs carry their element and rulers the way the western tradition
//! assigns them; bodies cover the ten classical/modern planets plus the two
//! chart angles that are placed alongside them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::angle::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

// (sign, name, glyph, element, traditional ruler, modern ruler)
const SIGN_TABLE: [(Sign, &str, &str, Element, Body, Body); 12] = [
    (Sign::Aries, "Aries", "♈", Element::Fire, Body::Mars, Body::Mars),
    (Sign::Taurus, "Taurus", "♉", Element::Earth, Body::Venus, Body::Venus),
    (Sign::Gemini, "Gemini", "♊", Element::Air, Body::Mercury, Body::Mercury),
    (Sign::Cancer, "Cancer", "♋", Element::Water, Body::Moon, Body::Moon),
    (Sign::Leo, "Leo", "♌", Element::Fire, Body::Sun, Body::Sun),
    (Sign::Virgo, "Virgo", "♍", Element::Earth, Body::Mercury, Body::Mercury),
    (Sign::Libra, "Libra", "♎", Element::Air, Body::Venus, Body::Venus),
    (Sign::Scorpio, "Scorpio", "♏", Element::Water, Body::Mars, Body::Pluto),
    (Sign::Sagittarius, "Sagittarius", "♐", Element::Fire, Body::Jupiter, Body::Jupiter),
    (Sign::Capricorn, "Capricorn", "♑", Element::Earth, Body::Saturn, Body::Saturn),
    (Sign::Aquarius, "Aquarius", "♒", Element::Air, Body::Saturn, Body::Uranus),
    (Sign::Pisces, "Pisces", "♓", Element::Water, Body::Jupiter, Body::Neptune),
];

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Zero-based index, Aries = 0.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign for any index; wraps modulo 12.
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Sign containing an ecliptic longitude (any real value).
    pub fn from_longitude(longitude: f64) -> Sign {
        Self::from_index((normalize(longitude) / 30.0).floor() as usize)
    }

    pub fn name(self) -> &'static str {
        SIGN_TABLE[self.index()].1
    }

    pub fn glyph(self) -> &'static str {
        SIGN_TABLE[self.index()].2
    }

    pub fn element(self) -> Element {
        SIGN_TABLE[self.index()].3
    }

    /// Planetary ruler; `modern` swaps in the outer-planet rulerships of
    /// Scorpio, Aquarius and Pisces.
    pub fn ruler(self, modern: bool) -> Body {
        let entry = &SIGN_TABLE[self.index()];
        if modern {
            entry.5
        } else {
            entry.4
        }
    }

    /// Longitude at which this sign begins.
    pub fn start_longitude(self) -> f64 {
        self.index() as f64 * 30.0
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A placeable chart point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    #[serde(rename = "asc")]
    Ascendant,
    #[serde(rename = "mc")]
    Midheaven,
}

impl Body {
    /// Bodies placed in every natal chart, in traditional order.
    pub const NATAL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Slow movers whose sign changes are worth reporting over a forecast window.
    pub const SLOW_MOVING: [Body; 5] = [
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// ASC and MC are angles of the house frame, not bodies with an ephemeris.
    pub fn is_angle(self) -> bool {
        matches!(self, Body::Ascendant | Body::Midheaven)
    }

    /// Identifier used in config files and serialized output.
    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
            Body::Ascendant => "asc",
            Body::Midheaven => "mc",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
            Body::Ascendant => "Ascendant",
            Body::Midheaven => "Midheaven",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Body::Sun => "☉",
            Body::Moon => "☽",
            Body::Mercury => "☿",
            Body::Venus => "♀",
            Body::Mars => "♂",
            Body::Jupiter => "♃",
            Body::Saturn => "♄",
            Body::Uranus => "♅",
            Body::Neptune => "♆",
            Body::Pluto => "♇",
            Body::Ascendant => "ASC",
            Body::Midheaven => "MC",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBody(pub String);

impl fmt::Display for UnknownBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown body: {}", self.0)
    }
}

impl std::error::Error for UnknownBody {}

impl FromStr for Body {
    type Err = UnknownBody;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let body = match lower.as_str() {
            "ascendant" => Body::Ascendant,
            "midheaven" => Body::Midheaven,
            other => Body::NATAL
                .iter()
                .chain([Body::Ascendant, Body::Midheaven].iter())
                .copied()
                .find(|b| b.id() == other)
                .ok_or_else(|| UnknownBody(s.to_string()))?,
        };
        Ok(body)
    }
}
