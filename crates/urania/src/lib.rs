//! Natal and transit chart computation.
//!
//! Given sidereal time, obliquity and latitude this crate derives Placidus
//! house cusps, places bodies into signs and houses, finds aspects between
//! them, and compares slow bodies at the ends of a forecast window against a
//! natal chart. Body longitudes come from an external [`Ephemeris`].

pub mod angle;
pub mod aspects;
pub mod chart;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod placement;
pub mod transit;
pub mod zodiac;

pub use angle::{circular_distance, degrees_to_dm, normalize, DegreeMinute};
pub use aspects::{AspectCalculator, AspectKind, AspectRecord, AspectSettings};
pub use chart::{compute_cusps, compute_transits, detect_aspects, place_bodies, NatalChart};
pub use config::ChartConfig;
pub use ephemeris::{Ephemeris, GeoLocation, Instant, ObliquityModel, TableEphemeris};
pub use error::{ChartError, Result};
pub use houses::{CuspTable, HouseMethod};
pub use placement::{place, BodyPosition};
pub use transit::{ContactEndpoint, NatalContact, TransitComparator, TransitEvent};
pub use zodiac::{Body, Element, Sign};
