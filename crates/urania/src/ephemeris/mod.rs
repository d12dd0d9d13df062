pub mod oracle;
pub mod table;
pub mod types;

pub use oracle::{julian_day, Ephemeris, OBLIQUITY_J2000_DEG};
pub use table::TableEphemeris;
pub use types::{GeoLocation, Instant, ObliquityModel};
