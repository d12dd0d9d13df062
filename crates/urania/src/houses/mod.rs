pub mod placidus;
pub mod types;

pub use placidus::{ascendant, compute_cusps, house_cusps, midheaven};
pub use types::{CuspTable, HouseMethod};
