use serde::{Deserialize, Serialize};

use crate::angle::{circular_distance, normalize};
use crate::error::{ensure_finite, ChartError, Result};

/// Tolerance for the opposite-cusp and full-circle checks.
const CUSP_EPSILON: f64 = 1e-7;

/// How intermediate cusps are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseMethod {
    /// Placidus pole method: each intermediate cusp is the ascendant of a
    /// pole at a fraction of the observer latitude.
    #[default]
    SemiArc,
    /// Equal division of the quadrant arcs between the angles.
    ///
    /// Lower fidelity; only for matching legacy charts.
    Trisection,
}

/// The twelve house cusps, absolute ecliptic longitudes in [0, 360).
///
/// Houses are the arcs `[cusp(n), cusp(n + 1))`, with house 12 ending at
/// cusp 1. Construction guarantees those arcs tile the circle exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCuspTable")]
pub struct CuspTable {
    method: HouseMethod,
    cusps: [f64; 12],
}

/// Unchecked wire form; deserialization goes through [`CuspTable::new`].
#[derive(Deserialize)]
struct RawCuspTable {
    method: HouseMethod,
    cusps: [f64; 12],
}

impl TryFrom<RawCuspTable> for CuspTable {
    type Error = ChartError;

    fn try_from(raw: RawCuspTable) -> Result<Self> {
        Self::new(raw.method, raw.cusps)
    }
}

impl CuspTable {
    /// Validate and wrap a raw cusp array (index 0 is house 1).
    pub fn new(method: HouseMethod, cusps: [f64; 12]) -> Result<Self> {
        let mut normalized = [0.0; 12];
        for (slot, &cusp) in normalized.iter_mut().zip(cusps.iter()) {
            *slot = normalize(ensure_finite("cusp", cusp)?);
        }

        for i in 0..6 {
            let gap = circular_distance(normalized[i], normalized[i + 6]);
            if (gap - 180.0).abs() > CUSP_EPSILON {
                return Err(ChartError::invalid(
                    "cusp",
                    normalized[i + 6],
                    format!("house {} is not opposite house {}", i + 7, i + 1),
                ));
            }
        }

        // Forward arcs must sum to one turn, otherwise cusps are out of order
        let total: f64 = (0..12)
            .map(|i| normalize(normalized[(i + 1) % 12] - normalized[i]))
            .sum();
        if (total - 360.0).abs() > CUSP_EPSILON {
            return Err(ChartError::invalid(
                "cusp",
                total,
                "cusps are not in zodiacal order",
            ));
        }

        Ok(Self {
            method,
            cusps: normalized,
        })
    }

    pub fn method(&self) -> HouseMethod {
        self.method
    }

    /// Longitude of cusp `house` (1-12), `None` outside that range.
    pub fn cusp(&self, house: u8) -> Option<f64> {
        let index = usize::from(house.checked_sub(1)?);
        self.cusps.get(index).copied()
    }

    pub fn cusps(&self) -> &[f64; 12] {
        &self.cusps
    }

    pub fn ascendant(&self) -> f64 {
        self.cusps[0]
    }

    pub fn midheaven(&self) -> f64 {
        self.cusps[9]
    }

    /// `(start, end)` longitudes of a house; `end` is the next cusp.
    pub fn arc(&self, house: u8) -> Option<(f64, f64)> {
        let start = self.cusp(house)?;
        let end = self.cusps[usize::from(house % 12)];
        Some((start, end))
    }

    /// House (1-12) containing `longitude`, using left-closed arcs.
    ///
    /// Arcs that cross 0° Aries use the wrapped test `lon >= start || lon < end`.
    /// A body exactly on a cusp belongs to the house that begins there.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let lon = normalize(longitude);
        for house in 1..=12u8 {
            let start = self.cusps[usize::from(house - 1)];
            let end = self.cusps[usize::from(house % 12)];
            let inside = if start < end {
                start <= lon && lon < end
            } else if start > end {
                lon >= start || lon < end
            } else {
                false
            };
            if inside {
                return house;
            }
        }

        // Only reachable through zero-width arcs; pick the nearest cusp at
        // or before the longitude.
        let house = (1..=12u8)
            .min_by(|&a, &b| {
                let da = normalize(lon - self.cusps[usize::from(a - 1)]);
                let db = normalize(lon - self.cusps[usize::from(b - 1)]);
                da.total_cmp(&db)
            })
            .unwrap_or(1);
        log::warn!(
            "longitude {lon} matched no house arc, assigned to house {house} by cusp start"
        );
        house
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_houses(start: f64) -> CuspTable {
        let mut cusps = [0.0; 12];
        for (i, c) in cusps.iter_mut().enumerate() {
            *c = start + 30.0 * i as f64;
        }
        CuspTable::new(HouseMethod::Trisection, cusps).unwrap()
    }

    #[test]
    fn test_house_of_wrapping_arc() {
        let table = equal_houses(345.0);
        assert_eq!(table.house_of(345.0), 1);
        assert_eq!(table.house_of(359.9), 1);
        assert_eq!(table.house_of(0.0), 1);
        assert_eq!(table.house_of(14.999), 1);
        assert_eq!(table.house_of(15.0), 2);
        assert_eq!(table.house_of(344.9), 12);
    }

    #[test]
    fn test_body_on_cusp_belongs_to_starting_house() {
        let table = equal_houses(0.0);
        for house in 1..=12u8 {
            assert_eq!(table.house_of(table.cusp(house).unwrap()), house);
        }
    }

    #[test]
    fn test_rejects_non_opposite_cusps() {
        let mut cusps = *equal_houses(10.0).cusps();
        cusps[7] += 1.0;
        assert!(matches!(
            CuspTable::new(HouseMethod::SemiArc, cusps),
            Err(ChartError::InvalidInput { field: "cusp", .. })
        ));
    }

    #[test]
    fn test_rejects_out_of_order_cusps() {
        let mut cusps = *equal_houses(0.0).cusps();
        cusps.swap(1, 2);
        cusps.swap(7, 8);
        assert!(CuspTable::new(HouseMethod::SemiArc, cusps).is_err());
    }

    #[test]
    fn test_arc_of_house_twelve_ends_at_ascendant() {
        let table = equal_houses(100.0);
        assert_eq!(table.arc(12), Some((70.0, 100.0)));
        assert_eq!(table.arc(1), Some((100.0, 130.0)));
        assert_eq!(table.ascendant(), 100.0);
        assert_eq!(table.midheaven(), 10.0);
    }

    #[test]
    fn test_out_of_range_house_is_none() {
        let table = equal_houses(0.0);
        assert_eq!(table.cusp(0), None);
        assert_eq!(table.cusp(13), None);
        assert_eq!(table.arc(0), None);
        assert_eq!(table.arc(200), None);
        assert_eq!(table.cusp(12), Some(330.0));
    }

    #[test]
    fn test_deserialize_validates_cusps() {
        let table = equal_houses(15.0);
        let json = serde_json::to_string(&table).unwrap();
        let back: CuspTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);

        let out_of_order = r#"{"method":"semi-arc","cusps":[0,10,20,30,40,50,60,70,80,90,100,500]}"#;
        assert!(serde_json::from_str::<CuspTable>(out_of_order).is_err());

        let not_opposite = r#"{"method":"trisection","cusps":[0,30,60,90,120,150,181,210,240,270,300,330]}"#;
        assert!(serde_json::from_str::<CuspTable>(not_opposite).is_err());
    }
}
