use crate::angle::circular_distance;
use crate::aspects::types::{AspectKind, AspectRecord, AspectSettings};
use crate::error::{ensure_finite, ChartError, Result};
use crate::placement::BodyPosition;

/// Aspect calculator
#[derive(Debug, Clone, Default)]
pub struct AspectCalculator {
    settings: AspectSettings,
}

impl AspectCalculator {
    /// Validates the orbs once so `detect` cannot fail on them later.
    pub fn new(settings: AspectSettings) -> Result<Self> {
        for (field, orb) in [("orb", settings.orb), ("sextile orb", settings.sextile_orb)] {
            ensure_finite(field, orb)?;
            if orb < 0.0 {
                return Err(ChartError::invalid(field, orb, "must not be negative"));
            }
        }
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AspectSettings {
        &self.settings
    }

    /// Aspects between every unordered pair of distinct bodies.
    pub fn detect(&self, positions: &[BodyPosition]) -> Vec<AspectRecord> {
        let mut records = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let a = &positions[i];
                let b = &positions[j];
                if a.body == b.body || !self.pairs_with(a, b) {
                    continue;
                }
                let separation = circular_distance(a.longitude, b.longitude);
                if let Some(kind) = self.classify(separation) {
                    records.push(AspectRecord {
                        first: a.body,
                        second: b.body,
                        kind,
                        separation,
                    });
                }
            }
        }
        log::debug!(
            "{} aspects among {} positions",
            records.len(),
            positions.len()
        );
        records
    }

    /// Aspect kind for a separation in [0, 180], if any window contains it.
    ///
    /// When windows overlap, the target angle closest to the separation wins.
    pub fn classify(&self, separation: f64) -> Option<AspectKind> {
        AspectKind::ALL
            .iter()
            .copied()
            .map(|kind| (kind, (separation - kind.angle()).abs()))
            .filter(|&(kind, deviation)| deviation <= self.settings.orb_for(kind))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(kind, _)| kind)
    }

    fn pairs_with(&self, a: &BodyPosition, b: &BodyPosition) -> bool {
        match (a.body.is_angle(), b.body.is_angle()) {
            (true, true) => self.settings.include_angle_pairs,
            (false, false) => true,
            _ => self.settings.include_angles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator(orb: f64) -> AspectCalculator {
        AspectCalculator::new(AspectSettings::with_orb(orb)).unwrap()
    }

    #[test]
    fn test_classify_default_windows() {
        let calc = calculator(8.0);
        assert_eq!(calc.classify(3.0), Some(AspectKind::Conjunction));
        assert_eq!(calc.classify(55.0), Some(AspectKind::Sextile));
        assert_eq!(calc.classify(67.0), None);
        assert_eq!(calc.classify(90.0), Some(AspectKind::Square));
        assert_eq!(calc.classify(127.5), Some(AspectKind::Trine));
        assert_eq!(calc.classify(172.0), Some(AspectKind::Opposition));
        assert_eq!(calc.classify(150.0), None);
    }

    #[test]
    fn test_sextile_orb_ignores_main_orb() {
        let calc = calculator(1.0);
        assert_eq!(calc.classify(65.5), Some(AspectKind::Sextile));
        assert_eq!(calc.classify(93.0), None);
    }

    #[test]
    fn test_overlapping_windows_pick_closest_target() {
        // A 20° orb makes the square and trine windows overlap on [100, 110]
        let calc = calculator(20.0);
        assert_eq!(calc.classify(100.0), Some(AspectKind::Square));
        assert_eq!(calc.classify(110.0), Some(AspectKind::Trine));
        assert_eq!(calc.classify(64.0), Some(AspectKind::Sextile));
        assert_eq!(calc.classify(15.0), Some(AspectKind::Conjunction));
    }

    #[test]
    fn test_rejects_negative_orb() {
        assert!(AspectCalculator::new(AspectSettings::with_orb(-1.0)).is_err());
        let settings = AspectSettings {
            sextile_orb: f64::NAN,
            ..AspectSettings::default()
        };
        assert!(AspectCalculator::new(settings).is_err());
    }

    #[test]
    fn test_angle_pair_needs_its_own_flag() {
        let cusps = crate::houses::CuspTable::new(
            crate::houses::HouseMethod::Trisection,
            std::array::from_fn(|i| 180.0 + 30.0 * i as f64),
        )
        .unwrap();
        let angles = crate::placement::place_angles(&cusps).unwrap();

        assert!(AspectCalculator::default().detect(&angles).is_empty());

        let settings = AspectSettings {
            include_angle_pairs: true,
            ..AspectSettings::default()
        };
        let records = AspectCalculator::new(settings).unwrap().detect(&angles);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AspectKind::Square);
        assert!(records[0].involves(crate::zodiac::Body::Ascendant));
        assert!(records[0].involves(crate::zodiac::Body::Midheaven));
    }
}
