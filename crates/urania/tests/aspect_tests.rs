use urania::aspects::{AspectCalculator, AspectKind, AspectSettings};
use urania::{detect_aspects, Body, BodyPosition, Sign};

fn at(body: Body, longitude: f64) -> BodyPosition {
    let sign = Sign::from_longitude(longitude);
    BodyPosition {
        body,
        longitude,
        sign,
        sign_degree: longitude - sign.start_longitude(),
        house: 1,
    }
}

#[test]
fn test_square_at_ninety_degrees() {
    let positions = [at(Body::Sun, 10.0), at(Body::Moon, 100.0)];
    let aspects = detect_aspects(&positions, &AspectSettings::default()).unwrap();

    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].kind, AspectKind::Square);
    assert_eq!(aspects[0].separation, 90.0);
    assert!(aspects[0].is_exact());
}

#[test]
fn test_conjunction_across_zero_aries() {
    let positions = [at(Body::Venus, 357.0), at(Body::Mars, 3.0)];
    let aspects = detect_aspects(&positions, &AspectSettings::default()).unwrap();
    assert_eq!(aspects.len(), 1);
    assert_eq!(aspects[0].kind, AspectKind::Conjunction);
    assert!((aspects[0].deviation() - 6.0).abs() < 1e-9);
}

#[test]
fn test_unrelated_pairs_produce_nothing() {
    let positions = [at(Body::Sun, 0.0), at(Body::Moon, 40.0), at(Body::Mercury, 150.0)];
    let aspects = detect_aspects(&positions, &AspectSettings::default()).unwrap();
    // Sun-Moon 40°, Sun-Mercury 150°, Moon-Mercury 110°
    assert!(aspects.is_empty());
}

#[test]
fn test_every_pair_checked_once() {
    let positions = [
        at(Body::Sun, 0.0),
        at(Body::Moon, 120.0),
        at(Body::Jupiter, 240.0),
    ];
    let aspects = detect_aspects(&positions, &AspectSettings::default()).unwrap();
    assert_eq!(aspects.len(), 3);
    assert!(aspects.iter().all(|a| a.kind == AspectKind::Trine));
    assert!(aspects.iter().all(|a| a.first != a.second));
}

#[test]
fn test_angle_pairing() {
    let positions = [
        at(Body::Ascendant, 180.0),
        at(Body::Midheaven, 90.0),
        at(Body::Saturn, 181.0),
    ];

    let with_angles = detect_aspects(&positions, &AspectSettings::default()).unwrap();
    // Saturn conjunct ASC and square MC; ASC-MC itself is skipped
    assert_eq!(with_angles.len(), 2);
    assert!(with_angles.iter().all(|a| a.involves(Body::Saturn)));

    let settings = AspectSettings {
        include_angles: false,
        ..AspectSettings::default()
    };
    assert!(detect_aspects(&positions, &settings).unwrap().is_empty());
}

#[test]
fn test_same_body_twice_is_not_an_aspect() {
    let positions = [at(Body::Moon, 10.0), at(Body::Moon, 11.0)];
    let calculator = AspectCalculator::default();
    assert!(calculator.detect(&positions).is_empty());
}

#[test]
fn test_records_serialize_for_presentation() {
    let positions = [at(Body::Sun, 10.0), at(Body::Moon, 190.5)];
    let aspects = detect_aspects(&positions, &AspectSettings::default()).unwrap();
    let json = serde_json::to_value(&aspects).unwrap();
    assert_eq!(json[0]["kind"], "opposition");
    assert_eq!(json[0]["first"], "sun");
    assert_eq!(json[0]["second"], "moon");
}
