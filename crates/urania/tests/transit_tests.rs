use chrono::{TimeZone, Utc};
use urania::houses::{house_cusps, HouseMethod};
use urania::{
    compute_transits, place_bodies, Body, ChartError, ContactEndpoint, GeoLocation, Sign,
    TableEphemeris,
};

fn natal_positions(longitudes: &[(Body, f64)]) -> Vec<urania::BodyPosition> {
    let cusps = house_cusps(
        100f64.to_radians(),
        23.44f64.to_radians(),
        41f64.to_radians(),
        HouseMethod::SemiArc,
    )
    .unwrap();
    place_bodies(longitudes, &cusps).unwrap()
}

#[test]
fn test_capricorn_to_aquarius_reported_once() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
    let location = GeoLocation::new(41.0, 29.0).unwrap();
    let ephemeris = TableEphemeris::new()
        .with_sample(Body::Pluto, start, 299.9)
        .unwrap()
        .with_sample(Body::Pluto, end, 300.2)
        .unwrap();

    let events =
        compute_transits(&ephemeris, &[Body::Pluto], start, end, &location, &[], 4.0).unwrap();

    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert!(event.sign_changed());
    assert_eq!((event.start_sign, event.end_sign), (Sign::Capricorn, Sign::Aquarius));
    assert_eq!(events.iter().filter(|e| e.sign_changed()).count(), 1);
}

#[test]
fn test_contact_deduplicated_across_endpoints() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap();
    let location = GeoLocation::new(41.0, 29.0).unwrap();
    let natal = natal_positions(&[(Body::Venus, 15.0)]);
    let ephemeris = TableEphemeris::new()
        .with_sample(Body::Jupiter, start, 13.0)
        .unwrap()
        .with_sample(Body::Jupiter, end, 19.0)
        .unwrap();

    let events =
        compute_transits(&ephemeris, &[Body::Jupiter], start, end, &location, &natal, 4.0)
            .unwrap();

    assert_eq!(events[0].contacts.len(), 1);
    assert_eq!(events[0].contacts[0].natal, Body::Venus);
    assert_eq!(events[0].contacts[0].endpoint, ContactEndpoint::Both);
    assert!(!events[0].sign_changed());
}

#[test]
fn test_missing_sample_propagates() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
    let location = GeoLocation::new(0.0, 0.0).unwrap();
    let ephemeris = TableEphemeris::new()
        .with_sample(Body::Saturn, start, 340.0)
        .unwrap();

    let result = compute_transits(&ephemeris, &[Body::Saturn], start, end, &location, &[], 4.0);
    assert_eq!(
        result,
        Err(ChartError::MissingSample { body: Body::Saturn, at: end })
    );
}

#[test]
fn test_inverted_range_is_invalid() {
    let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let location = GeoLocation::new(0.0, 0.0).unwrap();
    let result = compute_transits(
        &TableEphemeris::new(),
        &[Body::Saturn],
        start,
        end,
        &location,
        &[],
        4.0,
    );
    assert!(matches!(result, Err(ChartError::InvalidInput { field: "transit range", .. })));
}

#[test]
fn test_angles_cannot_transit() {
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let location = GeoLocation::new(0.0, 0.0).unwrap();
    let result = compute_transits(
        &TableEphemeris::new(),
        &[Body::Ascendant],
        at,
        at,
        &location,
        &[],
        4.0,
    );
    assert!(result.is_err());
}
