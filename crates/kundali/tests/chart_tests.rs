mod common;

use common::{kochi, BrokenProvider, LinearProvider, EPOCH_JD};
use kundali::time::julian_day;
use kundali::vedic::nakshatra::annotate_chart_nakshatras;
use kundali::{Body, ChartBuilder, EphemerisError, Serialized};

#[test]
fn chart_has_ten_points_with_opposed_nodes() {
    let chart = ChartBuilder::new(LinearProvider).build(EPOCH_JD + 3.7, kochi()).unwrap();
    assert_eq!(chart.len(), 10);

    let rahu = chart.get(Body::Rahu).unwrap();
    let ketu = chart.get(Body::Ketu).unwrap();
    assert!(((rahu.longitude + 180.0) % 360.0 - ketu.longitude).abs() < 1e-9);
    assert_eq!(ketu.speed, -rahu.speed);
    assert!(rahu.is_retrograde());
    assert!(!ketu.is_retrograde());
}

#[test]
fn every_longitude_is_normalized() {
    for day in 0..50 {
        let chart = ChartBuilder::new(LinearProvider)
            .build(EPOCH_JD + day as f64 * 7.3, kochi())
            .unwrap();
        for point in chart.points() {
            assert!((0.0..360.0).contains(&point.longitude), "{:?}", point);
            let position = point.sign_position();
            assert!((position.absolute_longitude() - point.longitude).abs() < 1e-9);
        }
    }
}

#[test]
fn provider_failure_fails_the_chart() {
    let result = ChartBuilder::new(BrokenProvider).build(EPOCH_JD, kochi());
    assert!(matches!(result, Err(EphemerisError::HouseCalculationFailed { .. })));
}

#[test]
fn serialized_provider_gives_identical_charts() {
    let direct = ChartBuilder::new(LinearProvider).build(EPOCH_JD, kochi()).unwrap();
    let locked = ChartBuilder::new(Serialized::new(LinearProvider))
        .build(EPOCH_JD, kochi())
        .unwrap();
    assert_eq!(direct, locked);
}

#[test]
fn local_birth_time_reaches_epoch() {
    let jd = julian_day(1990, 5, 17, 5, 30, 0, 5.5).unwrap();
    assert_eq!(jd, EPOCH_JD);
}

#[test]
fn nakshatras_annotate_every_point() {
    let chart = ChartBuilder::new(LinearProvider).build(EPOCH_JD, kochi()).unwrap();
    let placements = annotate_chart_nakshatras(&chart);
    assert_eq!(placements.len(), 10);

    // Moon at 201.7° sits in Vishakha, ruled by Jupiter.
    let moon = &placements[&Body::Moon];
    assert_eq!(moon.nakshatra_name, "Vishakha");
    assert_eq!(moon.lord, Body::Jupiter);
    assert!((1..=4).contains(&moon.pada));
}

#[test]
fn chart_json_uses_source_field_names() {
    let chart = ChartBuilder::new(LinearProvider).build(EPOCH_JD, kochi()).unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert!(json.get("julianDay").is_some());
    assert!(json["points"]["moon"].get("dailySpeed").is_some());
}
