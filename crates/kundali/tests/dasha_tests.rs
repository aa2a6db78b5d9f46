use kundali::vedic::dashas::{
    compute_birth_anchor, lords_at, vimshottari_timeline, DashaLevel, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_YEAR_DAYS,
};
use kundali::vedic::nakshatra::NAKSHATRA_SEGMENT_SIZE;
use kundali::Body;

const BIRTH_JD: f64 = 2_448_028.729_166_7;

#[test]
fn major_lengths_sum_to_120_years() {
    let years: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, y)| y).sum();
    assert_eq!(years, 120.0);
    assert_eq!(VIMSHOTTARI_SEQUENCE[0], (Body::Ketu, 7.0));
    assert_eq!(VIMSHOTTARI_SEQUENCE[8], (Body::Mercury, 17.0));
}

#[test]
fn moon_on_pushya_start_anchors_at_birth() {
    let anchor = compute_birth_anchor(BIRTH_JD, 93.333_333_333_333_33);
    assert_eq!(anchor.elapsed_fraction, 0.0);
    assert_eq!(anchor.cycle_start_jd, BIRTH_JD);
    assert_eq!(anchor.first_lord(), Body::Saturn);

    let exact = compute_birth_anchor(BIRTH_JD, 7.0 * NAKSHATRA_SEGMENT_SIZE);
    assert_eq!(exact.cycle_start_jd, BIRTH_JD);
}

#[test]
fn sub_periods_sum_to_their_major() {
    for major in vimshottari_timeline(BIRTH_JD, 201.9) {
        assert_eq!(major.level, DashaLevel::Major);
        let total: f64 = major.children.iter().map(|sub| sub.duration_days()).sum();
        assert!((total - major.duration_days()).abs() < 1e-6);
        assert!(major.children.iter().all(|sub| sub.level == DashaLevel::Sub));
    }
}

#[test]
fn lookup_agrees_with_timeline() {
    let moon = 201.9;
    let anchor = compute_birth_anchor(BIRTH_JD, moon);
    let timeline = vimshottari_timeline(BIRTH_JD, moon);
    assert_eq!(timeline[0].start_jd, anchor.cycle_start_jd);

    let cycle_days = 120.0 * VIMSHOTTARI_YEAR_DAYS;
    for step in 0..400 {
        let jd = anchor.cycle_start_jd + step as f64 * cycle_days / 400.0 + 0.25;
        let lords = lords_at(&anchor, jd).unwrap();
        let major = timeline.iter().find(|p| p.contains(jd)).unwrap();
        let sub = major.children.iter().find(|p| p.contains(jd)).unwrap();
        assert_eq!((lords.major, lords.sub), (major.lord, sub.lord), "at JD {}", jd);
    }
}

#[test]
fn lookup_past_horizon_is_exhausted() {
    let anchor = compute_birth_anchor(BIRTH_JD, 201.9);
    let beyond = anchor.cycle_start_jd + 200.0 * VIMSHOTTARI_YEAR_DAYS;
    assert!(lords_at(&anchor, beyond).is_none());
}

#[test]
fn timeline_serializes_nested_periods() {
    let timeline = vimshottari_timeline(BIRTH_JD, 10.0);
    let json = serde_json::to_value(&timeline[0]).unwrap();
    assert_eq!(json["lord"], "ketu");
    assert_eq!(json["level"], "major");
    assert_eq!(json["children"].as_array().unwrap().len(), 9);
    assert!(json["children"][0].get("children").is_none());
}
