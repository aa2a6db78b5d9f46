//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::body::Body;
use crate::chart::Chart;
use crate::ephemeris::ayanamsa::normalize_degrees;

pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

/// Longitudes this close to a nakshatra boundary are treated as on it.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

// (display_name, vimshottari lord)
pub const NAKSHATRA_ORDER: &[(&str, Body)] = &[
    ("Ashwini", Body::Ketu),
    ("Bharani", Body::Venus),
    ("Krittika", Body::Sun),
    ("Rohini", Body::Moon),
    ("Mrigashira", Body::Mars),
    ("Ardra", Body::Rahu),
    ("Punarvasu", Body::Jupiter),
    ("Pushya", Body::Saturn),
    ("Ashlesha", Body::Mercury),
    ("Magha", Body::Ketu),
    ("Purva Phalguni", Body::Venus),
    ("Uttara Phalguni", Body::Sun),
    ("Hasta", Body::Moon),
    ("Chitra", Body::Mars),
    ("Swati", Body::Rahu),
    ("Vishakha", Body::Jupiter),
    ("Anuradha", Body::Saturn),
    ("Jyeshtha", Body::Mercury),
    ("Mula", Body::Ketu),
    ("Purva Ashadha", Body::Venus),
    ("Uttara Ashadha", Body::Sun),
    ("Shravana", Body::Moon),
    ("Dhanishta", Body::Mars),
    ("Shatabhisha", Body::Rahu),
    ("Purva Bhadrapada", Body::Jupiter),
    ("Uttara Bhadrapada", Body::Saturn),
    ("Revati", Body::Mercury),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub name: String,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                name: name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// Split a longitude into (nakshatra index, degrees into that nakshatra).
///
/// Values within [`BOUNDARY_EPSILON`] of a boundary snap onto it so that a
/// longitude computed as `k * span` lands at the start of nakshatra `k`.
pub fn split_nakshatra(longitude: f64) -> (usize, f64) {
    let lon = normalize_degrees(longitude);
    let mut index = ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(26);
    let mut offset = lon - index as f64 * NAKSHATRA_SEGMENT_SIZE;

    if offset < 0.0 {
        index = index.saturating_sub(1);
        offset = lon - index as f64 * NAKSHATRA_SEGMENT_SIZE;
    }
    if NAKSHATRA_SEGMENT_SIZE - offset < BOUNDARY_EPSILON {
        index = (index + 1) % 27;
        offset = 0.0;
    } else if offset < BOUNDARY_EPSILON {
        offset = 0.0;
    }
    (index, offset)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub body: Body,
    pub longitude: f64,
    #[serde(rename = "nakshatraName")]
    pub nakshatra_name: String,
    #[serde(rename = "nakshatraIndex")]
    pub nakshatra_index: usize,
    pub lord: Body,
    /// Fraction of the nakshatra already traversed, in [0, 1)
    pub progress: f64,
    pub pada: u8,
}

/// Nakshatra, lord, pada and progress for a longitude.
pub fn nakshatra_for_longitude(body: Body, longitude: f64) -> NakshatraPlacement {
    let (index, offset) = split_nakshatra(longitude);
    let entry = &NAKSHATRA_TABLE[index];
    let pada = ((offset / PADA_SIZE) as u8).min(3) + 1;

    NakshatraPlacement {
        body,
        longitude: normalize_degrees(longitude),
        nakshatra_name: entry.name.clone(),
        nakshatra_index: index,
        lord: entry.lord,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
    }
}

/// Annotate every chart point with its nakshatra placement.
pub fn annotate_chart_nakshatras(chart: &Chart) -> BTreeMap<Body, NakshatraPlacement> {
    chart
        .points()
        .map(|point| (point.body, nakshatra_for_longitude(point.body, point.longitude)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nakshatra_for_longitude() {
        let meta = nakshatra_for_longitude(Body::Moon, 0.0);
        assert_eq!(meta.nakshatra_name, "Ashwini");
        assert_eq!(meta.lord, Body::Ketu);
        assert_eq!(meta.pada, 1);

        let meta2 = nakshatra_for_longitude(Body::Moon, 13.33);
        assert_eq!(meta2.nakshatra_name, "Ashwini");
        assert_eq!(meta2.pada, 4);
    }

    #[test]
    fn boundary_snaps_to_next_nakshatra() {
        let (index, offset) = split_nakshatra(7.0 * NAKSHATRA_SEGMENT_SIZE);
        assert_eq!(index, 7);
        assert_eq!(offset, 0.0);

        let (index, offset) = split_nakshatra(93.333_333_333_333_33);
        assert_eq!(index, 7);
        assert_eq!(offset, 0.0);

        let (index, _) = split_nakshatra(359.999_999_999_9);
        assert_eq!(index, 0);
    }

    #[test]
    fn last_nakshatra_is_revati() {
        let meta = nakshatra_for_longitude(Body::Moon, 355.0);
        assert_eq!(meta.nakshatra_name, "Revati");
        assert_eq!(meta.lord, Body::Mercury);
        assert_eq!(meta.nakshatra_index, 26);
    }
}
