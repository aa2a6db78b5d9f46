use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::body::Body;
use crate::ephemeris::GeoLocation;
use crate::vedic::signs::SignPosition;

/// One body's sidereal placement in a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub body: Body,
    /// Absolute sidereal longitude in [0, 360)
    pub longitude: f64,
    /// Degrees per day; zero for the Ascendant
    #[serde(rename = "dailySpeed")]
    pub speed: f64,
}

impl ChartPoint {
    pub fn sign_position(&self) -> SignPosition {
        SignPosition::from_longitude(self.longitude)
    }

    pub fn is_retrograde(&self) -> bool {
        self.speed < 0.0
    }
}

/// A complete D1 chart for one instant and place.
///
/// Charts are built once by [`crate::chart::ChartBuilder`] and never
/// mutated; the fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    #[serde(rename = "julianDay")]
    julian_day: f64,
    location: GeoLocation,
    points: BTreeMap<Body, ChartPoint>,
}

impl Chart {
    pub(crate) fn new(julian_day: f64, location: GeoLocation, points: BTreeMap<Body, ChartPoint>) -> Self {
        Self {
            julian_day,
            location,
            points,
        }
    }

    pub fn julian_day(&self) -> f64 {
        self.julian_day
    }

    pub fn location(&self) -> GeoLocation {
        self.location
    }

    pub fn get(&self, body: Body) -> Option<&ChartPoint> {
        self.points.get(&body)
    }

    /// Points in [`Body`] order, Ascendant first.
    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.values()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
