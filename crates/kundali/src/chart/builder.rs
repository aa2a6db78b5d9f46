use std::collections::BTreeMap;

use crate::body::Body;
use crate::chart::data::{Chart, ChartPoint};
use crate::ephemeris::ayanamsa::{checked_longitude, normalize_degrees};
use crate::ephemeris::{EphemerisError, EphemerisProvider, EphemerisSettings, GeoLocation};

/// Assembles D1 charts from an ephemeris provider.
pub struct ChartBuilder<P> {
    provider: P,
    settings: EphemerisSettings,
}

impl<P: EphemerisProvider> ChartBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self::with_settings(provider, EphemerisSettings::default())
    }

    pub fn with_settings(provider: P, settings: EphemerisSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &EphemerisSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Query the Ascendant and the eight ephemeris bodies, then derive Ketu.
    ///
    /// Any provider failure aborts the whole chart; no partial chart is
    /// ever returned. Longitudes must already lie in [0, 360).
    pub fn build(&self, jd_ut: f64, location: GeoLocation) -> Result<Chart, EphemerisError> {
        let mut points = BTreeMap::new();

        let asc = self.provider.ascendant(jd_ut, location, &self.settings)?;
        points.insert(
            Body::Ascendant,
            ChartPoint {
                body: Body::Ascendant,
                longitude: checked_longitude(Body::Ascendant, jd_ut, asc)?,
                speed: 0.0,
            },
        );

        for body in Body::QUERIED {
            let position = self.provider.body_position(jd_ut, body, &self.settings)?;
            if !position.speed_lon.is_finite() {
                return Err(EphemerisError::OutOfRange {
                    body,
                    jd: jd_ut,
                    quantity: "speed",
                    value: position.speed_lon,
                });
            }
            points.insert(
                body,
                ChartPoint {
                    body,
                    longitude: checked_longitude(body, jd_ut, position.lon)?,
                    speed: position.speed_lon,
                },
            );
        }

        if let Some(rahu) = points.get(&Body::Rahu).copied() {
            points.insert(Body::Ketu, ketu_from_rahu(&rahu));
        }

        Ok(Chart::new(jd_ut, location, points))
    }
}

/// Ketu sits exactly opposite Rahu and moves with the negated speed.
pub fn ketu_from_rahu(rahu: &ChartPoint) -> ChartPoint {
    ChartPoint {
        body: Body::Ketu,
        longitude: normalize_degrees(rahu.longitude + 180.0),
        speed: -rahu.speed,
    }
}
