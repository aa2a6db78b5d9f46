#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use kundali::{Body, BodyPosition, CancelToken, EphemerisError, EphemerisProvider, EphemerisSettings, GeoLocation};

pub const EPOCH_JD: f64 = 2_448_028.5;

/// Sidereal rotation of the Ascendant, degrees per day.
pub const ASCENDANT_RATE: f64 = 360.985_647;

/// `rem_euclid` can round a tiny negative up to exactly 360.
fn wrap(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Deterministic stand-in for the Swiss Ephemeris: every body moves
/// linearly from a fixed epoch longitude.
pub struct LinearProvider;

impl LinearProvider {
    pub fn motion(body: Body) -> (f64, f64) {
        match body {
            Body::Sun => (32.4, 0.9856),
            Body::Moon => (201.7, 13.1764),
            Body::Mercury => (55.2, 1.383),
            Body::Venus => (11.9, 1.204),
            Body::Mars => (301.3, 0.713),
            Body::Jupiter => (84.6, 0.2298),
            Body::Saturn => (292.8, -0.0121),
            Body::Rahu => (309.5, -0.0529),
            Body::Ascendant | Body::Ketu => (0.0, 0.0),
        }
    }
}

impl EphemerisProvider for LinearProvider {
    fn ascendant(&self, jd_ut: f64, _location: GeoLocation, _settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        Ok(wrap(117.0 + ASCENDANT_RATE * (jd_ut - EPOCH_JD)))
    }

    fn body_position(&self, jd_ut: f64, body: Body, _settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        if body == Body::Ketu || body == Body::Ascendant {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "derived point queried".to_string(),
            });
        }
        let (base, speed) = Self::motion(body);
        Ok(BodyPosition {
            lon: wrap(base + speed * (jd_ut - EPOCH_JD)),
            speed_lon: speed,
        })
    }
}

/// Fails the Moon lookup for every `period`-th whole minute after the epoch.
pub struct FlakyProvider {
    pub period: i64,
}

impl EphemerisProvider for FlakyProvider {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        LinearProvider.ascendant(jd_ut, location, settings)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        let seconds = ((jd_ut - EPOCH_JD) * 86_400.0).round() as i64;
        if body == Body::Moon && seconds % 60 == 0 && (seconds / 60) % self.period == 0 {
            return Err(EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: "simulated gap in ephemeris files".to_string(),
            });
        }
        LinearProvider.body_position(jd_ut, body, settings)
    }
}

/// Fails every query.
pub struct BrokenProvider;

impl EphemerisProvider for BrokenProvider {
    fn ascendant(&self, jd_ut: f64, _location: GeoLocation, _settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        Err(EphemerisError::HouseCalculationFailed {
            jd: jd_ut,
            message: "no house data".to_string(),
        })
    }

    fn body_position(&self, jd_ut: f64, body: Body, _settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        Err(EphemerisError::CalculationFailed {
            body,
            jd: jd_ut,
            message: "no body data".to_string(),
        })
    }
}

/// Reports the linear positions without wrapping them into [0, 360).
pub struct UnwrappedProvider;

impl EphemerisProvider for UnwrappedProvider {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        Ok(LinearProvider.ascendant(jd_ut, location, settings)? + 720.0)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        let mut position = LinearProvider.body_position(jd_ut, body, settings)?;
        if body == Body::Sun {
            position.lon -= 720.0;
        }
        Ok(position)
    }
}

/// Linear positions that trip `token` once `limit` charts have been started.
pub struct CancelAfter {
    pub limit: usize,
    pub token: CancelToken,
    started: AtomicUsize,
}

impl CancelAfter {
    pub fn new(limit: usize, token: CancelToken) -> Self {
        Self {
            limit,
            token,
            started: AtomicUsize::new(0),
        }
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }
}

impl EphemerisProvider for CancelAfter {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        if self.started.fetch_add(1, Ordering::SeqCst) + 1 >= self.limit {
            self.token.cancel();
        }
        LinearProvider.ascendant(jd_ut, location, settings)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        LinearProvider.body_position(jd_ut, body, settings)
    }
}

pub fn kochi() -> GeoLocation {
    GeoLocation { lat: 9.9312, lon: 76.2673 }
}
