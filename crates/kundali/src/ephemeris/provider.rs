use std::sync::Mutex;

use thiserror::Error;

use crate::body::Body;
use crate::ephemeris::types::{BodyPosition, EphemerisSettings, GeoLocation};

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Invalid ayanamsa: {ayanamsa}. Valid ayanamsas: {valid:?}")]
    InvalidAyanamsa { ayanamsa: String, valid: Vec<String> },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: Body, jd: f64, message: String },
    #[error("House calculation failed at JD {jd}: {message}")]
    HouseCalculationFailed { jd: f64, message: String },
    #[error("Provider returned out-of-range {quantity} for {body} at JD {jd}: {value}")]
    OutOfRange {
        body: Body,
        jd: f64,
        quantity: &'static str,
        value: f64,
    },
}

/// Source of sidereal positions consumed by the chart builder.
///
/// Implementations are opaque synchronous calls. Ketu is never requested;
/// [`Body::Rahu`] stands for the lunar node and the Ascendant is only
/// reached through [`EphemerisProvider::ascendant`].
pub trait EphemerisProvider: Send + Sync {
    /// Sidereal Ascendant longitude in [0, 360).
    fn ascendant(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        settings: &EphemerisSettings,
    ) -> Result<f64, EphemerisError>;

    /// Sidereal longitude in [0, 360) and daily speed of one of [`Body::QUERIED`].
    fn body_position(
        &self,
        jd_ut: f64,
        body: Body,
        settings: &EphemerisSettings,
    ) -> Result<BodyPosition, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        (**self).ascendant(jd_ut, location, settings)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(jd_ut, body, settings)
    }
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for Box<P> {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        (**self).ascendant(jd_ut, location, settings)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        (**self).body_position(jd_ut, body, settings)
    }
}

/// Serializes every call to the wrapped provider behind one lock, for
/// backends that keep global state and are not reentrant.
pub struct Serialized<P> {
    inner: P,
    lock: Mutex<()>,
}

impl<P: EphemerisProvider> Serialized<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: EphemerisProvider> EphemerisProvider for Serialized<P> {
    fn ascendant(&self, jd_ut: f64, location: GeoLocation, settings: &EphemerisSettings) -> Result<f64, EphemerisError> {
        // The guard protects no data, so a poisoned lock is still usable.
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.inner.ascendant(jd_ut, location, settings)
    }

    fn body_position(&self, jd_ut: f64, body: Body, settings: &EphemerisSettings) -> Result<BodyPosition, EphemerisError> {
        let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.inner.body_position(jd_ut, body, settings)
    }
}
