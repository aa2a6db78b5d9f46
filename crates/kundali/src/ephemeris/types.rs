use serde::{Deserialize, Serialize};

use crate::error::KundaliError;

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Latitude in decimal degrees, north positive
    pub lat: f64,
    /// Longitude in decimal degrees, east positive
    pub lon: f64,
}

impl GeoLocation {
    pub fn new(lat: f64, lon: f64) -> Result<Self, KundaliError> {
        let location = Self { lat, lon };
        location.validate()?;
        Ok(location)
    }

    pub fn validate(&self) -> Result<(), KundaliError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(KundaliError::invalid("latitude", format!("{} is outside -90..=90", self.lat)));
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(KundaliError::invalid("longitude", format!("{} is outside -180..=180", self.lon)));
        }
        Ok(())
    }
}

/// Sidereal position of a body as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    /// Longitude in degrees (0-360)
    pub lon: f64,
    /// Speed in longitude (degrees per day)
    #[serde(rename = "speedLon")]
    pub speed_lon: f64,
}

/// Settings for ephemeris calculations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Ayanamsa name for the sidereal frame
    pub ayanamsa: String,
    /// House system used for the Ascendant cusp
    #[serde(rename = "houseSystem")]
    pub house_system: String,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            ayanamsa: "lahiri".to_string(),
            house_system: "whole_sign".to_string(),
        }
    }
}
