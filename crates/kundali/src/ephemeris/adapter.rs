use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use swisseph::swe::{calc_ut, houses_ex};
use swisseph::AscMc;

use crate::body::Body;
use crate::ephemeris::ayanamsa::{checked_longitude, normalize_degrees, to_sidereal};
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{BodyPosition, EphemerisSettings, GeoLocation};

// Swiss Ephemeris body codes. Rahu is the true lunar node.
const BODY_CODES: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Rahu, 11),
];

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("porphyry", b'O'),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris backed provider.
///
/// The C library keeps process-wide state, so every call goes through one
/// mutex. Positions are computed tropically and shifted into the sidereal
/// frame named by [`EphemerisSettings::ayanamsa`].
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    lock: Mutex<()>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        log::info!("Swiss Ephemeris data at {}", path.display());
        Ok(Self {
            ephemeris_path: path,
            lock: Mutex::new(()),
        })
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn ascendant(
        &self,
        jd_ut: f64,
        location: GeoLocation,
        settings: &EphemerisSettings,
    ) -> Result<f64, EphemerisError> {
        let house_system = get_house_system_byte(&settings.house_system)?;
        let tropical_asc = {
            let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            let (_cusps, angles) = houses_ex(jd_ut, 0, location.lat, location.lon, house_system as i32);
            AscMc::from_array(angles).ascendant
        };
        if !tropical_asc.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                jd: jd_ut,
                message: format!("non-finite ascendant at lat {} lon {}", location.lat, location.lon),
            });
        }
        to_sidereal(normalize_degrees(tropical_asc), &settings.ayanamsa, jd_ut)
    }

    fn body_position(
        &self,
        jd_ut: f64,
        body: Body,
        settings: &EphemerisSettings,
    ) -> Result<BodyPosition, EphemerisError> {
        let code = BODY_CODES
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                jd: jd_ut,
                message: format!("{} is not an ephemeris body", body),
            })?;

        let result = {
            let _guard = self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            calc_ut(jd_ut, code as u32, CALC_FLAGS as u32)
        }
        .map_err(|e| EphemerisError::CalculationFailed {
            body,
            jd: jd_ut,
            message: format!("Swiss Ephemeris error: {}", e),
        })?;

        let tropical = checked_longitude(body, jd_ut, normalize_degrees(result.out[0]))?;
        let speed_lon = result.out[3];
        if !speed_lon.is_finite() {
            return Err(EphemerisError::OutOfRange {
                body,
                jd: jd_ut,
                quantity: "speed",
                value: speed_lon,
            });
        }

        Ok(BodyPosition {
            lon: to_sidereal(tropical, &settings.ayanamsa, jd_ut)?,
            speed_lon,
        })
    }
}

/// Convert house system string to byte format
fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_house_systems() {
        assert_eq!(get_house_system_byte("Placidus").unwrap(), b'P');
        assert!(matches!(
            get_house_system_byte("topocentric"),
            Err(EphemerisError::InvalidHouseSystem { .. })
        ));
    }

    #[test]
    #[ignore] // Requires Swiss Ephemeris files
    fn computes_sidereal_sun() {
        let adapter = SwissEphemerisAdapter::new(None).unwrap();
        let pos = adapter
            .body_position(2_451_545.0, Body::Sun, &EphemerisSettings::default())
            .unwrap();
        // Tropical Sun at J2000 is ~280.46; Lahiri puts it in sidereal Sagittarius
        assert!((pos.lon - 256.5).abs() < 1.0);
    }
}
