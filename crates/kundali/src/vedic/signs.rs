//! Zodiac sign tables and arithmetic.
//!
//! Signs are numbered 1 (Aries) through 12 (Pisces) throughout the crate.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::ephemeris::ayanamsa::normalize_degrees;
use crate::error::KundaliError;

pub const SIGN_SPAN: f64 = 30.0;

/// Largest f64 strictly below 30.
pub(crate) const BELOW_SIGN_SPAN: f64 = 29.999_999_999_999_996;

pub const SIGN_NAMES: [&str; 12] = [
    "Aries",
    "Taurus",
    "Gemini",
    "Cancer",
    "Leo",
    "Virgo",
    "Libra",
    "Scorpio",
    "Sagittarius",
    "Capricorn",
    "Aquarius",
    "Pisces",
];

/// Traditional sign rulers, Aries first.
const SIGN_LORDS: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Saturn,
    Body::Jupiter,
];

pub const ARIES: u8 = 1;
pub const CANCER: u8 = 4;
pub const LEO: u8 = 5;
pub const VIRGO: u8 = 6;
pub const LIBRA: u8 = 7;
pub const SAGITTARIUS: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Movable,
    Fixed,
    Dual,
}

/// Wrap any sign number (including 0 or negatives) into 1..=12.
pub fn wrap_sign(sign: i32) -> u8 {
    ((sign - 1).rem_euclid(12) + 1) as u8
}

/// The Nth sign counting `sign` itself as the first.
pub fn nth_from(sign: u8, n: u8) -> u8 {
    wrap_sign(sign as i32 + n as i32 - 1)
}

/// House number (1-12) of `sign` counted from `ascendant_sign`.
pub fn house_from(ascendant_sign: u8, sign: u8) -> u8 {
    wrap_sign(sign as i32 - ascendant_sign as i32 + 1)
}

pub fn sign_name(sign: u8) -> &'static str {
    SIGN_NAMES[(wrap_sign(sign as i32) - 1) as usize]
}

pub fn sign_lord(sign: u8) -> Body {
    SIGN_LORDS[(wrap_sign(sign as i32) - 1) as usize]
}

/// Odd signs are Aries, Gemini, Leo ...
pub fn is_odd(sign: u8) -> bool {
    sign % 2 == 1
}

pub fn modality(sign: u8) -> Modality {
    match (wrap_sign(sign as i32) - 1) % 3 {
        0 => Modality::Movable,
        1 => Modality::Fixed,
        _ => Modality::Dual,
    }
}

/// A sign number together with the degrees travelled inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignPosition {
    pub sign: u8,
    #[serde(rename = "longitudeInSign")]
    pub longitude_in_sign: f64,
}

impl SignPosition {
    /// Build from parts, rejecting signs outside 1..=12 or degrees outside [0, 30).
    pub fn new(sign: u8, longitude_in_sign: f64) -> Result<Self, KundaliError> {
        if !(1..=12).contains(&sign) {
            return Err(KundaliError::invalid("sign", format!("{} is outside 1..=12", sign)));
        }
        if !longitude_in_sign.is_finite() || !(0.0..SIGN_SPAN).contains(&longitude_in_sign) {
            return Err(KundaliError::invalid(
                "longitude in sign",
                format!("{} is outside [0, 30)", longitude_in_sign),
            ));
        }
        Ok(Self { sign, longitude_in_sign })
    }

    /// Split an absolute ecliptic longitude; any finite input is normalized first.
    pub fn from_longitude(longitude: f64) -> Self {
        let lon = normalize_degrees(longitude);
        let index = ((lon / SIGN_SPAN).floor() as u8).min(11);
        let within = (lon - index as f64 * SIGN_SPAN).clamp(0.0, BELOW_SIGN_SPAN);
        Self {
            sign: index + 1,
            longitude_in_sign: within,
        }
    }

    /// Like `from_longitude`, but rejects NaN and infinities.
    pub fn checked_from_longitude(longitude: f64) -> Result<Self, KundaliError> {
        if !longitude.is_finite() {
            return Err(KundaliError::invalid("longitude", format!("{} is not finite", longitude)));
        }
        Ok(Self::from_longitude(longitude))
    }

    pub fn absolute_longitude(&self) -> f64 {
        (self.sign - 1) as f64 * SIGN_SPAN + self.longitude_in_sign
    }

    pub fn sign_name(&self) -> &'static str {
        sign_name(self.sign)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_split_rejects_non_finite_longitudes() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = SignPosition::checked_from_longitude(bad).unwrap_err();
            assert!(err.is_invalid_input());
        }
        let position = SignPosition::checked_from_longitude(-15.0).unwrap();
        assert_eq!(position.sign, 12);
        assert_eq!(position.longitude_in_sign, 15.0);
    }

    #[test]
    fn counts_nth_sign_inclusively() {
        assert_eq!(nth_from(2, 9), 10); // 9th from Taurus is Capricorn
        assert_eq!(nth_from(3, 5), 7); // 5th from Gemini is Libra
        assert_eq!(nth_from(12, 2), 1);
        assert_eq!(nth_from(5, 1), 5);
    }

    #[test]
    fn houses_from_ascendant() {
        assert_eq!(house_from(1, 1), 1);
        assert_eq!(house_from(10, 1), 4);
        assert_eq!(house_from(1, 12), 12);
    }

    #[test]
    fn modalities_cycle() {
        assert_eq!(modality(1), Modality::Movable);
        assert_eq!(modality(2), Modality::Fixed);
        assert_eq!(modality(3), Modality::Dual);
        assert_eq!(modality(10), Modality::Movable);
        assert_eq!(modality(11), Modality::Fixed);
        assert_eq!(modality(12), Modality::Dual);
    }

    #[test]
    fn traditional_lords() {
        assert_eq!(sign_lord(1), Body::Mars);
        assert_eq!(sign_lord(4), Body::Moon);
        assert_eq!(sign_lord(11), Body::Saturn);
        assert_eq!(sign_lord(12), Body::Jupiter);
    }

    #[test]
    fn sign_position_round_trips_absolute_longitude() {
        let pos = SignPosition::from_longitude(45.5);
        assert_eq!(pos.sign, 2);
        assert!((pos.longitude_in_sign - 15.5).abs() < 1e-12);
        assert!((pos.absolute_longitude() - 45.5).abs() < 1e-12);

        let wrapped = SignPosition::from_longitude(-0.5);
        assert_eq!(wrapped.sign, 12);
        assert!(wrapped.longitude_in_sign < SIGN_SPAN);
    }

    #[test]
    fn rejects_invalid_parts() {
        assert!(SignPosition::new(0, 1.0).is_err());
        assert!(SignPosition::new(13, 1.0).is_err());
        assert!(SignPosition::new(1, 30.0).is_err());
        assert!(SignPosition::new(1, -0.1).is_err());
        assert!(SignPosition::new(12, 29.9).is_ok());
    }
}
