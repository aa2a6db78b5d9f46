//! Local civil time <-> Julian Day (UT) conversion.
//!
//! Local time is shifted to UTC by the fractional-hour offset and then run
//! through the standard Gregorian-calendar Julian Day formula (Meeus,
//! Astronomical Algorithms ch. 7).

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::KundaliError;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Widest UTC offsets in civil use (UTC-12 .. UTC+14).
const MIN_UTC_OFFSET_HOURS: f64 = -12.0;
const MAX_UTC_OFFSET_HOURS: f64 = 14.0;

/// Julian Day (UT) for a local civil date and time.
///
/// Fails with `InvalidInput` for non-existent calendar dates, out-of-range
/// clock fields, or an unusable UTC offset.
pub fn julian_day(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    utc_offset_hours: f64,
) -> Result<f64, KundaliError> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        KundaliError::invalid("date", format!("{:04}-{:02}-{:02} does not exist", year, month, day))
    })?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(|| {
        KundaliError::invalid("time", format!("{:02}:{:02}:{:02} is not a valid clock time", hour, minute, second))
    })?;
    julian_day_from_local(NaiveDateTime::new(date, time), utc_offset_hours)
}

/// Julian Day (UT) for a local civil instant.
pub fn julian_day_from_local(local: NaiveDateTime, utc_offset_hours: f64) -> Result<f64, KundaliError> {
    let utc = local_to_utc(local, utc_offset_hours)?;
    Ok(gregorian_julian_day(utc))
}

/// Shift a local civil instant to UTC.
pub fn local_to_utc(local: NaiveDateTime, utc_offset_hours: f64) -> Result<NaiveDateTime, KundaliError> {
    let offset = offset_duration(utc_offset_hours)?;
    local
        .checked_sub_signed(offset)
        .ok_or_else(|| KundaliError::invalid("date", format!("{} is out of range", local)))
}

/// Julian Day for a UTC calendar instant (Gregorian calendar).
pub fn gregorian_julian_day(utc: NaiveDateTime) -> f64 {
    let mut year = utc.year() as f64;
    let mut month = utc.month() as f64;
    let seconds_of_day = utc.num_seconds_from_midnight() as f64 + utc.nanosecond() as f64 / 1e9;
    let day = utc.day() as f64 + seconds_of_day / SECONDS_PER_DAY;

    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }

    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Local civil instant for a Julian Day (UT), rounded to the nearest millisecond.
pub fn julian_day_to_local(jd: f64, utc_offset_hours: f64) -> Result<NaiveDateTime, KundaliError> {
    if !jd.is_finite() {
        return Err(KundaliError::invalid("julian day", format!("{} is not finite", jd)));
    }
    let shifted = jd + 0.5;
    let z = shifted.floor();
    let f = shifted - z;

    // Proleptic Gregorian throughout, matching `gregorian_julian_day`.
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i32;

    let midnight = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| KundaliError::invalid("julian day", format!("{} is outside the calendar range", jd)))?;
    let millis = (f * SECONDS_PER_DAY * 1000.0).round() as i64;
    let utc = midnight + Duration::milliseconds(millis);

    utc.checked_add_signed(offset_duration(utc_offset_hours)?)
        .ok_or_else(|| KundaliError::invalid("julian day", format!("{} is outside the calendar range", jd)))
}

/// Reject offsets that are not finite or fall outside civil use.
pub fn validate_utc_offset(utc_offset_hours: f64) -> Result<(), KundaliError> {
    if !utc_offset_hours.is_finite()
        || !(MIN_UTC_OFFSET_HOURS..=MAX_UTC_OFFSET_HOURS).contains(&utc_offset_hours)
    {
        return Err(KundaliError::invalid(
            "utc offset",
            format!(
                "{} hours is outside {}..={}",
                utc_offset_hours, MIN_UTC_OFFSET_HOURS, MAX_UTC_OFFSET_HOURS
            ),
        ));
    }
    Ok(())
}

/// `HH:MM:SS` clock label.
pub fn format_hms(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

fn offset_duration(utc_offset_hours: f64) -> Result<Duration, KundaliError> {
    validate_utc_offset(utc_offset_hours)?;
    Ok(Duration::seconds((utc_offset_hours * 3600.0).round() as i64))
}
