//! Vimshottari dasha calculations.
//!
//! The 120-year cycle is anchored on the Moon's nakshatra at birth: the
//! nakshatra's lord rules the first Major period, and the fraction of the
//! nakshatra already traversed is the fraction of that period already spent.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::vedic::nakshatra::{split_nakshatra, NAKSHATRA_SEGMENT_SIZE};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;

/// Major periods walked before a lookup gives up.
pub const MAJOR_SEARCH_HORIZON: usize = 10;

type LordYears = (Body, f64);

pub const VIMSHOTTARI_SEQUENCE: [LordYears; 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashaLevel {
    Major,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Body,
    #[serde(rename = "startJd")]
    pub start_jd: f64,
    #[serde(rename = "endJd")]
    pub end_jd: f64,
    pub level: DashaLevel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DashaPeriod>,
}

impl DashaPeriod {
    pub fn duration_days(&self) -> f64 {
        self.end_jd - self.start_jd
    }

    /// Half-open containment: `[start, end)`.
    pub fn contains(&self, jd: f64) -> bool {
        jd >= self.start_jd && jd < self.end_jd
    }
}

/// Where the Moon's nakshatra places birth inside the first Major period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthAnchor {
    pub birth_jd: f64,
    pub nakshatra_index: usize,
    pub lord_index: usize,
    pub elapsed_fraction: f64,
    pub elapsed_days: f64,
    /// Notional start of the first Major period; may precede birth.
    pub cycle_start_jd: f64,
}

impl BirthAnchor {
    pub fn first_lord(&self) -> Body {
        VIMSHOTTARI_SEQUENCE[self.lord_index].0
    }

    /// Days of the first Major period still to run at birth.
    pub fn balance_days(&self) -> f64 {
        major_days(self.lord_index) - self.elapsed_days
    }
}

/// Major and Sub lords ruling one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashaLords {
    pub major: Body,
    pub sub: Body,
}

fn major_days(lord_index: usize) -> f64 {
    VIMSHOTTARI_SEQUENCE[lord_index].1 * VIMSHOTTARI_YEAR_DAYS
}

pub fn compute_birth_anchor(birth_jd: f64, moon_longitude: f64) -> BirthAnchor {
    let (nakshatra_index, offset) = split_nakshatra(moon_longitude);
    let lord_index = nakshatra_index % VIMSHOTTARI_SEQUENCE.len();
    let elapsed_fraction = offset / NAKSHATRA_SEGMENT_SIZE;
    let elapsed_days = elapsed_fraction * major_days(lord_index);

    BirthAnchor {
        birth_jd,
        nakshatra_index,
        lord_index,
        elapsed_fraction,
        elapsed_days,
        cycle_start_jd: birth_jd - elapsed_days,
    }
}

/// Nine contiguous Sub periods filling `[start, end)`, starting at the Major lord.
fn sub_periods(major_index: usize, start: f64, end: f64) -> Vec<DashaPeriod> {
    let span = end - start;
    let count = VIMSHOTTARI_SEQUENCE.len();
    let mut children = Vec::with_capacity(count);
    let mut child_start = start;

    for offset in 0..count {
        let (lord, years) = VIMSHOTTARI_SEQUENCE[(major_index + offset) % count];
        let child_end = if offset + 1 == count {
            end
        } else {
            child_start + years / VIMSHOTTARI_TOTAL_YEARS * span
        };
        children.push(DashaPeriod {
            lord,
            start_jd: child_start,
            end_jd: child_end,
            level: DashaLevel::Sub,
            children: Vec::new(),
        });
        child_start = child_end;
    }

    children
}

/// Major and Sub lords in force at `event_jd`.
///
/// Walks at most [`MAJOR_SEARCH_HORIZON`] Major periods from the cycle start.
/// Returns `None` when the event precedes the cycle or lies past the horizon.
pub fn lords_at(anchor: &BirthAnchor, event_jd: f64) -> Option<DashaLords> {
    if !event_jd.is_finite() || event_jd < anchor.cycle_start_jd {
        return None;
    }

    let count = VIMSHOTTARI_SEQUENCE.len();
    let mut major_start = anchor.cycle_start_jd;

    for step in 0..MAJOR_SEARCH_HORIZON {
        let major_index = (anchor.lord_index + step) % count;
        let major_end = major_start + major_days(major_index);

        if event_jd < major_end {
            return sub_periods(major_index, major_start, major_end)
                .into_iter()
                .find(|sub| event_jd < sub.end_jd)
                .map(|sub| DashaLords {
                    major: VIMSHOTTARI_SEQUENCE[major_index].0,
                    sub: sub.lord,
                });
        }
        major_start = major_end;
    }

    None
}

/// One full 120-year cycle of Major periods, each carrying its Sub periods.
pub fn vimshottari_timeline(birth_jd: f64, moon_longitude: f64) -> Vec<DashaPeriod> {
    let anchor = compute_birth_anchor(birth_jd, moon_longitude);
    let count = VIMSHOTTARI_SEQUENCE.len();
    let mut periods = Vec::with_capacity(count);
    let mut start = anchor.cycle_start_jd;

    for offset in 0..count {
        let major_index = (anchor.lord_index + offset) % count;
        let end = start + major_days(major_index);
        periods.push(DashaPeriod {
            lord: VIMSHOTTARI_SEQUENCE[major_index].0,
            start_jd: start,
            end_jd: end,
            level: DashaLevel::Major,
            children: sub_periods(major_index, start, end),
        });
        start = end;
    }

    periods
}
