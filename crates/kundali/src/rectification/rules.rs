//! Life events and the fixed rule table used to score them.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::body::Body;
use crate::error::KundaliError;
use crate::time::julian_day_from_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Marriage,
    CareerStart,
    EducationMilestone,
    Childbirth,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Marriage,
        EventKind::CareerStart,
        EventKind::EducationMilestone,
        EventKind::Childbirth,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            EventKind::Marriage => "marriage",
            EventKind::CareerStart => "career_start",
            EventKind::EducationMilestone => "education_milestone",
            EventKind::Childbirth => "childbirth",
        }
    }

    pub fn rule(&self) -> &'static EventRule {
        match self {
            EventKind::Marriage => &EVENT_RULES[0],
            EventKind::CareerStart => &EVENT_RULES[1],
            EventKind::EducationMilestone => &EVENT_RULES[2],
            EventKind::Childbirth => &EVENT_RULES[3],
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for EventKind {
    type Err = KundaliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "marriage" | "wedding" => Ok(EventKind::Marriage),
            "career" | "career_start" | "job" => Ok(EventKind::CareerStart),
            "education" | "education_milestone" | "graduation" => Ok(EventKind::EducationMilestone),
            "childbirth" | "child" => Ok(EventKind::Childbirth),
            _ => Err(KundaliError::invalid("event", format!("unknown event type '{}'", s))),
        }
    }
}

/// How one kind of event is judged: which divisional chart governs it,
/// which houses signify it, and which planets are its karakas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventRule {
    pub kind: EventKind,
    pub divisor: u8,
    pub houses: &'static [u8],
    pub karakas: &'static [Body],
}

pub const EVENT_RULES: [EventRule; 4] = [
    EventRule {
        kind: EventKind::Marriage,
        divisor: 9,
        houses: &[1, 7],
        karakas: &[Body::Venus, Body::Jupiter],
    },
    EventRule {
        kind: EventKind::CareerStart,
        divisor: 10,
        houses: &[1, 10],
        karakas: &[Body::Sun, Body::Saturn, Body::Mercury],
    },
    EventRule {
        kind: EventKind::EducationMilestone,
        divisor: 24,
        houses: &[1, 4, 5, 9],
        karakas: &[Body::Mercury, Body::Jupiter],
    },
    EventRule {
        kind: EventKind::Childbirth,
        divisor: 7,
        houses: &[1, 5, 9],
        karakas: &[Body::Jupiter],
    },
];

/// Events with no clock time are taken at local noon.
pub const DEFAULT_EVENT_TIME: (u32, u32, u32) = (12, 0, 0);

/// A dated life event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub kind: EventKind,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
}

impl Event {
    pub fn new(kind: EventKind, date: NaiveDate) -> Self {
        Self { kind, date, time: None }
    }

    pub fn at(mut self, time: NaiveTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn rule(&self) -> &'static EventRule {
        self.kind.rule()
    }

    pub fn local_instant(&self) -> NaiveDateTime {
        let (h, m, s) = DEFAULT_EVENT_TIME;
        let noon = NaiveTime::from_hms_opt(h, m, s).unwrap_or_default();
        self.date.and_time(self.time.unwrap_or(noon))
    }

    pub fn julian_day(&self, utc_offset_hours: f64) -> Result<f64, KundaliError> {
        julian_day_from_local(self.local_instant(), utc_offset_hours)
    }
}

/// Parses `kind:YYYY-MM-DD` with an optional `THH:MM[:SS]` suffix.
impl FromStr for Event {
    type Err = KundaliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, when) = s
            .split_once(':')
            .ok_or_else(|| KundaliError::invalid("event", format!("expected kind:YYYY-MM-DD, got '{}'", s)))?;
        let kind: EventKind = kind.parse()?;
        let when = when.trim();

        let (date, time) = match when.split_once('T') {
            Some((date, time)) => (date, Some(parse_clock(time)?)),
            None => (when, None),
        };
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| KundaliError::invalid("event", format!("bad date '{}': {}", date, e)))?;

        Ok(Event { kind, date, time })
    }
}

fn parse_clock(text: &str) -> Result<NaiveTime, KundaliError> {
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|e| KundaliError::invalid("event", format!("bad time '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_table_is_indexed_by_kind() {
        for kind in EventKind::ALL {
            assert_eq!(kind.rule().kind, kind);
        }
        assert_eq!(EventKind::Marriage.rule().divisor, 9);
        assert_eq!(EventKind::CareerStart.rule().divisor, 10);
        assert_eq!(EventKind::EducationMilestone.rule().divisor, 24);
        assert_eq!(EventKind::Childbirth.rule().divisor, 7);
    }

    #[test]
    fn parses_kinds_loosely() {
        assert_eq!("Marriage".parse::<EventKind>().unwrap(), EventKind::Marriage);
        assert_eq!("career-start".parse::<EventKind>().unwrap(), EventKind::CareerStart);
        assert_eq!("education".parse::<EventKind>().unwrap(), EventKind::EducationMilestone);
        assert!("divorce".parse::<EventKind>().unwrap_err().is_invalid_input());
    }

    #[test]
    fn event_defaults_to_local_noon() {
        let event: Event = "marriage:2015-06-20".parse().unwrap();
        assert_eq!(event.time, None);
        assert_eq!(event.local_instant().to_string(), "2015-06-20 12:00:00");
        // Noon at UTC+0 on 2000-01-01 is J2000.
        let j2000: Event = "career:2000-01-01".parse().unwrap();
        assert_eq!(j2000.julian_day(0.0).unwrap(), 2_451_545.0);
    }

    #[test]
    fn event_accepts_clock_time() {
        let event: Event = "childbirth:2019-03-04T06:30".parse().unwrap();
        assert_eq!(event.local_instant().to_string(), "2019-03-04 06:30:00");
    }

    #[test]
    fn rejects_malformed_events() {
        assert!("marriage".parse::<Event>().is_err());
        assert!("marriage:2015-02-30".parse::<Event>().is_err());
        assert!("marriage:2015-02-03T25:00".parse::<Event>().is_err());
    }
}
