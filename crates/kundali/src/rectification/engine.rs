use chrono::{Duration, NaiveDateTime};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::body::Body;
use crate::chart::ChartBuilder;
use crate::ephemeris::{EphemerisError, EphemerisProvider, EphemerisSettings, GeoLocation};
use crate::error::KundaliError;
use crate::rectification::cancel::CancelToken;
use crate::rectification::rules::{Event, EventRule};
use crate::rectification::scoring::{event_score, kunda_bonus};
use crate::time::{format_hms, julian_day_from_local, validate_utc_offset, SECONDS_PER_DAY};
use crate::vedic::dashas::{compute_birth_anchor, lords_at};
use crate::vedic::vargas::{derive_varga_chart, VargaChart};

pub const DEFAULT_STEP_SECONDS: u32 = 10;

/// Divisional charts built for every candidate instant.
pub const SWEEP_DIVISORS: [u8; 5] = [7, 9, 10, 24, 60];

/// One birth-time search: a local civil window, a step, a place and the
/// life events to score against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectificationRequest {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default = "default_step_seconds")]
    pub step_seconds: u32,
    pub location: GeoLocation,
    pub utc_offset_hours: f64,
    pub events: Vec<Event>,
}

fn default_step_seconds() -> u32 {
    DEFAULT_STEP_SECONDS
}

impl RectificationRequest {
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        location: GeoLocation,
        utc_offset_hours: f64,
        events: Vec<Event>,
    ) -> Self {
        Self {
            start,
            end,
            step_seconds: DEFAULT_STEP_SECONDS,
            location,
            utc_offset_hours,
            events,
        }
    }

    pub fn with_step(mut self, step_seconds: u32) -> Self {
        self.step_seconds = step_seconds;
        self
    }

    pub fn validate(&self) -> Result<(), KundaliError> {
        if self.events.is_empty() {
            return Err(KundaliError::invalid("events", "at least one life event is required"));
        }
        if self.step_seconds == 0 {
            return Err(KundaliError::invalid("step", "step must be at least one second"));
        }
        if self.end < self.start {
            return Err(KundaliError::invalid(
                "window",
                format!("end {} is before start {}", self.end, self.start),
            ));
        }
        self.location.validate()?;
        validate_utc_offset(self.utc_offset_hours)
    }

    /// Instants in `[start, end]` at the configured step, both ends included
    /// when the window divides evenly.
    pub fn instant_count(&self) -> usize {
        if self.end < self.start || self.step_seconds == 0 {
            return 0;
        }
        let span = (self.end - self.start).num_seconds();
        (span / self.step_seconds as i64) as usize + 1
    }
}

/// A birth time that scored above zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectificationCandidate {
    pub time: NaiveDateTime,
    pub julian_day: f64,
    pub score: u32,
    pub d9_ascendant: String,
    pub d10_ascendant: String,
    pub d24_ascendant: String,
    pub d60_deity: String,
}

impl RectificationCandidate {
    pub fn clock_time(&self) -> String {
        format_hms(self.time.time())
    }
}

/// An event resolved to its rule and Julian Day once per sweep.
#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub rule: &'static EventRule,
    pub julian_day: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SweepOptions {
    pub cancel: CancelToken,
    /// Size of a dedicated thread pool; `None` uses the global rayon pool.
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    pub candidates: Vec<RectificationCandidate>,
    pub evaluated: usize,
    pub skipped: usize,
    /// Set when the sweep stopped before visiting every instant; the
    /// candidates are still ranked and valid for the instants visited.
    pub cancelled: bool,
}

/// Highest score first, earlier time on ties.
pub fn rank_candidates(candidates: &mut [RectificationCandidate]) {
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.time.cmp(&b.time)));
}

/// Birth-time rectification over a stepped window of candidate instants.
///
/// Each instant is scored independently, so the sweep runs on rayon. The
/// provider is shared across workers; wrap a non-reentrant backend in
/// [`crate::ephemeris::Serialized`].
pub struct RectificationEngine<P> {
    builder: ChartBuilder<P>,
}

impl<P: EphemerisProvider> RectificationEngine<P> {
    pub fn new(provider: P) -> Self {
        Self {
            builder: ChartBuilder::new(provider),
        }
    }

    pub fn with_settings(provider: P, settings: EphemerisSettings) -> Self {
        Self {
            builder: ChartBuilder::with_settings(provider, settings),
        }
    }

    pub fn builder(&self) -> &ChartBuilder<P> {
        &self.builder
    }

    /// Ranked candidates for the whole window.
    pub fn rectify(&self, request: &RectificationRequest) -> Result<Vec<RectificationCandidate>, KundaliError> {
        self.sweep(request, &SweepOptions::default())
            .map(|report| report.candidates)
    }

    /// Like [`Self::rectify`], with cancellation, pool sizing and counters.
    pub fn sweep(&self, request: &RectificationRequest, options: &SweepOptions) -> Result<SweepReport, KundaliError> {
        request.validate()?;
        let start_jd = julian_day_from_local(request.start, request.utc_offset_hours)?;
        julian_day_from_local(request.end, request.utc_offset_hours)?;

        let events = request
            .events
            .iter()
            .map(|event| {
                Ok(ScheduledEvent {
                    rule: event.rule(),
                    julian_day: event.julian_day(request.utc_offset_hours)?,
                })
            })
            .collect::<Result<Vec<_>, KundaliError>>()?;

        match options.workers {
            Some(0) => Err(KundaliError::invalid("workers", "worker count must be at least one")),
            Some(workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build()
                    .map_err(|e| KundaliError::invalid("workers", e.to_string()))?;
                Ok(pool.install(|| self.run(request, start_jd, &events, &options.cancel)))
            }
            None => Ok(self.run(request, start_jd, &events, &options.cancel)),
        }
    }

    fn run(
        &self,
        request: &RectificationRequest,
        start_jd: f64,
        events: &[ScheduledEvent],
        cancel: &CancelToken,
    ) -> SweepReport {
        let total = request.instant_count();
        let step = request.step_seconds as i64;
        let evaluated = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);

        let mut candidates: Vec<RectificationCandidate> = (0..total)
            .into_par_iter()
            .filter_map(|index| {
                if cancel.is_cancelled() {
                    return None;
                }
                let offset = index as i64 * step;
                let time = request.start + Duration::seconds(offset);
                let jd = start_jd + offset as f64 / SECONDS_PER_DAY;
                evaluated.fetch_add(1, Ordering::Relaxed);

                match self.score_instant(time, jd, request.location, events) {
                    Ok(candidate) => candidate,
                    Err(err) => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        debug!("Skipping candidate {}: {}", time, err);
                        None
                    }
                }
            })
            .collect();

        rank_candidates(&mut candidates);

        let evaluated = evaluated.into_inner();
        let skipped = skipped.into_inner();
        let cancelled = evaluated < total;
        if cancelled {
            warn!(
                "Rectification sweep cancelled after {} of {} instants; returning {} partial candidates",
                evaluated,
                total,
                candidates.len()
            );
        } else {
            info!(
                "Rectification sweep finished: {} instants, {} skipped, {} candidates",
                evaluated,
                skipped,
                candidates.len()
            );
        }

        SweepReport {
            candidates,
            evaluated,
            skipped,
            cancelled,
        }
    }

    /// Score one candidate birth instant.
    ///
    /// `Ok(None)` means the instant scored zero. Ephemeris failures are
    /// returned so the sweep can skip the instant.
    pub fn score_instant(
        &self,
        time: NaiveDateTime,
        jd: f64,
        location: GeoLocation,
        events: &[ScheduledEvent],
    ) -> Result<Option<RectificationCandidate>, EphemerisError> {
        let chart = self.builder.build(jd, location)?;
        let vargas: BTreeMap<u8, VargaChart> = SWEEP_DIVISORS
            .iter()
            .filter_map(|&divisor| derive_varga_chart(&chart, divisor).map(|varga| (divisor, varga)))
            .collect();

        let mut score = vargas.get(&9).map(kunda_bonus).unwrap_or(0);

        if let Some(moon) = chart.get(Body::Moon) {
            let anchor = compute_birth_anchor(jd, moon.longitude);
            for event in events {
                let Some(varga) = vargas.get(&event.rule.divisor) else {
                    continue;
                };
                match lords_at(&anchor, event.julian_day) {
                    Some(lords) => score += event_score(event.rule, lords, varga),
                    None => debug!(
                        "Dasha lookup exhausted for {} event at JD {:.5}",
                        event.rule.kind, event.julian_day
                    ),
                }
            }
        }

        if score == 0 {
            return Ok(None);
        }

        Ok(Some(RectificationCandidate {
            time,
            julian_day: jd,
            score,
            d9_ascendant: ascendant_sign(&vargas, 9),
            d10_ascendant: ascendant_sign(&vargas, 10),
            d24_ascendant: ascendant_sign(&vargas, 24),
            d60_deity: vargas
                .get(&60)
                .and_then(|varga| varga.ascendant())
                .and_then(|asc| asc.descriptor)
                .unwrap_or_default()
                .to_string(),
        }))
    }
}

fn ascendant_sign(vargas: &BTreeMap<u8, VargaChart>, divisor: u8) -> String {
    vargas
        .get(&divisor)
        .and_then(|varga| varga.ascendant())
        .map(|asc| asc.sign_name().to_string())
        .unwrap_or_default()
}
