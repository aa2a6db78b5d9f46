//! Birth-time rectification.
//!
//! A window of candidate birth times is swept at a fixed step. Every
//! instant gets a D1 chart, its D7/D9/D10/D24/D60 vargas and a Vimshottari
//! anchor; each known life event then earns points when the dasha lords
//! running at its date are tied to the event's houses or karakas in the
//! governing varga.

pub mod cancel;
pub mod engine;
pub mod report;
pub mod rules;
pub mod scoring;

pub use cancel::CancelToken;
pub use engine::{
    rank_candidates, RectificationCandidate, RectificationEngine, RectificationRequest, ScheduledEvent,
    SweepOptions, SweepReport, DEFAULT_STEP_SECONDS,
};
pub use report::render_table;
pub use rules::{Event, EventKind, EventRule, EVENT_RULES};
