//! Vedic chart computation, divisional (varga) charts, Vimshottari dasha
//! and birth-time rectification.
//!
//! Data flows one way: [`time`] turns local civil instants into Julian Days,
//! [`chart`] asks an [`EphemerisProvider`] for sidereal positions, [`vedic`]
//! derives vargas and dasha periods from a chart, and [`rectification`]
//! sweeps a window of candidate birth times scoring each against known
//! life events.

pub mod body;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod rectification;
pub mod time;
pub mod vedic;

pub use body::Body;
pub use chart::{Chart, ChartBuilder, ChartPoint};
pub use ephemeris::{
    BodyPosition, EphemerisError, EphemerisProvider, EphemerisSettings, GeoLocation, Serialized,
};
pub use error::KundaliError;
pub use rectification::{
    CancelToken, Event, EventKind, RectificationCandidate, RectificationEngine,
    RectificationRequest, SweepOptions, SweepReport,
};
pub use vedic::dashas::{DashaLevel, DashaLords, DashaPeriod};
pub use vedic::signs::SignPosition;
pub use vedic::vargas::{VargaChart, VargaResult};
