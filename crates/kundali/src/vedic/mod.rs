pub mod dashas;
pub mod deities;
pub mod nakshatra;
pub mod signs;
pub mod vargas;

pub use dashas::{compute_birth_anchor, lords_at, vimshottari_timeline, BirthAnchor, DashaLevel, DashaLords, DashaPeriod};
pub use nakshatra::{annotate_chart_nakshatras, nakshatra_for_longitude, NakshatraPlacement};
pub use signs::SignPosition;
pub use vargas::{derive_varga_chart, VargaChart, VargaResult, VargaSpec};
