//! Base (D1) chart assembly.

pub mod builder;
pub mod data;

pub use builder::{ketu_from_rahu, ChartBuilder};
pub use data::{Chart, ChartPoint};
