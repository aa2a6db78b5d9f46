
pub mod ayanamsa;
pub mod provider;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use provider::{EphemerisError, EphemerisProvider, Serialized};
pub use types::{BodyPosition, EphemerisSettings, GeoLocation};
