//! Chart bodies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A point tracked in a chart: the Ascendant, the seven classical planets
/// and the two lunar nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Ascendant,
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Rahu,
    Ketu,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Ascendant,
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
    ];

    /// Bodies whose positions come straight from the ephemeris. Rahu is the
    /// lunar node; Ketu and the Ascendant are never queried as bodies.
    pub const QUERIED: [Body; 8] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Body::Ascendant => "asc",
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Rahu => "rahu",
            Body::Ketu => "ketu",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Body::Ascendant => "Ascendant",
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Rahu => "Rahu",
            Body::Ketu => "Ketu",
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.id() == lower || b.name().to_lowercase() == lower)
            .ok_or_else(|| format!("Unknown body: {}", s))
    }
}
