//! Point scoring for one candidate instant.

use crate::body::Body;
use crate::rectification::rules::EventRule;
use crate::vedic::dashas::DashaLords;
use crate::vedic::signs::{house_from, nth_from, sign_lord};
use crate::vedic::vargas::VargaChart;

/// Angular and trinal houses counted from the varga Ascendant.
pub const KENDRA_TRIKONA: [u8; 6] = [1, 4, 5, 7, 9, 10];

/// Houses of the D9 Moon trine that satisfy the Kunda condition.
const KUNDA_TRINE: [u8; 3] = [1, 5, 9];

pub const KUNDA_BONUS: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub house_lord: u32,
    pub karaka: u32,
    pub placement: u32,
}

pub const MAJOR_WEIGHTS: Weights = Weights {
    house_lord: 7,
    karaka: 5,
    placement: 2,
};

/// Sub lords time events more finely and weigh more.
pub const SUB_WEIGHTS: Weights = Weights {
    house_lord: 10,
    karaka: 7,
    placement: 3,
};

/// Which conditions one dasha lord satisfies for an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LordMatch {
    pub rules_house: bool,
    pub is_karaka: bool,
    pub well_placed: bool,
}

impl LordMatch {
    pub fn score(&self, weights: &Weights) -> u32 {
        let mut score = 0;
        if self.rules_house {
            score += weights.house_lord;
        }
        if self.is_karaka {
            score += weights.karaka;
        }
        if self.well_placed {
            score += weights.placement;
        }
        score
    }
}

/// Judge `lord` against an event rule inside the governing varga chart.
///
/// House lordship and placement are both counted from the varga's own
/// Ascendant. A chart without an Ascendant matches karakas only.
pub fn assess_lord(lord: Body, rule: &EventRule, varga: &VargaChart) -> LordMatch {
    let is_karaka = rule.karakas.contains(&lord);
    let Some(asc) = varga.ascendant() else {
        return LordMatch { is_karaka, ..LordMatch::default() };
    };

    let rules_house = rule
        .houses
        .iter()
        .any(|&house| sign_lord(nth_from(asc.sign, house)) == lord);
    let well_placed = varga
        .get(lord)
        .map(|position| KENDRA_TRIKONA.contains(&house_from(asc.sign, position.sign)))
        .unwrap_or(false);

    LordMatch {
        rules_house,
        is_karaka,
        well_placed,
    }
}

/// Points one event earns from the dasha lords running at its date.
pub fn event_score(rule: &EventRule, lords: DashaLords, varga: &VargaChart) -> u32 {
    assess_lord(lords.major, rule, varga).score(&MAJOR_WEIGHTS)
        + assess_lord(lords.sub, rule, varga).score(&SUB_WEIGHTS)
}

/// [`KUNDA_BONUS`] when the D9 Ascendant falls in a trine from the D9 Moon.
pub fn kunda_bonus(navamsa: &VargaChart) -> u32 {
    match (navamsa.ascendant(), navamsa.get(Body::Moon)) {
        (Some(asc), Some(moon)) if KUNDA_TRINE.contains(&house_from(moon.sign, asc.sign)) => KUNDA_BONUS,
        _ => 0,
    }
}
