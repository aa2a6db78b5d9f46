//! Divisional chart (varga) helpers for Vedic astrology.
//!
//! Vargas divide each 30° sign into `d` equal amsas and remap every amsa to
//! a new sign. The amsa arithmetic is shared; only the starting sign (and,
//! for D24/D60, a ruling deity) differs per divisor. Each divisor is one row
//! of [`SUPPORTED_VARGAS`].

use serde::Serialize;
use std::collections::BTreeMap;

use crate::body::Body;
use crate::chart::Chart;
use crate::vedic::deities::{CHATURVIMSAMSA_DEITIES, SHASHTIAMSA_DEITIES};
use crate::vedic::signs::{
    is_odd, modality, nth_from, sign_name, wrap_sign, Modality, SignPosition, ARIES, BELOW_SIGN_SPAN,
    CANCER, LEO, LIBRA, SAGITTARIUS, SIGN_SPAN, VIRGO,
};

/// Position of a body inside a divisional chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VargaResult {
    pub sign: u8,
    #[serde(rename = "longitudeInVarga")]
    pub longitude: f64,
    /// Ruling deity (D24, D60) or the hora owner (D2).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<&'static str>,
}

impl VargaResult {
    pub fn sign_name(&self) -> &'static str {
        sign_name(self.sign)
    }
}

/// Where the count of amsas starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Natal,
    NthFromNatal(u8),
    Sign(u8),
}

impl Anchor {
    fn resolve(self, natal: u8) -> u8 {
        match self {
            Anchor::Natal => natal,
            Anchor::NthFromNatal(n) => nth_from(natal, n),
            Anchor::Sign(sign) => sign,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum SignRule {
    /// Leo or Cancer only.
    Hora,
    /// Natal sign plus a fixed offset per amsa.
    OffsetTable(&'static [u8]),
    /// Anchor plus the amsa index.
    Progressive(Anchor),
    Parity { odd: Anchor, even: Anchor },
    Modality { movable: Anchor, fixed: Anchor, dual: Anchor },
    /// Odd signs walk forward from Leo, even signs backward from Cancer.
    ChaturVimsha,
    /// Counted over the whole zodiac from Aries 0°.
    Shashtiamsa,
}

pub struct VargaSpec {
    pub divisor: u8,
    pub label: &'static str,
    rule: SignRule,
    deities: Option<&'static [&'static str]>,
}

pub const SUPPORTED_VARGAS: &[VargaSpec] = &[
    VargaSpec { divisor: 2, label: "Hora", rule: SignRule::Hora, deities: None },
    VargaSpec { divisor: 3, label: "Drekkana", rule: SignRule::OffsetTable(&[0, 4, 8]), deities: None },
    VargaSpec { divisor: 4, label: "Chaturthamsa", rule: SignRule::OffsetTable(&[0, 3, 6, 9]), deities: None },
    VargaSpec {
        divisor: 5,
        label: "Panchamsa",
        rule: SignRule::Parity { odd: Anchor::Sign(ARIES), even: Anchor::Sign(VIRGO) },
        deities: None,
    },
    VargaSpec {
        divisor: 6,
        label: "Shashthamsa",
        rule: SignRule::Parity { odd: Anchor::Sign(ARIES), even: Anchor::Sign(LIBRA) },
        deities: None,
    },
    VargaSpec {
        divisor: 7,
        label: "Saptamsa",
        rule: SignRule::Parity { odd: Anchor::Natal, even: Anchor::NthFromNatal(7) },
        deities: None,
    },
    VargaSpec {
        divisor: 9,
        label: "Navamsa",
        rule: SignRule::Modality {
            movable: Anchor::Natal,
            fixed: Anchor::NthFromNatal(9),
            dual: Anchor::NthFromNatal(5),
        },
        deities: None,
    },
    VargaSpec {
        divisor: 10,
        label: "Dasamsa",
        rule: SignRule::Parity { odd: Anchor::Natal, even: Anchor::NthFromNatal(9) },
        deities: None,
    },
    VargaSpec { divisor: 12, label: "Dvadasamsa", rule: SignRule::Progressive(Anchor::Natal), deities: None },
    VargaSpec {
        divisor: 16,
        label: "Shodasamsa",
        rule: SignRule::Modality {
            movable: Anchor::Sign(ARIES),
            fixed: Anchor::Sign(LEO),
            dual: Anchor::Sign(SAGITTARIUS),
        },
        deities: None,
    },
    VargaSpec {
        divisor: 20,
        label: "Vimsamsa",
        rule: SignRule::Modality {
            movable: Anchor::Sign(ARIES),
            fixed: Anchor::Sign(SAGITTARIUS),
            dual: Anchor::Sign(LEO),
        },
        deities: None,
    },
    VargaSpec {
        divisor: 24,
        label: "ChaturVimsamsa",
        rule: SignRule::ChaturVimsha,
        deities: Some(&CHATURVIMSAMSA_DEITIES),
    },
    VargaSpec {
        divisor: 60,
        label: "Shashtiamsa",
        rule: SignRule::Shashtiamsa,
        deities: Some(&SHASHTIAMSA_DEITIES),
    },
];

pub fn varga_spec(divisor: u8) -> Option<&'static VargaSpec> {
    SUPPORTED_VARGAS.iter().find(|spec| spec.divisor == divisor)
}

pub fn is_supported(divisor: u8) -> bool {
    varga_spec(divisor).is_some()
}

/// Split a within-sign longitude into its amsa index (0..divisor) and the
/// remainder scaled back up to a 30° sign.
pub fn split_amsa(divisor: u8, longitude_in_sign: f64) -> (u8, f64) {
    let divisor = divisor.max(1);
    let span = SIGN_SPAN / divisor as f64;
    let index = ((longitude_in_sign / span).floor().max(0.0) as u8).min(divisor - 1);
    let remainder = (longitude_in_sign - index as f64 * span).max(0.0);
    let longitude = (remainder * divisor as f64).min(BELOW_SIGN_SPAN);
    (index, longitude)
}

/// Map a D1 position into the divisional chart for `divisor`.
///
/// Returns `None` when the divisor is not supported.
pub fn calculate(divisor: u8, position: SignPosition) -> Option<VargaResult> {
    varga_spec(divisor).map(|spec| spec.apply(position))
}

/// Like [`calculate`], from a raw sign number and within-sign longitude.
/// Out-of-range parts are folded back onto the zodiac.
pub fn calculate_raw(divisor: u8, longitude_in_sign: f64, sign: u8) -> Option<VargaResult> {
    let absolute = (sign as f64 - 1.0) * SIGN_SPAN + longitude_in_sign;
    calculate(divisor, SignPosition::from_longitude(absolute))
}

fn advance(start: u8, steps: u8) -> u8 {
    wrap_sign(start as i32 + steps as i32)
}

impl VargaSpec {
    pub fn apply(&self, position: SignPosition) -> VargaResult {
        let natal = position.sign;
        let (index, longitude) = split_amsa(self.divisor, position.longitude_in_sign);

        let start_from = |anchor: Anchor| VargaResult {
            sign: advance(anchor.resolve(natal), index),
            longitude,
            descriptor: None,
        };

        match self.rule {
            SignRule::Hora => {
                let (sign, descriptor) = if is_odd(natal) == (index == 0) {
                    (LEO, "Sun's Hora")
                } else {
                    (CANCER, "Moon's Hora")
                };
                VargaResult { sign, longitude, descriptor: Some(descriptor) }
            }
            SignRule::OffsetTable(offsets) => VargaResult {
                sign: advance(natal, offsets[index as usize % offsets.len()]),
                longitude,
                descriptor: None,
            },
            SignRule::Progressive(anchor) => start_from(anchor),
            SignRule::Parity { odd, even } => start_from(if is_odd(natal) { odd } else { even }),
            SignRule::Modality { movable, fixed, dual } => start_from(match modality(natal) {
                Modality::Movable => movable,
                Modality::Fixed => fixed,
                Modality::Dual => dual,
            }),
            SignRule::ChaturVimsha => {
                let slot = (index % 12) as usize;
                if is_odd(natal) {
                    VargaResult {
                        sign: advance(LEO, index),
                        longitude,
                        descriptor: self.deity(slot),
                    }
                } else {
                    VargaResult {
                        sign: wrap_sign(CANCER as i32 - index as i32),
                        longitude,
                        descriptor: self.deity(11 - slot),
                    }
                }
            }
            SignRule::Shashtiamsa => {
                let half_degrees = position.absolute_longitude() * 2.0;
                let raw_index = (half_degrees.floor().max(0.0) as u32).min(719);
                VargaResult {
                    sign: (raw_index / 60 + 1) as u8,
                    longitude: (half_degrees.fract() * SIGN_SPAN).clamp(0.0, BELOW_SIGN_SPAN),
                    descriptor: self.deity((raw_index % 60) as usize),
                }
            }
        }
    }

    fn deity(&self, slot: usize) -> Option<&'static str> {
        self.deities.and_then(|table| table.get(slot).copied())
    }
}

/// Every body of a chart placed in one divisional chart.
#[derive(Debug, Clone, Serialize)]
pub struct VargaChart {
    pub divisor: u8,
    pub label: &'static str,
    pub positions: BTreeMap<Body, VargaResult>,
}

impl VargaChart {
    pub fn get(&self, body: Body) -> Option<&VargaResult> {
        self.positions.get(&body)
    }

    pub fn ascendant(&self) -> Option<&VargaResult> {
        self.get(Body::Ascendant)
    }
}

/// Generate the divisional chart for `divisor`, or `None` if unsupported.
pub fn derive_varga_chart(chart: &Chart, divisor: u8) -> Option<VargaChart> {
    let spec = varga_spec(divisor)?;
    let positions = chart
        .points()
        .map(|point| (point.body, spec.apply(point.sign_position())))
        .collect();
    Some(VargaChart {
        divisor,
        label: spec.label,
        positions,
    })
}
