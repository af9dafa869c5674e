//! Hora (planetary hour) lords.
//!
//! The day hora sequence starts with the weekday lord and follows the
//! Chaldean order. Two schemes are supported: the octal panchang layout (8
//! horas per half, default) and the classical 12 per half. In both the first
//! night hora belongs to the lord of the fifth weekday counted from the
//! current one.

use serde::{Deserialize, Serialize};

use crate::graha::{CHALDEAN_ORDER, Graha};
use crate::period::DayHalf;
use crate::vaar::Vaar;

/// How each half of the day is divided into horas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoraScheme {
    /// 8 horas per half, as laid out alongside the choghadiyas.
    #[default]
    Octal,
    /// 12 horas per half (24 per Vedic day).
    Classical,
}

impl HoraScheme {
    pub const fn per_half(self) -> u32 {
        match self {
            Self::Octal => 8,
            Self::Classical => 12,
        }
    }
}

use Graha::{
    Buddh as ME, Chandra as MO, Guru as JU, Mangal as MA, Shani as SA, Shukra as VE, Surya as SU,
};

/// Octal day hora lords, `[weekday][segment]`.
pub const DAY_HORA: [[Graha; 8]; 7] = [
    [SU, VE, ME, MO, SA, JU, MA, SU], // Sunday
    [MO, SA, JU, MA, SU, VE, ME, MO], // Monday
    [MA, SU, VE, ME, MO, SA, JU, MA], // Tuesday
    [ME, MO, SA, JU, MA, SU, VE, ME], // Wednesday
    [JU, MA, SU, VE, ME, MO, SA, JU], // Thursday
    [VE, ME, MO, SA, JU, MA, SU, VE], // Friday
    [SA, JU, MA, SU, VE, ME, MO, SA], // Saturday
];

/// Octal night hora lords, `[weekday][segment]`.
pub const NIGHT_HORA: [[Graha; 8]; 7] = [
    [JU, MA, SU, VE, ME, MO, SA, JU], // Sunday
    [VE, ME, MO, SA, JU, MA, SU, VE], // Monday
    [SA, JU, MA, SU, VE, ME, MO, SA], // Tuesday
    [SU, VE, ME, MO, SA, JU, MA, SU], // Wednesday
    [MO, SA, JU, MA, SU, VE, ME, MO], // Thursday
    [MA, SU, VE, ME, MO, SA, JU, MA], // Friday
    [ME, MO, SA, JU, MA, SU, VE, ME], // Saturday
];

/// Lord of the `index`-th hora of a half.
pub fn hora_lord(vaar: Vaar, half: DayHalf, index: usize, scheme: HoraScheme) -> Graha {
    match scheme {
        HoraScheme::Octal => {
            let row = match half {
                DayHalf::Day => &DAY_HORA[vaar.index()],
                DayHalf::Night => &NIGHT_HORA[vaar.index()],
            };
            row[index.min(7)]
        }
        HoraScheme::Classical => {
            let offset = match half {
                DayHalf::Day => 0,
                DayHalf::Night => 12,
            };
            let pos = vaar.lord().chaldean_position() + offset + index.min(11);
            CHALDEAN_ORDER[pos % 7]
        }
    }
}
