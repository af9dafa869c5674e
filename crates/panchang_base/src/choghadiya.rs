//! Choghadiya: eight equal divisions of the day and of the night.
//!
//! The day sequence starts with the choghadiya of the weekday lord and runs
//! through the cycle Udveg, Chal, Labh, Amrit, Kaal, Shubh, Rog; the night
//! sequence follows its own cycle. Both are written out as explicit
//! weekday-indexed tables (Sunday first) so they can be checked against a
//! printed panchang row by row.

use serde::{Deserialize, Serialize};

use crate::period::{DayHalf, PeriodType};
use crate::vaar::Vaar;

/// Number of choghadiyas per half.
pub const CHOGHADIYA_PER_HALF: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choghadiya {
    Udveg,
    Chal,
    Labh,
    Amrit,
    Kaal,
    Shubh,
    Rog,
}

impl Choghadiya {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Udveg => "Udveg",
            Self::Chal => "Chal",
            Self::Labh => "Labh",
            Self::Amrit => "Amrit",
            Self::Kaal => "Kaal",
            Self::Shubh => "Shubh",
            Self::Rog => "Rog",
        }
    }

    pub const fn nature(self) -> PeriodType {
        match self {
            Self::Amrit | Self::Shubh | Self::Labh => PeriodType::Auspicious,
            Self::Chal => PeriodType::Neutral,
            Self::Udveg | Self::Kaal | Self::Rog => PeriodType::Inauspicious,
        }
    }
}

use Choghadiya::{Amrit as A, Chal as C, Kaal as K, Labh as L, Rog as R, Shubh as S, Udveg as U};

/// Day choghadiyas, `[weekday][segment]`.
pub const DAY_CHOGHADIYA: [[Choghadiya; 8]; 7] = [
    [U, C, L, A, K, S, R, U], // Sunday
    [A, K, S, R, U, C, L, A], // Monday
    [R, U, C, L, A, K, S, R], // Tuesday
    [L, A, K, S, R, U, C, L], // Wednesday
    [S, R, U, C, L, A, K, S], // Thursday
    [C, L, A, K, S, R, U, C], // Friday
    [K, S, R, U, C, L, A, K], // Saturday
];

/// Night choghadiyas, `[weekday][segment]`.
pub const NIGHT_CHOGHADIYA: [[Choghadiya; 8]; 7] = [
    [S, A, C, R, K, L, U, S], // Sunday
    [C, R, K, L, U, S, A, C], // Monday
    [K, L, U, S, A, C, R, K], // Tuesday
    [U, S, A, C, R, K, L, U], // Wednesday
    [A, C, R, K, L, U, S, A], // Thursday
    [R, K, L, U, S, A, C, R], // Friday
    [L, U, S, A, C, R, K, L], // Saturday
];

/// Choghadiya of a segment (0..7) in a half of the given weekday.
///
/// Segments past 7 clamp to the last one.
pub fn choghadiya_at(vaar: Vaar, half: DayHalf, segment: usize) -> Choghadiya {
    let row = match half {
        DayHalf::Day => &DAY_CHOGHADIYA[vaar.index()],
        DayHalf::Night => &NIGHT_CHOGHADIYA[vaar.index()],
    };
    row[segment.min(7)]
}
