//! Vaar (Vedic weekday).
//!
//! The Vedic day runs sunrise to sunrise, so the weekday is that of the
//! sunrise instant in local mean time.

use chrono::{DateTime, Datelike, TimeDelta, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::graha::Graha;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vaar {
    Ravivaar,
    Somvaar,
    Mangalvaar,
    Budhvaar,
    Guruvaar,
    Shukravaar,
    Shanivaar,
}

/// All weekdays, Sunday first. Weekday tables are indexed in this order.
pub const ALL_VAARS: [Vaar; 7] = [
    Vaar::Ravivaar,
    Vaar::Somvaar,
    Vaar::Mangalvaar,
    Vaar::Budhvaar,
    Vaar::Guruvaar,
    Vaar::Shukravaar,
    Vaar::Shanivaar,
];

impl Vaar {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ravivaar => "Ravivaar",
            Self::Somvaar => "Somvaar",
            Self::Mangalvaar => "Mangalvaar",
            Self::Budhvaar => "Budhvaar",
            Self::Guruvaar => "Guruvaar",
            Self::Shukravaar => "Shukravaar",
            Self::Shanivaar => "Shanivaar",
        }
    }

    /// 0-based index, Sunday = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Graha ruling the weekday (and its first day hora).
    pub const fn lord(self) -> Graha {
        match self {
            Self::Ravivaar => Graha::Surya,
            Self::Somvaar => Graha::Chandra,
            Self::Mangalvaar => Graha::Mangal,
            Self::Budhvaar => Graha::Buddh,
            Self::Guruvaar => Graha::Guru,
            Self::Shukravaar => Graha::Shukra,
            Self::Shanivaar => Graha::Shani,
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Self {
        ALL_VAARS[weekday.num_days_from_sunday() as usize]
    }
}

/// Weekday of a sunrise instant, reckoned in local mean time at the given
/// east longitude.
pub fn vaar_from_sunrise(sunrise: &DateTime<Utc>, longitude_deg: f64) -> Vaar {
    let offset = TimeDelta::seconds((longitude_deg * 240.0).round() as i64);
    let local = sunrise.checked_add_signed(offset).unwrap_or(*sunrise);
    Vaar::from_weekday(local.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sunday_is_zero() {
        assert_eq!(Vaar::from_weekday(Weekday::Sun).index(), 0);
        assert_eq!(Vaar::from_weekday(Weekday::Sat), Vaar::Shanivaar);
    }

    #[test]
    fn lords_follow_weekday() {
        assert_eq!(Vaar::Ravivaar.lord(), Graha::Surya);
        assert_eq!(Vaar::Shanivaar.lord(), Graha::Shani);
    }

    #[test]
    fn local_mean_time_shifts_day() {
        // 2024-03-09 is a Saturday. 23:50 UTC sunrise at 82.5 E is 05:20 local Sunday.
        let sunrise = Utc.with_ymd_and_hms(2024, 3, 9, 23, 50, 0).unwrap();
        assert_eq!(vaar_from_sunrise(&sunrise, 0.0), Vaar::Shanivaar);
        assert_eq!(vaar_from_sunrise(&sunrise, 82.5), Vaar::Ravivaar);
    }
}
