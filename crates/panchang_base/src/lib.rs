//! Pure panchang math built on Sun, Moon and Ascendant longitudes.
//!
//! This crate provides:
//! - Angle utilities, Julian Date conversion and sidereal time
//! - Ayanamsha and zodiac frame selection
//! - Classifiers for Tithi, Karana, Yoga, Nakshatra and Rashi
//! - Weekday tables for Choghadiya, Hora and the fixed muhurta windows
//! - The Ascendant formula
//! - The `Period` / `DayWindow` data model shared by every detector
//!
//! Nothing here queries an ephemeris; see `panchang_search` for boundary
//! search and the day timeline.

pub mod ayanamsha;
pub mod choghadiya;
pub mod error;
pub mod graha;
pub mod hora;
pub mod julian;
pub mod karana;
pub mod lagna;
pub mod location;
pub mod masa;
pub mod muhurta;
pub mod nakshatra;
pub mod period;
pub mod rashi;
pub mod tithi;
pub mod util;
pub mod vaar;
pub mod yoga;

pub use ayanamsha::{AyanamshaSystem, Zodiac, ayanamsha_deg, general_precession_longitude_deg};
pub use choghadiya::{
    CHOGHADIYA_PER_HALF, Choghadiya, DAY_CHOGHADIYA, NIGHT_CHOGHADIYA, choghadiya_at,
};
pub use error::VedicError;
pub use graha::{CHALDEAN_ORDER, Graha};
pub use hora::{DAY_HORA, HoraScheme, NIGHT_HORA, hora_lord};
pub use julian::{
    J2000_JD, Rounding, SECONDS_PER_DAY, UNIX_EPOCH_JD, days_between, duration_from_days,
    gmst_rad, jd_from_utc, jd_to_centuries, local_sidereal_time_rad, utc_from_jd,
};
pub use karana::{
    FIXED_KARANAS, KARANA_COUNT, KARANA_SEGMENT_DEG, Karana, KaranaPosition, MOVABLE_KARANAS,
    karana_from_elongation, karana_from_index,
};
pub use lagna::{OBLIQUITY_J2000_DEG, ascendant_longitude_deg, lagna_from_lst_rad};
pub use location::GeoLocation;
pub use masa::{ALL_MASAS, Masa, masa_from_rashi_index};
pub use muhurta::{
    ABHIJIT_MUHURTA, ARDHAPRAHARA_SEGMENT, DUR_MUHURTA, GULIKA_KAAL_SEGMENT, MuhurtaSlot,
    NIGHT_GULIKA_SEGMENT, RAHU_KAAL_SEGMENT, YAMA_GHANTA_SEGMENT, abhijit_nature, muhurta_slots,
};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, GAND_MOOL_NAKSHATRAS, NAKSHATRA_COUNT, NAKSHATRA_SPAN_27, Nakshatra,
    NakshatraPosition, PADA_SPAN, nakshatra_from_longitude,
};
pub use period::{DayHalf, DayWindow, Period, PeriodCategory, PeriodType, Precision};
pub use rashi::{
    ALL_RASHIS, RASHI_COUNT, RASHI_SPAN_DEG, Rashi, RashiPosition, rashi_from_longitude,
};
pub use tithi::{
    Paksha, TITHI_COUNT, TITHI_SEGMENT_DEG, Tithi, TithiPosition, paksha_and_number,
    tithi_from_elongation, tithi_index,
};
pub use util::{angular_delta, angular_midpoint, normalize_360};
pub use vaar::{ALL_VAARS, Vaar, vaar_from_sunrise};
pub use yoga::{ALL_YOGAS, YOGA_COUNT, YOGA_SEGMENT_DEG, Yoga, YogaPosition, yoga_from_sum};
