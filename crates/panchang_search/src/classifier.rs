//! Period classifiers: map a snapshot onto a discrete bucket index.
//!
//! A classifier is the only thing the boundary search needs to know about
//! an element. Buckets are compared for equality only; names and natures
//! are looked up after a boundary is located.

use panchang_base::{
    KARANA_COUNT, Nakshatra, PeriodType, RASHI_COUNT, Rashi, TITHI_COUNT, Tithi, Yoga,
    karana_from_elongation, karana_from_index, nakshatra_from_longitude, paksha_and_number,
    rashi_from_longitude, tithi_from_elongation, yoga_from_sum,
};

use crate::ephemeris::{Body, CelestialSnapshot};
use crate::error::SearchError;

/// A discretization of a snapshot.
pub trait PeriodClassifier {
    /// Short label used in logs and diagnostics.
    fn label(&self) -> &'static str;

    /// Display name of a bucket.
    fn bucket_name(&self, index: u16) -> String;

    /// Nature of a bucket.
    fn nature(&self, index: u16) -> PeriodType;

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError>;

    /// Bucket computed from the ascendant alone, for classifiers that need
    /// no ephemeris query.
    fn classify_ascendant(&self, _ascendant_deg: f64) -> Option<u16> {
        None
    }
}

/// Tithi name with its paksha, e.g. "Shukla Ekadashi".
pub fn tithi_name(index: u16) -> String {
    match Tithi::from_index(index) {
        t @ (Tithi::Purnima | Tithi::Amavasya) => t.name().to_string(),
        t => {
            let (paksha, _) = paksha_and_number(index);
            format!("{} {}", paksha.name(), t.name())
        }
    }
}

/// Rikta tithis (4th, 9th, 14th of either paksha) and Amavasya are
/// inauspicious.
pub fn tithi_nature(index: u16) -> PeriodType {
    let i = index % TITHI_COUNT;
    let (_, number) = paksha_and_number(i);
    if i == TITHI_COUNT - 1 || matches!(number, 4 | 9 | 14) {
        PeriodType::Inauspicious
    } else {
        PeriodType::Auspicious
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TithiClassifier;

impl PeriodClassifier for TithiClassifier {
    fn label(&self) -> &'static str {
        "tithi"
    }

    fn bucket_name(&self, index: u16) -> String {
        tithi_name(index)
    }

    fn nature(&self, index: u16) -> PeriodType {
        tithi_nature(index)
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        Ok(u16::from(tithi_from_elongation(snapshot.elongation()).tithi_index))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KaranaClassifier;

impl PeriodClassifier for KaranaClassifier {
    fn label(&self) -> &'static str {
        "karana"
    }

    fn bucket_name(&self, index: u16) -> String {
        karana_from_index(index).name().to_string()
    }

    fn nature(&self, index: u16) -> PeriodType {
        karana_from_index(index % KARANA_COUNT).nature()
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        Ok(u16::from(karana_from_elongation(snapshot.elongation()).karana_index))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YogaClassifier;

impl PeriodClassifier for YogaClassifier {
    fn label(&self) -> &'static str {
        "yoga"
    }

    fn bucket_name(&self, index: u16) -> String {
        Yoga::from_index(index).name().to_string()
    }

    fn nature(&self, index: u16) -> PeriodType {
        Yoga::from_index(index).nature()
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        Ok(u16::from(yoga_from_sum(snapshot.sum()).yoga_index))
    }
}

/// Nakshatra of one body.
#[derive(Debug, Clone, Copy)]
pub struct NakshatraClassifier(pub Body);

impl PeriodClassifier for NakshatraClassifier {
    fn label(&self) -> &'static str {
        "nakshatra"
    }

    fn bucket_name(&self, index: u16) -> String {
        Nakshatra::from_index(index).name().to_string()
    }

    fn nature(&self, _index: u16) -> PeriodType {
        PeriodType::Neutral
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        let lon = snapshot.longitude(self.0)?;
        Ok(u16::from(nakshatra_from_longitude(lon).nakshatra_index))
    }

    fn classify_ascendant(&self, ascendant_deg: f64) -> Option<u16> {
        (self.0 == Body::Ascendant)
            .then(|| u16::from(nakshatra_from_longitude(ascendant_deg).nakshatra_index))
    }
}

/// Rashi of one body.
#[derive(Debug, Clone, Copy)]
pub struct RashiClassifier(pub Body);

impl PeriodClassifier for RashiClassifier {
    fn label(&self) -> &'static str {
        match self.0 {
            Body::Ascendant => "lagna",
            _ => "rashi",
        }
    }

    fn bucket_name(&self, index: u16) -> String {
        Rashi::from_index(index % RASHI_COUNT).name().to_string()
    }

    fn nature(&self, _index: u16) -> PeriodType {
        PeriodType::Neutral
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        let lon = snapshot.longitude(self.0)?;
        Ok(u16::from(rashi_from_longitude(lon).rashi_index))
    }

    fn classify_ascendant(&self, ascendant_deg: f64) -> Option<u16> {
        (self.0 == Body::Ascendant)
            .then(|| u16::from(rashi_from_longitude(ascendant_deg).rashi_index))
    }
}

/// Moon in one of a set of nakshatras (bucket 1) or not (bucket 0).
///
/// Adjacent member nakshatras fall in the same bucket, so a span across
/// Revati and Ashwini is located as one.
#[derive(Debug, Clone)]
pub struct GandMoolClassifier {
    members: Vec<Nakshatra>,
}

impl GandMoolClassifier {
    pub const OUTSIDE: u16 = 0;
    pub const INSIDE: u16 = 1;

    pub fn new(members: impl Into<Vec<Nakshatra>>) -> Self {
        Self {
            members: members.into(),
        }
    }

    pub fn members(&self) -> &[Nakshatra] {
        &self.members
    }

    pub fn contains(&self, nakshatra: Nakshatra) -> bool {
        self.members.contains(&nakshatra)
    }
}

impl PeriodClassifier for GandMoolClassifier {
    fn label(&self) -> &'static str {
        "gand_mool"
    }

    fn bucket_name(&self, index: u16) -> String {
        if index == Self::INSIDE {
            "Gand Mool".to_string()
        } else {
            "Clear".to_string()
        }
    }

    fn nature(&self, index: u16) -> PeriodType {
        if index == Self::INSIDE {
            PeriodType::Inauspicious
        } else {
            PeriodType::Neutral
        }
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        let nak = nakshatra_from_longitude(snapshot.moon_longitude).nakshatra;
        Ok(if self.contains(nak) {
            Self::INSIDE
        } else {
            Self::OUTSIDE
        })
    }
}

/// Waxing (0) or waning (1) half of the synodic month.
///
/// The 1 to 0 change is a new moon, the 0 to 1 change a full moon.
#[derive(Debug, Clone, Copy, Default)]
pub struct SynodicHalfClassifier;

impl SynodicHalfClassifier {
    pub const WAXING: u16 = 0;
    pub const WANING: u16 = 1;
}

impl PeriodClassifier for SynodicHalfClassifier {
    fn label(&self) -> &'static str {
        "synodic_half"
    }

    fn bucket_name(&self, index: u16) -> String {
        if index == Self::WAXING {
            "Waxing".to_string()
        } else {
            "Waning".to_string()
        }
    }

    fn nature(&self, _index: u16) -> PeriodType {
        PeriodType::Neutral
    }

    fn classify(&self, snapshot: &CelestialSnapshot) -> Result<u16, SearchError> {
        Ok(if snapshot.elongation() < 180.0 {
            Self::WAXING
        } else {
            Self::WANING
        })
    }
}
