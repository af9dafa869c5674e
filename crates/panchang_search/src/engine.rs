//! The panchang engine: an ephemeris provider plus configuration.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use panchang_base::{GeoLocation, ascendant_longitude_deg, jd_from_utc};

use crate::boundary::{Memoized, Sampler, find_transition, find_transition_from};
use crate::boundary_types::{Direction, SearchConfig, Transition};
use crate::cancel::CancelToken;
use crate::classifier::PeriodClassifier;
use crate::config::EngineConfig;
use crate::ephemeris::{CelestialSnapshot, EphemerisProvider};
use crate::error::SearchError;

/// The bucket containing an instant together with its located edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSpan {
    pub bucket: u16,
    /// Backward search result: the bucket's start.
    pub start: Transition,
    /// Forward search result: the bucket's end.
    pub end: Transition,
}

impl BucketSpan {
    pub fn start_jd(&self) -> Option<f64> {
        self.start.boundary().map(|b| b.jd)
    }

    pub fn end_jd(&self) -> Option<f64> {
        self.end.boundary().map(|b| b.jd)
    }

    /// Both edges located.
    pub fn is_complete(&self) -> bool {
        self.start_jd().is_some() && self.end_jd().is_some()
    }
}

/// Backward then forward search from `jd_ut` through one sampler.
pub(crate) fn span_around<S: Sampler + ?Sized>(
    sampler: &mut S,
    jd_ut: f64,
    bucket: u16,
    search: &SearchConfig,
    cancel: &CancelToken,
) -> Result<BucketSpan, SearchError> {
    let start = find_transition_from(
        sampler,
        jd_ut,
        bucket,
        Direction::Backward,
        None,
        search,
        cancel,
    )?;
    let end = find_transition_from(
        sampler,
        jd_ut,
        bucket,
        Direction::Forward,
        None,
        search,
        cancel,
    )?;
    Ok(BucketSpan { bucket, start, end })
}

/// Ephemeris provider plus configuration.
///
/// Holds no mutable state besides a query counter, so one engine can serve
/// independent requests from several threads.
#[derive(Debug)]
pub struct PanchangEngine<P> {
    provider: P,
    config: EngineConfig,
    queries: AtomicU64,
}

impl<P: EphemerisProvider> PanchangEngine<P> {
    pub fn new(provider: P, config: EngineConfig) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            provider,
            config,
            queries: AtomicU64::new(0),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Provider queries issued so far.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// The configured location, or `InvalidRequest` when none is set.
    pub fn location(&self) -> Result<&GeoLocation, SearchError> {
        self.config
            .location
            .as_ref()
            .ok_or(SearchError::InvalidRequest("engine has no location"))
    }

    /// Ascendant in the configured zodiac. Needs no provider query.
    pub fn ascendant_at(&self, jd_ut: f64) -> Result<f64, SearchError> {
        let loc = self.location()?;
        Ok(self
            .config
            .zodiac
            .from_tropical(ascendant_longitude_deg(jd_ut, loc), jd_ut))
    }

    /// One provider query, converted to the configured zodiac.
    pub fn snapshot_at_jd(&self, jd_ut: f64) -> Result<CelestialSnapshot, SearchError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        let pos = self.provider.tropical_positions(jd_ut)?;
        let zodiac = self.config.zodiac;
        let snap = CelestialSnapshot::new(
            jd_ut,
            zodiac.from_tropical(pos.sun_longitude_deg, jd_ut),
            zodiac.from_tropical(pos.moon_longitude_deg, jd_ut),
        );
        Ok(match self.config.location {
            Some(loc) => snap.with_ascendant(
                zodiac.from_tropical(ascendant_longitude_deg(jd_ut, &loc), jd_ut),
            ),
            None => snap,
        })
    }

    pub fn positions_at(&self, instant: &DateTime<Utc>) -> Result<CelestialSnapshot, SearchError> {
        self.snapshot_at_jd(jd_from_utc(instant))
    }

    /// Bucket of `classifier` at `jd_ut`.
    pub fn bucket_at<C>(&self, classifier: &C, jd_ut: f64) -> Result<u16, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        if self.config.location.is_some() {
            let asc = self.ascendant_at(jd_ut)?;
            if let Some(bucket) = classifier.classify_ascendant(asc) {
                return Ok(bucket);
            }
        }
        classifier.classify(&self.snapshot_at_jd(jd_ut)?)
    }

    /// A memoized sampler for one search request.
    pub fn sampler<'a, C>(&'a self, classifier: &'a C) -> Memoized<impl Sampler + 'a>
    where
        C: PeriodClassifier + ?Sized,
    {
        Memoized::new(move |jd: f64| self.bucket_at(classifier, jd))
    }

    /// First bucket change from `jd_ut` in `direction`.
    pub fn locate_jd<C>(
        &self,
        classifier: &C,
        jd_ut: f64,
        direction: Direction,
        limit_jd: Option<f64>,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<Transition, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        let mut sampler = self.sampler(classifier);
        find_transition(&mut sampler, jd_ut, direction, limit_jd, search, cancel)
    }

    pub fn locate<C>(
        &self,
        classifier: &C,
        instant: &DateTime<Utc>,
        direction: Direction,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<Transition, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        self.locate_jd(
            classifier,
            jd_from_utc(instant),
            direction,
            None,
            search,
            cancel,
        )
    }

    /// [`locate_jd`](Self::locate_jd) when the bucket at `jd_ut` is already
    /// known. The origin is not sampled again.
    #[allow(clippy::too_many_arguments)]
    pub fn locate_from_jd<C>(
        &self,
        classifier: &C,
        jd_ut: f64,
        bucket: u16,
        direction: Direction,
        limit_jd: Option<f64>,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<Transition, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        search.validate().map_err(SearchError::InvalidConfig)?;
        cancel.check()?;
        let mut sampler = self.sampler(classifier);
        sampler.remember(jd_ut, bucket);
        find_transition_from(
            &mut sampler,
            jd_ut,
            bucket,
            direction,
            limit_jd,
            search,
            cancel,
        )
    }

    /// Start and end of the bucket containing `jd_ut`; both searches share
    /// one memo.
    pub fn bucket_span_jd<C>(
        &self,
        classifier: &C,
        jd_ut: f64,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<BucketSpan, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        search.validate().map_err(SearchError::InvalidConfig)?;
        cancel.check()?;
        let mut sampler = self.sampler(classifier);
        let bucket = sampler.bucket(jd_ut)?;
        span_around(&mut sampler, jd_ut, bucket, search, cancel)
    }

    /// [`bucket_span_jd`](Self::bucket_span_jd) when the bucket at `jd_ut`
    /// is already known.
    pub fn bucket_span_from_jd<C>(
        &self,
        classifier: &C,
        jd_ut: f64,
        bucket: u16,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<BucketSpan, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        search.validate().map_err(SearchError::InvalidConfig)?;
        cancel.check()?;
        let mut sampler = self.sampler(classifier);
        sampler.remember(jd_ut, bucket);
        span_around(&mut sampler, jd_ut, bucket, search, cancel)
    }

    pub fn bucket_span<C>(
        &self,
        classifier: &C,
        instant: &DateTime<Utc>,
        search: &SearchConfig,
        cancel: &CancelToken,
    ) -> Result<BucketSpan, SearchError>
    where
        C: PeriodClassifier + ?Sized,
    {
        self.bucket_span_jd(classifier, jd_from_utc(instant), search, cancel)
    }
}
