//! Boundary search: locate the instant a classifier's bucket changes.
//!
//! Two-phase search on JD UT:
//! 1. Coarse scan: step away from the origin until the bucket differs from
//!    the origin's bucket or the horizon is exhausted.
//! 2. Bisection: halve the bracketing pair until it is within tolerance and
//!    report the midpoint.
//!
//! Both phases are plain state machines ([`CoarseCursor`], [`Bisection`])
//! that only say where to probe next and digest the answers. The driver
//! [`find_transition`] is the only place samples are requested, so tests can
//! run the search against synchronous mocked samplers.

use std::collections::HashMap;

use panchang_base::Precision;
use tracing::{debug, warn};

use crate::boundary_types::{Boundary, Direction, SearchConfig, Transition};
use crate::cancel::CancelToken;
use crate::error::SearchError;

/// Source of bucket indices over time.
pub trait Sampler {
    /// Bucket at `jd` (JD UT).
    fn bucket(&mut self, jd: f64) -> Result<u16, SearchError>;
}

impl<F> Sampler for F
where
    F: FnMut(f64) -> Result<u16, SearchError>,
{
    fn bucket(&mut self, jd: f64) -> Result<u16, SearchError> {
        self(jd)
    }
}

/// Memoizes another sampler by exact instant.
///
/// Lives for one search request only; snapshots are never cached across
/// requests. Failed samples are not cached; recoverable failures are kept
/// until [`Memoized::take_skipped`] so the caller can report them.
pub struct Memoized<S> {
    inner: S,
    memo: HashMap<u64, u16>,
    misses: u32,
    skipped: Vec<(f64, SearchError)>,
}

impl<S: Sampler> Memoized<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            memo: HashMap::new(),
            misses: 0,
            skipped: Vec::new(),
        }
    }

    /// Samples that reached the inner sampler.
    pub fn misses(&self) -> u32 {
        self.misses
    }

    /// Record a bucket already known at `jd`.
    pub fn remember(&mut self, jd: f64, bucket: u16) {
        self.memo.insert(jd.to_bits(), bucket);
    }

    /// Recoverable failures since the last call, in sampling order.
    pub fn take_skipped(&mut self) -> Vec<(f64, SearchError)> {
        std::mem::take(&mut self.skipped)
    }
}

impl<S: Sampler> Sampler for Memoized<S> {
    fn bucket(&mut self, jd: f64) -> Result<u16, SearchError> {
        if let Some(&b) = self.memo.get(&jd.to_bits()) {
            return Ok(b);
        }
        self.misses += 1;
        match self.inner.bucket(jd) {
            Ok(b) => {
                self.memo.insert(jd.to_bits(), b);
                Ok(b)
            }
            Err(e) => {
                if e.is_recoverable() {
                    self.skipped.push((jd, e.clone()));
                }
                Err(e)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Coarse scan
// ---------------------------------------------------------------------------

/// What the coarse cursor knows after a probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorState {
    /// Still inside the origin bucket (or the probe was skipped).
    Scanning,
    /// A probe landed outside the origin bucket.
    Bracketed {
        inside_jd: f64,
        outside_jd: f64,
        outside_bucket: u16,
    },
    /// The horizon is covered without a change.
    Exhausted,
}

/// Coarse scan cursor with its inside/outside bracketing state.
///
/// Probes sit at `origin + k * step` in the search direction; the last one
/// is clamped onto the limit so the horizon edge is always sampled.
#[derive(Debug, Clone)]
pub struct CoarseCursor {
    origin_bucket: u16,
    step: f64,
    limit_jd: f64,
    next_jd: Option<f64>,
    last_inside_jd: f64,
    state: CursorState,
}

impl CoarseCursor {
    /// `step_days` must be positive; `limit_jd` lies on the `direction`
    /// side of `origin_jd`.
    pub fn new(
        origin_jd: f64,
        origin_bucket: u16,
        direction: Direction,
        step_days: f64,
        limit_jd: f64,
    ) -> Self {
        let step = direction.sign() * step_days.abs();
        let mut cursor = Self {
            origin_bucket,
            step,
            limit_jd,
            next_jd: None,
            last_inside_jd: origin_jd,
            state: CursorState::Scanning,
        };
        cursor.next_jd = cursor.clamp(origin_jd + step, origin_jd);
        if cursor.next_jd.is_none() {
            cursor.state = CursorState::Exhausted;
        }
        cursor
    }

    fn beyond_limit(&self, jd: f64) -> bool {
        if self.step > 0.0 {
            jd > self.limit_jd
        } else {
            jd < self.limit_jd
        }
    }

    fn clamp(&self, candidate: f64, previous: f64) -> Option<f64> {
        if !self.beyond_limit(candidate) {
            Some(candidate)
        } else if previous != self.limit_jd && !self.beyond_limit(previous) {
            Some(self.limit_jd)
        } else {
            None
        }
    }

    /// Where to sample next, or `None` once bracketed or exhausted.
    pub fn next_probe(&self) -> Option<f64> {
        match self.state {
            CursorState::Scanning => self.next_jd,
            _ => None,
        }
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Last instant known to be in the origin bucket.
    pub fn last_inside_jd(&self) -> f64 {
        self.last_inside_jd
    }

    /// Digest the bucket at the current probe. `None` means the sample
    /// failed: the cursor advances without moving the inside edge.
    pub fn observe(&mut self, bucket: Option<u16>) -> CursorState {
        let Some(probe) = self.next_probe() else {
            return self.state;
        };
        match bucket {
            Some(b) if b != self.origin_bucket => {
                self.state = CursorState::Bracketed {
                    inside_jd: self.last_inside_jd,
                    outside_jd: probe,
                    outside_bucket: b,
                };
                return self.state;
            }
            Some(_) => self.last_inside_jd = probe,
            None => {}
        }
        self.next_jd = self.clamp(probe + self.step, probe);
        if self.next_jd.is_none() {
            self.state = CursorState::Exhausted;
        }
        self.state
    }

    /// The farthest probe position the cursor has reached.
    pub fn reached_jd(&self) -> f64 {
        match (self.state, self.next_jd) {
            (CursorState::Bracketed { outside_jd, .. }, _) => outside_jd,
            (CursorState::Exhausted, _) => self.limit_jd,
            (CursorState::Scanning, Some(next)) => next - self.step,
            (CursorState::Scanning, None) => self.limit_jd,
        }
    }
}

// ---------------------------------------------------------------------------
// Bisection
// ---------------------------------------------------------------------------

/// Interval-halving refinement of a bracket.
///
/// The invariant is that `inside_jd` lies in the origin bucket and
/// `outside_jd` does not; any probe not in the origin bucket moves the
/// outside edge, so the search converges on the first change away from the
/// origin even when the bracket spans several buckets.
#[derive(Debug, Clone)]
pub struct Bisection {
    inside_jd: f64,
    outside_jd: f64,
    origin_bucket: u16,
    outside_bucket: u16,
    tolerance_days: f64,
    max_iterations: u32,
    iterations: u32,
}

impl Bisection {
    pub fn new(
        inside_jd: f64,
        outside_jd: f64,
        origin_bucket: u16,
        outside_bucket: u16,
        tolerance_days: f64,
        max_iterations: u32,
    ) -> Self {
        Self {
            inside_jd,
            outside_jd,
            origin_bucket,
            outside_bucket,
            tolerance_days,
            max_iterations,
            iterations: 0,
        }
    }

    pub fn is_converged(&self) -> bool {
        (self.outside_jd - self.inside_jd).abs() <= self.tolerance_days
    }

    /// Midpoint to probe next, or `None` when converged or out of iterations.
    pub fn next_probe(&self) -> Option<f64> {
        if self.is_converged() || self.iterations >= self.max_iterations {
            None
        } else {
            Some(self.midpoint())
        }
    }

    pub fn observe(&mut self, probe_jd: f64, bucket: u16) {
        self.iterations += 1;
        if bucket == self.origin_bucket {
            self.inside_jd = probe_jd;
        } else {
            self.outside_jd = probe_jd;
            self.outside_bucket = bucket;
        }
    }

    pub fn midpoint(&self) -> f64 {
        0.5 * (self.inside_jd + self.outside_jd)
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn into_boundary(self, samples: u32) -> Boundary {
        let precision = if self.is_converged() {
            Precision::Exact
        } else {
            Precision::Approximate
        };
        Boundary {
            jd: self.midpoint(),
            inside_jd: self.inside_jd,
            outside_jd: self.outside_jd,
            from_bucket: self.origin_bucket,
            to_bucket: self.outside_bucket,
            precision,
            samples,
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Locate the first bucket change from `origin_jd` in `direction`.
///
/// The scan covers at most the configured horizon and never passes
/// `limit_jd`. The origin sample must succeed. Later samples that fail with
/// a recoverable error are skipped; during bisection a failed probe stops
/// refinement and the boundary is flagged approximate. Non-recoverable
/// errors and cancellation propagate.
pub fn find_transition<S: Sampler + ?Sized>(
    sampler: &mut S,
    origin_jd: f64,
    direction: Direction,
    limit_jd: Option<f64>,
    config: &SearchConfig,
    cancel: &CancelToken,
) -> Result<Transition, SearchError> {
    config.validate().map_err(SearchError::InvalidConfig)?;
    cancel.check()?;
    let origin_bucket = sampler.bucket(origin_jd)?;
    find_transition_from(
        sampler,
        origin_jd,
        origin_bucket,
        direction,
        limit_jd,
        config,
        cancel,
    )
}

/// [`find_transition`] with the origin bucket already known.
pub fn find_transition_from<S: Sampler + ?Sized>(
    sampler: &mut S,
    origin_jd: f64,
    origin_bucket: u16,
    direction: Direction,
    limit_jd: Option<f64>,
    config: &SearchConfig,
    cancel: &CancelToken,
) -> Result<Transition, SearchError> {
    let horizon_jd = origin_jd + direction.sign() * config.horizon_days();
    let limit = match (direction, limit_jd) {
        (Direction::Forward, Some(l)) => horizon_jd.min(l),
        (Direction::Backward, Some(l)) => horizon_jd.max(l),
        (_, None) => horizon_jd,
    };

    let mut samples = 1u32;
    let mut cursor = CoarseCursor::new(
        origin_jd,
        origin_bucket,
        direction,
        config.step_days(),
        limit,
    );

    while let Some(probe) = cursor.next_probe() {
        cancel.check()?;
        samples += 1;
        let bucket = match sampler.bucket(probe) {
            Ok(b) => Some(b),
            Err(e) if e.is_recoverable() => {
                warn!(jd = probe, error = %e, "coarse sample skipped");
                None
            }
            Err(e) => return Err(e),
        };
        cursor.observe(bucket);
    }

    let CursorState::Bracketed {
        inside_jd,
        outside_jd,
        outside_bucket,
    } = cursor.state()
    else {
        debug!(origin_jd, origin_bucket, ?direction, "no transition within horizon");
        return Ok(Transition::NotFound {
            origin_bucket,
            scanned_to_jd: cursor.reached_jd(),
        });
    };

    let mut bisection = Bisection::new(
        inside_jd,
        outside_jd,
        origin_bucket,
        outside_bucket,
        config.tolerance_days(),
        config.max_bisections,
    );
    while let Some(probe) = bisection.next_probe() {
        cancel.check()?;
        samples += 1;
        match sampler.bucket(probe) {
            Ok(b) => bisection.observe(probe, b),
            Err(e) if e.is_recoverable() => {
                warn!(jd = probe, error = %e, "bisection stopped on failed sample");
                break;
            }
            Err(e) => return Err(e),
        }
    }

    let boundary = bisection.into_boundary(samples);
    debug!(
        jd = boundary.jd,
        from = boundary.from_bucket,
        to = boundary.to_bucket,
        samples,
        ?direction,
        "transition located"
    );
    Ok(Transition::Found(boundary))
}
