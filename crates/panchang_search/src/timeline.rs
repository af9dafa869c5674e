//! Day timeline: every detector over one sunrise-to-sunrise window.

use panchang_base::{DayWindow, Period, vaar_from_sunrise};
use tracing::{info, instrument, warn};

use crate::bhadra::bhadra_periods;
use crate::cancel::CancelToken;
use crate::elements::{ElementKind, element_timeline};
use crate::engine::PanchangEngine;
use crate::ephemeris::EphemerisProvider;
use crate::error::SearchError;
use crate::gand_mool::gand_mool_periods;
use crate::muhurta::muhurta_periods;
use crate::segmenter::{choghadiya_periods, hora_periods, lagna_periods};
use crate::timeline_types::{DayReport, DetectorOutput, Diagnostic};

/// Fold one detector's result into the report. Aborts propagate; any other
/// failure becomes a `DetectorFailed` diagnostic.
fn absorb(
    report: &mut DetectorOutput,
    detector: &str,
    result: Result<DetectorOutput, SearchError>,
) -> Result<(), SearchError> {
    match result {
        Ok(out) => report.extend(out),
        Err(e) if e.is_abort() => return Err(e),
        Err(e) => {
            warn!(detector, error = %e, "detector failed");
            report.diagnostics.push(Diagnostic::DetectorFailed {
                detector: detector.to_string(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}

fn sort_periods(periods: &mut [Period]) {
    periods.sort_by(|a, b| (a.start, a.end, a.category).cmp(&(b.start, b.end, b.category)));
}

impl<P: EphemerisProvider> PanchangEngine<P> {
    /// All periods of one day, ordered by (start, end, category).
    ///
    /// Needs a configured location for the weekday and lagna.
    #[instrument(skip_all, fields(sunrise = %window.sunrise()))]
    pub fn day_report(
        &self,
        window: &DayWindow,
        cancel: &CancelToken,
    ) -> Result<DayReport, SearchError> {
        let location = *self.location()?;
        cancel.check()?;
        let vaar = vaar_from_sunrise(&window.sunrise(), location.longitude_deg);

        let mut all = DetectorOutput::default();
        all.periods.extend(choghadiya_periods(window, vaar));
        all.periods
            .extend(hora_periods(window, vaar, self.config().hora_scheme));
        all.periods.extend(muhurta_periods(window, vaar));

        for kind in ElementKind::ALL {
            absorb(
                &mut all,
                kind.classifier().label(),
                element_timeline(self, window, kind, cancel),
            )?;
        }
        absorb(&mut all, "lagna", lagna_periods(self, window, cancel))?;
        absorb(&mut all, "bhadra", bhadra_periods(self, window, cancel))?;
        absorb(&mut all, "gand_mool", gand_mool_periods(self, window, cancel))?;

        sort_periods(&mut all.periods);
        info!(
            periods = all.periods.len(),
            diagnostics = all.diagnostics.len(),
            "day report built"
        );
        Ok(DayReport {
            window: *window,
            vaar,
            periods: all.periods,
            diagnostics: all.diagnostics,
        })
    }
}
