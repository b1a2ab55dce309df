use serde::{Deserialize, Serialize};

use crate::core::DayIndex;
use crate::error::{AlignError, AlignResult};

/// Linear mapping between the day-index axis and horizontal plot pixels.
///
/// Front ends use it to turn a pointer position into the query index fed to
/// the nearest-point matcher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayAxisScale {
    domain_start: f64,
    domain_end: f64,
}

impl Default for DayAxisScale {
    fn default() -> Self {
        Self {
            domain_start: DayIndex::FIRST.as_f64(),
            domain_end: DayIndex::LAST.as_f64(),
        }
    }
}

impl DayAxisScale {
    /// Scale over a zoomed axis window, e.g. `30.0..=121.0` for Oct–Dec.
    pub fn new(domain_start: f64, domain_end: f64) -> AlignResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(AlignError::InvalidData(
                "day axis domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn day_to_pixel(self, day: f64, plot_width_px: f64) -> AlignResult<f64> {
        validate_plot_width(plot_width_px)?;
        if !day.is_finite() {
            return Err(AlignError::InvalidData("day must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        Ok((day - self.domain_start) / span * plot_width_px)
    }

    /// Continuous axis value under `pixel`; not clamped to the domain.
    pub fn pixel_to_day(self, pixel: f64, plot_width_px: f64) -> AlignResult<f64> {
        validate_plot_width(plot_width_px)?;
        if !pixel.is_finite() {
            return Err(AlignError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        Ok(self.domain_start + pixel / plot_width_px * span)
    }
}

fn validate_plot_width(plot_width_px: f64) -> AlignResult<()> {
    if !plot_width_px.is_finite() || plot_width_px <= 0.0 {
        return Err(AlignError::InvalidData(format!(
            "plot width must be finite and > 0, got {plot_width_px}"
        )));
    }
    Ok(())
}
