use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{AlignedPoint, Campaign, DayIndex, Series};
use crate::error::{AlignError, AlignResult};

/// Maximum axis distance between the cursor and a matched point.
pub const DEFAULT_MATCH_TOLERANCE: f64 = 0.5;

/// Nearest point of one series under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesMatch<'a> {
    pub series_index: usize,
    pub series: &'a Series,
    pub point: &'a AlignedPoint,
    pub distance: f64,
}

impl SeriesMatch<'_> {
    #[must_use]
    pub fn to_tooltip_entry(&self) -> TooltipEntry {
        TooltipEntry {
            series_index: self.series_index,
            label: self.series.label().to_owned(),
            campaign: self.series.campaign(),
            day_index: self.point.day_index,
            date: self.point.date,
            value: self.point.value,
        }
    }
}

/// Owned, serializable line of a synchronized multi-series tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub series_index: usize,
    pub label: String,
    pub campaign: Campaign,
    pub day_index: DayIndex,
    pub date: NaiveDate,
    pub value: f64,
}

/// One slot per input series; `None` when nothing lies within tolerance.
pub type MatchSlots<'a> = SmallVec<[Option<SeriesMatch<'a>>; 4]>;

/// Synchronized nearest-point lookup across several aligned series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearestPointMatcher {
    tolerance: f64,
}

impl Default for NearestPointMatcher {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_MATCH_TOLERANCE,
        }
    }
}

impl NearestPointMatcher {
    pub fn new(tolerance: f64) -> AlignResult<Self> {
        validate_tolerance(tolerance)?;
        Ok(Self { tolerance })
    }

    #[must_use]
    pub fn tolerance(self) -> f64 {
        self.tolerance
    }

    pub fn match_all<'a>(self, series_list: &'a [Series], query_index: f64) -> AlignResult<MatchSlots<'a>> {
        match_all(series_list, query_index, self.tolerance)
    }
}

/// Finds, per series, the point closest to `query_index` within `tolerance`.
///
/// The first point reaching the minimum distance wins. The scan is linear in
/// the total number of points.
pub fn match_all(
    series_list: &[Series],
    query_index: f64,
    tolerance: f64,
) -> AlignResult<MatchSlots<'_>> {
    if !query_index.is_finite() {
        return Err(AlignError::InvalidData(
            "query index must be finite".to_owned(),
        ));
    }
    validate_tolerance(tolerance)?;

    let slots: MatchSlots<'_> = series_list
        .iter()
        .enumerate()
        .map(|(series_index, series)| {
            nearest_point(series, query_index, tolerance).map(|(point, distance)| SeriesMatch {
                series_index,
                series,
                point,
                distance,
            })
        })
        .collect();

    trace!(
        query_index,
        series = series_list.len(),
        matched = slots.iter().flatten().count(),
        "matched cursor across series"
    );

    Ok(slots)
}

/// Closest point of a single series and its distance, if within `tolerance`.
#[must_use]
pub fn nearest_point(series: &Series, query_index: f64, tolerance: f64) -> Option<(&AlignedPoint, f64)> {
    series
        .iter()
        .map(|point| (point, (point.day_index.as_f64() - query_index).abs()))
        .min_by_key(|(_, distance)| OrderedFloat(*distance))
        .filter(|(_, distance)| *distance <= tolerance)
}

fn validate_tolerance(tolerance: f64) -> AlignResult<()> {
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(AlignError::InvalidData(
            "match tolerance must be finite and >= 0".to_owned(),
        ));
    }
    Ok(())
}

/// Cursor state owned by the presentation layer.
///
/// `hovered` follows the pointer; `pinned` is the index selected by a click
/// (the vertical guide line). Neither is stored inside the engine: callers
/// update this value on input events and re-run the matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightState {
    hovered: Option<f64>,
    pinned: Option<DayIndex>,
}

impl HighlightState {
    #[must_use]
    pub fn hovered(self) -> Option<f64> {
        self.hovered
    }

    #[must_use]
    pub fn pinned(self) -> Option<DayIndex> {
        self.pinned
    }

    /// Non-finite positions hide the cursor.
    pub fn pointer_move(&mut self, query_index: f64) {
        self.hovered = query_index.is_finite().then_some(query_index);
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    pub fn pin(&mut self, index: DayIndex) {
        self.pinned = Some(index);
    }

    pub fn clear_pin(&mut self) {
        self.pinned = None;
    }

    /// Matches under the hovered position; all slots empty when not hovering.
    pub fn hovered_matches<'a>(
        self,
        matcher: NearestPointMatcher,
        series_list: &'a [Series],
    ) -> AlignResult<MatchSlots<'a>> {
        match self.hovered {
            Some(query_index) => matcher.match_all(series_list, query_index),
            None => Ok(series_list.iter().map(|_| None).collect()),
        }
    }
}
