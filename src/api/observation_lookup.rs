use crate::core::{AlignedPoint, EquivalentDateQuery, Series, points_in_date_window};
use crate::error::AlignResult;

/// Seam to the collaborator that fetches imagery for an equivalent date.
///
/// Implementations search around `query.date` inside `query.window`; an
/// exact-date hit is rare because campaigns are observed on different days.
pub trait ObservationLookup {
    type Observation;

    fn find_observation(&self, query: &EquivalentDateQuery) -> AlignResult<Option<Self::Observation>>;
}

/// Answers lookups from already aligned series.
///
/// Picks the point dated closest to the equivalent date; on equal distance
/// the earlier date wins.
#[derive(Debug, Clone, Copy)]
pub struct SeriesObservationLookup<'a> {
    series: &'a [Series],
}

impl<'a> SeriesObservationLookup<'a> {
    #[must_use]
    pub fn new(series: &'a [Series]) -> Self {
        Self { series }
    }
}

impl<'a> ObservationLookup for SeriesObservationLookup<'a> {
    type Observation = &'a AlignedPoint;

    fn find_observation(&self, query: &EquivalentDateQuery) -> AlignResult<Option<Self::Observation>> {
        let best = self
            .series
            .iter()
            .filter(|series| series.campaign() == query.campaign)
            .flat_map(|series| points_in_date_window(series.points(), query.window))
            .min_by_key(|point| ((point.date - query.date).num_days().abs(), point.date));
        Ok(best)
    }
}
