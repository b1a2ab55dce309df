use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::core::{
    AlignedPoint, Campaign, CampaignSamples, DayIndex, DayIndexConverter, EquivalentDateQuery,
    EquivalentDateResolver, Series, SeriesAligner, SeriesStats,
};
use crate::error::{AlignError, AlignResult};
use crate::interaction::{MatchSlots, NearestPointMatcher, TooltipEntry};

use super::{
    ComparisonConfig, ComparisonPayload, MONTH_TICKS, MonthTick, ObservationLookup,
    chart_series_json_contract_v1_pretty,
};

/// Equivalent-date query paired with the lookup's answer for it.
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalentObservation<O> {
    pub query: EquivalentDateQuery,
    pub observation: Option<O>,
}

/// Multi-campaign comparison of one parcel.
///
/// Holds the aligned series for the lifetime of a render cycle and answers
/// cursor and click queries against them. Rebuild it whenever the source
/// samples change.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignComparison {
    config: ComparisonConfig,
    matcher: NearestPointMatcher,
    resolver: EquivalentDateResolver,
    series: Vec<Series>,
}

impl CampaignComparison {
    pub fn new(config: ComparisonConfig, inputs: Vec<CampaignSamples>) -> AlignResult<Self> {
        let config = config.validate()?;
        if inputs.len() > config.max_campaigns {
            return Err(AlignError::InvalidData(format!(
                "comparison accepts at most {} campaigns, got {}",
                config.max_campaigns,
                inputs.len()
            )));
        }

        let converter = DayIndexConverter::new(config.leap_day_policy);
        let series = SeriesAligner::new(converter).align_all(inputs)?;
        for series in series.iter().filter(|series| series.is_empty()) {
            debug!(
                campaign = series.campaign().end_year(),
                label = series.label(),
                "campaign has no samples"
            );
        }
        debug!(
            campaigns = series.len(),
            points = series.iter().map(Series::len).sum::<usize>(),
            "built campaign comparison"
        );

        Ok(Self {
            config,
            matcher: NearestPointMatcher::new(config.match_tolerance)?,
            resolver: EquivalentDateResolver::new(converter),
            series,
        })
    }

    pub fn from_payload(config: ComparisonConfig, payload: &ComparisonPayload) -> AlignResult<Self> {
        let inputs = payload
            .campaigns
            .iter()
            .map(|record| {
                record.to_campaign_samples().inspect_err(|err| {
                    warn!(campaign = record.year, error = %err, "rejected campaign record");
                })
            })
            .collect::<AlignResult<Vec<_>>>()?;
        Self::new(config, inputs)
    }

    pub fn from_json_str(config: ComparisonConfig, input: &str) -> AlignResult<Self> {
        let payload = ComparisonPayload::from_json_compat_str(input)
            .inspect_err(|err| warn!(error = %err, "rejected comparison payload"))?;
        Self::from_payload(config, &payload)
    }

    #[must_use]
    pub fn config(&self) -> ComparisonConfig {
        self.config
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Series with at least one point; empty campaigns are not drawn.
    pub fn chartable_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|series| !series.is_empty())
    }

    /// Per-series statistics in series order, `None` for empty campaigns.
    #[must_use]
    pub fn stats(&self) -> Vec<Option<SeriesStats>> {
        self.series.iter().map(Series::stats).collect()
    }

    #[must_use]
    pub fn month_ticks(&self) -> &'static [MonthTick] {
        &MONTH_TICKS
    }

    pub fn match_at(&self, query_index: f64) -> AlignResult<MatchSlots<'_>> {
        self.matcher.match_all(&self.series, query_index)
    }

    /// Tooltip lines for the cursor; empty when nothing is within tolerance.
    pub fn tooltip_at(&self, query_index: f64) -> AlignResult<Vec<TooltipEntry>> {
        Ok(self
            .match_at(query_index)?
            .iter()
            .flatten()
            .map(|found| found.to_tooltip_entry())
            .collect())
    }

    /// Point under a click on series `series_index`, the way the chart reports it.
    pub fn point(&self, series_index: usize, point_index: usize) -> AlignResult<&AlignedPoint> {
        self.series
            .get(series_index)
            .and_then(|series| series.points().get(point_index))
            .ok_or_else(|| {
                AlignError::InvalidData(format!(
                    "no point {point_index} in series {series_index}"
                ))
            })
    }

    /// Equivalent-date queries for every campaign, oldest campaign first.
    pub fn equivalent_queries(
        &self,
        selected_date: NaiveDate,
        source: Campaign,
    ) -> AlignResult<Vec<EquivalentDateQuery>> {
        self.campaigns_oldest_first()
            .into_iter()
            .map(|target| {
                self.resolver.equivalent_query(
                    selected_date,
                    source,
                    target,
                    self.config.search_margin_days,
                )
            })
            .collect()
    }

    /// Resolves a selected point against all campaigns and asks `lookup` for each.
    pub fn lookup_equivalents<L: ObservationLookup>(
        &self,
        selected_date: NaiveDate,
        source: Campaign,
        lookup: &L,
    ) -> AlignResult<Vec<EquivalentObservation<L::Observation>>> {
        self.equivalent_queries(selected_date, source)?
            .into_iter()
            .map(|query| {
                let observation = lookup.find_observation(&query)?;
                if observation.is_none() {
                    debug!(
                        campaign = query.campaign.end_year(),
                        date = %query.date,
                        "no observation near equivalent date"
                    );
                }
                Ok(EquivalentObservation { query, observation })
            })
            .collect()
    }

    /// Equivalent date of `index` in every campaign, oldest first.
    pub fn dates_at_index(&self, index: DayIndex) -> AlignResult<Vec<(Campaign, NaiveDate)>> {
        self.campaigns_oldest_first()
            .into_iter()
            .map(|campaign| Ok((campaign, self.resolver.date_at(index, campaign)?)))
            .collect()
    }

    fn campaigns_oldest_first(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> = self.series.iter().map(Series::campaign).collect();
        campaigns.sort();
        campaigns.dedup();
        campaigns
    }

    pub fn to_chart_json_contract_v1_pretty(&self) -> AlignResult<String> {
        chart_series_json_contract_v1_pretty(&self.series, &MONTH_TICKS)
    }
}
