use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{Campaign, DateWindow, DayIndex, DayIndexConverter};
use crate::error::{AlignError, AlignResult};

/// Margin the image lookup searches around an equivalent date.
pub const DEFAULT_SEARCH_MARGIN_DAYS: u32 = 10;

/// "Same moment" query for one campaign, handed to an observation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalentDateQuery {
    pub campaign: Campaign,
    pub day_index: DayIndex,
    /// Exact equivalent date in `campaign`.
    pub date: NaiveDate,
    /// `date ± margin`, clipped to the campaign window.
    pub window: DateWindow,
}

/// Reprojects a date of one campaign onto the same day index of another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquivalentDateResolver {
    converter: DayIndexConverter,
}

impl EquivalentDateResolver {
    #[must_use]
    pub fn new(converter: DayIndexConverter) -> Self {
        Self { converter }
    }

    /// Date in `target` sharing `source_date`'s day index.
    ///
    /// The source campaign is the one whose window holds `source_date`.
    pub fn resolve_equivalent(self, source_date: NaiveDate, target: Campaign) -> AlignResult<NaiveDate> {
        let source = Campaign::containing(source_date)?;
        self.resolve_equivalent_from(source_date, source, target)
    }

    /// Like [`Self::resolve_equivalent`] with the source campaign stated explicitly.
    ///
    /// Fails with `InvalidDate` when `source_date` lies outside `source`.
    pub fn resolve_equivalent_from(
        self,
        source_date: NaiveDate,
        source: Campaign,
        target: Campaign,
    ) -> AlignResult<NaiveDate> {
        if !source.contains(source_date) {
            return Err(AlignError::InvalidDate(format!(
                "{source_date} is outside campaign {source}"
            )));
        }

        let index = self.converter.to_day_index(source_date, source)?;
        self.converter.to_date(index, target)
    }

    /// Date carrying `index` in `target`.
    pub fn date_at(self, index: DayIndex, target: Campaign) -> AlignResult<NaiveDate> {
        self.converter.to_date(index, target)
    }

    /// Search window for the image lookup around an already resolved date.
    pub fn search_window(
        self,
        resolved: NaiveDate,
        target: Campaign,
        margin_days: u32,
    ) -> AlignResult<DateWindow> {
        DateWindow::around(resolved, margin_days)?
            .clip_to_campaign(target)
            .ok_or_else(|| {
                AlignError::InvalidDate(format!(
                    "{resolved} ± {margin_days} days does not overlap campaign {target}"
                ))
            })
    }

    /// Full query for `target`: index, exact date, and clipped search window.
    pub fn equivalent_query(
        self,
        source_date: NaiveDate,
        source: Campaign,
        target: Campaign,
        margin_days: u32,
    ) -> AlignResult<EquivalentDateQuery> {
        let date = self.resolve_equivalent_from(source_date, source, target)?;
        let day_index = self.converter.to_day_index(date, target)?;
        let window = self.search_window(date, target, margin_days)?;

        Ok(EquivalentDateQuery {
            campaign: target,
            day_index,
            date,
            window,
        })
    }
}
