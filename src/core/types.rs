use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::primitives::SECOND_HALF_OFFSET;
use crate::error::{AlignError, AlignResult};

/// Number of addressable day indices in every campaign.
pub const CAMPAIGN_DAYS: u16 = 365;

/// Agricultural campaign running from Sep 1 of `end_year - 1` through
/// Aug 31 of `end_year`.
///
/// Boundary dates are resolved once at construction, so a `Campaign` value is
/// always representable on the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Campaign {
    end_year: i32,
    start: NaiveDate,
    end: NaiveDate,
}

impl Campaign {
    pub fn new(end_year: i32) -> AlignResult<Self> {
        let start = end_year
            .checked_sub(1)
            .and_then(|start_year| NaiveDate::from_ymd_opt(start_year, 9, 1));
        let end = NaiveDate::from_ymd_opt(end_year, 8, 31);

        match (start, end) {
            (Some(start), Some(end)) => Ok(Self {
                end_year,
                start,
                end,
            }),
            _ => Err(AlignError::InvalidDate(format!(
                "campaign ending in {end_year} has no representable calendar window"
            ))),
        }
    }

    /// Campaign whose window contains `date` (Sep–Dec roll into the next year).
    pub fn containing(date: NaiveDate) -> AlignResult<Self> {
        let end_year = if date.month() >= 9 {
            date.year().checked_add(1).ok_or_else(|| {
                AlignError::InvalidDate(format!("{date} has no following campaign year"))
            })?
        } else {
            date.year()
        };
        Self::new(end_year)
    }

    #[must_use]
    pub fn end_year(self) -> i32 {
        self.end_year
    }

    #[must_use]
    pub fn start_year(self) -> i32 {
        self.start.year()
    }

    /// Sep 1 of the start year.
    #[must_use]
    pub fn start_date(self) -> NaiveDate {
        self.start
    }

    /// Aug 31 of the end year.
    #[must_use]
    pub fn end_date(self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Default display label, e.g. `2023/2024`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }
}

impl TryFrom<i32> for Campaign {
    type Error = AlignError;

    fn try_from(end_year: i32) -> AlignResult<Self> {
        Self::new(end_year)
    }
}

impl From<Campaign> for i32 {
    fn from(campaign: Campaign) -> Self {
        campaign.end_year
    }
}

impl fmt::Display for Campaign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start_year(), self.end_year)
    }
}

/// Zero-based day of campaign: 0 is Sep 1, 364 is Aug 31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct DayIndex(u16);

impl DayIndex {
    pub const FIRST: Self = Self(0);
    pub const JANUARY_FIRST: Self = Self(SECOND_HALF_OFFSET);
    pub const LAST: Self = Self(CAMPAIGN_DAYS - 1);

    pub fn new(index: u16) -> AlignResult<Self> {
        if index >= CAMPAIGN_DAYS {
            return Err(AlignError::InvalidDayIndex {
                index: i64::from(index),
            });
        }
        Ok(Self(index))
    }

    /// Rounds an axis coordinate to the closest day index.
    pub fn from_axis_value(value: f64) -> AlignResult<Self> {
        if !value.is_finite() {
            return Err(AlignError::InvalidData(
                "axis value must be finite".to_owned(),
            ));
        }
        let rounded = value.round();
        if rounded < 0.0 || rounded >= f64::from(CAMPAIGN_DAYS) {
            return Err(AlignError::InvalidDayIndex {
                index: rounded as i64,
            });
        }
        Ok(Self(rounded as u16))
    }

    #[must_use]
    pub fn get(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }

    /// `true` for Sep–Dec, which belong to the campaign's start year.
    #[must_use]
    pub fn is_first_half(self) -> bool {
        self.0 < SECOND_HALF_OFFSET
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..CAMPAIGN_DAYS).map(Self)
    }
}

impl TryFrom<u16> for DayIndex {
    type Error = AlignError;

    fn try_from(index: u16) -> AlignResult<Self> {
        Self::new(index)
    }
}

impl From<DayIndex> for u16 {
    fn from(index: DayIndex) -> Self {
        index.0
    }
}

impl fmt::Display for DayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How Feb 29 is placed on the fixed 365-day axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapDayPolicy {
    /// Shares Feb 28's index, keeping the observation left of the March tick.
    #[default]
    ClampToFeb28,
    /// Shares Mar 1's index (what the cumulative table yields on its own).
    FoldIntoMarch1,
    /// Fails with `InvalidDate`.
    Reject,
}
