use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{AlignedPoint, Campaign};
use crate::error::{AlignError, AlignResult};

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Builds a window, swapping reversed bounds.
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// `[center - margin_days, center + margin_days]`.
    pub fn around(center: NaiveDate, margin_days: u32) -> AlignResult<Self> {
        let margin = Days::new(u64::from(margin_days));
        let overflow = || {
            AlignError::InvalidDate(format!(
                "{center} ± {margin_days} days overflows the calendar"
            ))
        };
        let start = center.checked_sub_days(margin).ok_or_else(overflow)?;
        let end = center.checked_add_days(margin).ok_or_else(overflow)?;
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn for_campaign(campaign: Campaign) -> Self {
        Self {
            start: campaign.start_date(),
            end: campaign.end_date(),
        }
    }

    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Intersection with another window, `None` when they do not overlap.
    #[must_use]
    pub fn intersect(self, other: Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    #[must_use]
    pub fn clip_to_campaign(self, campaign: Campaign) -> Option<Self> {
        self.intersect(Self::for_campaign(campaign))
    }
}

/// Points whose original date falls inside `window`, in series order.
#[must_use]
pub fn points_in_date_window(points: &[AlignedPoint], window: DateWindow) -> Vec<&AlignedPoint> {
    points
        .iter()
        .filter(|point| window.contains(point.date))
        .collect()
}
