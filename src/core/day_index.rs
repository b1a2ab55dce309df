use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{CUMULATIVE_DAYS, SECOND_HALF_OFFSET, SEPTEMBER, parse_iso_date};
use crate::core::{Campaign, DayIndex, LeapDayPolicy};
use crate::error::{AlignError, AlignResult};

const FEBRUARY: usize = 1;

/// Maps calendar dates to day-of-campaign indices and back.
///
/// The forward direction depends only on month and day: the same month/day
/// lands on the same index whatever the campaign. The inverse walks the
/// fixed 365-day table, so it never yields Feb 29 and every index round-trips
/// in leap years as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayIndexConverter {
    #[serde(default)]
    leap_day_policy: LeapDayPolicy,
}

impl DayIndexConverter {
    #[must_use]
    pub fn new(leap_day_policy: LeapDayPolicy) -> Self {
        Self { leap_day_policy }
    }

    #[must_use]
    pub fn leap_day_policy(self) -> LeapDayPolicy {
        self.leap_day_policy
    }

    /// Day index of `date`.
    ///
    /// `_campaign` is not consulted: callers pair each date with the campaign
    /// it is meant to be read against, and the converter does not check that
    /// the date actually falls inside that window.
    pub fn to_day_index(self, date: NaiveDate, _campaign: Campaign) -> AlignResult<DayIndex> {
        let month = date.month0() as usize;
        let day = date.day() as u16;

        if month == FEBRUARY && day == 29 {
            return self.leap_day_index(date);
        }

        DayIndex::new(month_day_index(month, day))
    }

    pub fn parse_to_day_index(self, input: &str, campaign: Campaign) -> AlignResult<DayIndex> {
        let date = parse_iso_date(input)?;
        self.to_day_index(date, campaign)
    }

    /// Calendar date carrying `index` inside `campaign`.
    pub fn to_date(self, index: DayIndex, campaign: Campaign) -> AlignResult<NaiveDate> {
        let raw = index.get();
        if raw < SECOND_HALF_OFFSET {
            return campaign
                .start_date()
                .checked_add_days(Days::new(u64::from(raw)))
                .ok_or_else(|| {
                    AlignError::InvalidDate(format!(
                        "day {raw} of campaign {campaign} overflows the calendar"
                    ))
                });
        }

        let offset = raw - SECOND_HALF_OFFSET;
        let month = CUMULATIVE_DAYS
            .iter()
            .rposition(|&start| start <= offset)
            .unwrap_or(0);
        let day = offset - CUMULATIVE_DAYS[month] + 1;

        NaiveDate::from_ymd_opt(campaign.end_year(), month as u32 + 1, u32::from(day)).ok_or_else(
            || {
                AlignError::InvalidDate(format!(
                    "day {raw} of campaign {campaign} has no calendar date"
                ))
            },
        )
    }

    fn leap_day_index(self, date: NaiveDate) -> AlignResult<DayIndex> {
        match self.leap_day_policy {
            LeapDayPolicy::ClampToFeb28 => DayIndex::new(month_day_index(FEBRUARY, 28)),
            LeapDayPolicy::FoldIntoMarch1 => DayIndex::new(month_day_index(FEBRUARY + 1, 1)),
            LeapDayPolicy::Reject => Err(AlignError::InvalidDate(format!(
                "{date} falls on a leap day, which the configured policy rejects"
            ))),
        }
    }
}

fn month_day_index(month: usize, day: u16) -> u16 {
    if month >= SEPTEMBER {
        CUMULATIVE_DAYS[month] - CUMULATIVE_DAYS[SEPTEMBER] + (day - 1)
    } else {
        SECOND_HALF_OFFSET + CUMULATIVE_DAYS[month] + (day - 1)
    }
}
