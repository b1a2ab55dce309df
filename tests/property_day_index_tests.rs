use chrono::{Datelike, Days};
use proptest::prelude::*;

use campaign_align::core::{Campaign, DayIndex, DayIndexConverter, LeapDayPolicy};

fn is_leap_day(date: chrono::NaiveDate) -> bool {
    date.month() == 2 && date.day() == 29
}

proptest! {
    #[test]
    fn every_index_round_trips(end_year in 1600i32..2600, raw in 0u16..365) {
        let converter = DayIndexConverter::default();
        let campaign = Campaign::new(end_year).expect("campaign");
        let index = DayIndex::new(raw).expect("index");

        let date = converter.to_date(index, campaign).expect("date");
        prop_assert!(campaign.contains(date));
        prop_assert!(!is_leap_day(date));
        prop_assert_eq!(converter.to_day_index(date, campaign).expect("index"), index);
    }

    #[test]
    fn dates_in_window_round_trip(end_year in 1600i32..2600, offset in 0u64..366) {
        let converter = DayIndexConverter::default();
        let campaign = Campaign::new(end_year).expect("campaign");
        let date = campaign.start_date().checked_add_days(Days::new(offset)).expect("date");
        prop_assume!(campaign.contains(date));
        prop_assume!(!is_leap_day(date));

        let index = converter.to_day_index(date, campaign).expect("index");
        prop_assert_eq!(converter.to_date(index, campaign).expect("date"), date);
    }

    #[test]
    fn index_is_strictly_monotonic_inside_a_campaign(
        end_year in 1600i32..2600,
        a in 0u64..366,
        b in 0u64..366,
    ) {
        prop_assume!(a < b);
        let converter = DayIndexConverter::new(LeapDayPolicy::Reject);
        let campaign = Campaign::new(end_year).expect("campaign");
        let first = campaign.start_date().checked_add_days(Days::new(a)).expect("date");
        let second = campaign.start_date().checked_add_days(Days::new(b)).expect("date");
        prop_assume!(campaign.contains(second));
        prop_assume!(!is_leap_day(first) && !is_leap_day(second));

        let first_index = converter.to_day_index(first, campaign).expect("index");
        let second_index = converter.to_day_index(second, campaign).expect("index");
        prop_assert!(first_index < second_index);
    }

    #[test]
    fn indices_stay_in_range_and_halves_follow_months(end_year in 1600i32..2600, offset in 0u64..366) {
        let converter = DayIndexConverter::default();
        let campaign = Campaign::new(end_year).expect("campaign");
        let date = campaign.start_date().checked_add_days(Days::new(offset)).expect("date");
        prop_assume!(campaign.contains(date));

        let index = converter.to_day_index(date, campaign).expect("index");
        prop_assert!(index <= DayIndex::LAST);
        prop_assert_eq!(index.is_first_half(), date.month() >= 9);
    }
}
