use chrono::{Datelike, Days};
use proptest::prelude::*;

use campaign_align::core::{Campaign, DayIndexConverter, EquivalentDateResolver};

proptest! {
    #[test]
    fn resolving_there_and_back_returns_the_source_date(
        source_year in 1900i32..2200,
        target_year in 1900i32..2200,
        offset in 0u64..366,
    ) {
        let resolver = EquivalentDateResolver::default();
        let source = Campaign::new(source_year).expect("campaign");
        let target = Campaign::new(target_year).expect("campaign");
        let date = source.start_date().checked_add_days(Days::new(offset)).expect("date");
        prop_assume!(source.contains(date));
        prop_assume!(!(date.month() == 2 && date.day() == 29));

        let there = resolver.resolve_equivalent(date, target).expect("there");
        prop_assert!(target.contains(there));
        let back = resolver.resolve_equivalent(there, source).expect("back");
        prop_assert_eq!(back, date);
    }

    #[test]
    fn equivalent_dates_share_the_day_index(
        source_year in 1900i32..2200,
        target_year in 1900i32..2200,
        offset in 0u64..366,
    ) {
        let converter = DayIndexConverter::default();
        let resolver = EquivalentDateResolver::new(converter);
        let source = Campaign::new(source_year).expect("campaign");
        let target = Campaign::new(target_year).expect("campaign");
        let date = source.start_date().checked_add_days(Days::new(offset)).expect("date");
        prop_assume!(source.contains(date));

        let resolved = resolver.resolve_equivalent_from(date, source, target).expect("resolved");
        prop_assert_eq!(
            converter.to_day_index(resolved, target).expect("index"),
            converter.to_day_index(date, source).expect("index")
        );
    }
}
