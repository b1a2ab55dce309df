use chrono::Days;
use proptest::prelude::*;

use campaign_align::core::{Campaign, Sample, SeriesAligner};

proptest! {
    #[test]
    fn alignment_is_a_stable_sorted_permutation(
        end_year in 1990i32..2060,
        raw in proptest::collection::vec((0u64..365, -1.0f64..1.0), 0..128),
    ) {
        let campaign = Campaign::new(end_year).expect("campaign");
        let samples: Vec<Sample> = raw
            .iter()
            .enumerate()
            .map(|(seq, (offset, value))| {
                let date = campaign
                    .start_date()
                    .checked_add_days(Days::new(*offset))
                    .expect("date");
                Sample::new(date, *value)
                    .expect("sample")
                    .with_payload_field("seq", seq as u64)
            })
            .collect();

        let series = SeriesAligner::default()
            .align(samples, campaign, "prop")
            .expect("align");

        prop_assert_eq!(series.len(), raw.len());

        let mut seqs: Vec<u64> = series
            .iter()
            .map(|p| p.payload["seq"].as_u64().expect("seq"))
            .collect();
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].day_index <= pair[1].day_index);
            if pair[0].day_index == pair[1].day_index {
                let a = pair[0].payload["seq"].as_u64().expect("seq");
                let b = pair[1].payload["seq"].as_u64().expect("seq");
                prop_assert!(a < b);
            }
        }

        seqs.sort_unstable();
        let expected: Vec<u64> = (0..raw.len() as u64).collect();
        prop_assert_eq!(seqs, expected);
    }
}
