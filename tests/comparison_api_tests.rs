use chrono::NaiveDate;

use campaign_align::api::{
    CampaignComparison, ComparisonConfig, EquivalentObservation, ObservationLookup,
    SeriesObservationLookup,
};
use campaign_align::core::{
    Campaign, CampaignSamples, DayIndex, EquivalentDateQuery, Sample,
};
use campaign_align::error::{AlignError, AlignResult};

const PAYLOAD: &str = r#"{
  "campaigns": [
    {
      "name": "Campaign 2023/2024",
      "year": 2024,
      "samples": [
        { "date": "2024-03-15", "value": 0.71, "image": "b-0315.png" },
        { "date": "2023-09-01", "value": 0.52, "image": "b-0901.png" },
        { "date": "2023-11-20", "value": 0.44 }
      ]
    },
    {
      "name": "Campaign 2022/2023",
      "year": 2023,
      "samples": [
        { "date": "2023-03-10", "value": 0.64 },
        { "date": "2022-09-02", "value": 0.49 },
        { "date": "2023-03-21", "value": 0.68 }
      ]
    },
    {
      "year": 2022,
      "samples": []
    }
  ]
}"#;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn comparison() -> CampaignComparison {
    CampaignComparison::from_json_str(ComparisonConfig::default(), PAYLOAD).expect("comparison")
}

#[test]
fn builds_one_series_per_campaign() {
    let comparison = comparison();
    let series = comparison.series();

    assert_eq!(series.len(), 3);
    assert_eq!(series[0].label(), "Campaign 2023/2024");
    assert_eq!(series[2].label(), "2021/2022");
    assert!(series[2].is_empty());

    let first: Vec<u16> = series[0].iter().map(|p| p.day_index.get()).collect();
    assert_eq!(first, vec![0, 80, 195]);
    assert_eq!(series[0].points()[0].payload["image"], "b-0901.png");

    assert_eq!(comparison.chartable_series().count(), 2);
}

#[test]
fn stats_follow_series_order() {
    let stats = comparison().stats();

    assert_eq!(stats.len(), 3);
    let first = stats[0].expect("stats");
    approx::assert_relative_eq!(first.max, 0.71);
    approx::assert_relative_eq!(first.min, 0.44);
    assert!(stats[2].is_none());
}

#[test]
fn tooltip_lists_only_matching_campaigns() {
    let comparison = comparison();

    // Mar 10 is day 190, Mar 15 is day 195.
    let near_mar_10 = comparison.tooltip_at(190.3).expect("tooltip");
    assert_eq!(near_mar_10.len(), 1);
    assert_eq!(near_mar_10[0].label, "Campaign 2022/2023");
    assert_eq!(near_mar_10[0].date, date(2023, 3, 10));

    let nothing = comparison.tooltip_at(250.0).expect("tooltip");
    assert!(nothing.is_empty());

    let slots = comparison.match_at(0.4).expect("slots");
    assert_eq!(slots.len(), 3);
    assert!(slots[0].is_some());
    assert!(slots[1].is_none());
    assert!(slots[2].is_none());
}

#[test]
fn equivalent_queries_are_oldest_first() {
    let comparison = comparison();
    let selected = comparison.point(1, 1).expect("point");
    assert_eq!(selected.date, date(2023, 3, 10));

    let queries = comparison
        .equivalent_queries(selected.date, Campaign::new(2023).expect("campaign"))
        .expect("queries");

    let years: Vec<i32> = queries.iter().map(|q| q.campaign.end_year()).collect();
    assert_eq!(years, vec![2022, 2023, 2024]);
    let dates: Vec<NaiveDate> = queries.iter().map(|q| q.date).collect();
    assert_eq!(
        dates,
        vec![date(2022, 3, 10), date(2023, 3, 10), date(2024, 3, 10)]
    );
    assert!(queries.iter().all(|q| q.day_index.get() == 190));
    assert_eq!(queries[2].window.start, date(2024, 2, 29));
    assert_eq!(queries[2].window.end, date(2024, 3, 20));
}

#[test]
fn lookup_finds_the_closest_observation_in_each_campaign() {
    let comparison = comparison();
    let lookup = SeriesObservationLookup::new(comparison.series());

    let found = comparison
        .lookup_equivalents(
            date(2023, 3, 10),
            Campaign::new(2023).expect("campaign"),
            &lookup,
        )
        .expect("lookup");

    assert_eq!(found.len(), 3);
    assert!(found[0].observation.is_none());
    assert_eq!(found[1].observation.map(|p| p.date), Some(date(2023, 3, 10)));
    assert_eq!(found[2].observation.map(|p| p.date), Some(date(2024, 3, 15)));
}

struct FailingLookup;

impl ObservationLookup for FailingLookup {
    type Observation = String;

    fn find_observation(&self, query: &EquivalentDateQuery) -> AlignResult<Option<String>> {
        if query.campaign.end_year() == 2022 {
            return Err(AlignError::InvalidData("lookup offline".to_owned()));
        }
        Ok(Some(format!("ndvi-{}", query.date)))
    }
}

#[test]
fn lookup_errors_propagate() {
    let comparison = comparison();
    let err = comparison
        .lookup_equivalents(
            date(2023, 3, 10),
            Campaign::new(2023).expect("campaign"),
            &FailingLookup,
        )
        .expect_err("lookup error");
    assert_eq!(err, AlignError::InvalidData("lookup offline".to_owned()));
}

#[test]
fn custom_lookup_receives_every_query() {
    let inputs = vec![
        CampaignSamples::new(Campaign::new(2021).expect("campaign"), Vec::new()),
        CampaignSamples::new(
            Campaign::new(2020).expect("campaign"),
            vec![Sample::new(date(2019, 10, 1), 0.3).expect("sample")],
        ),
    ];
    let comparison = CampaignComparison::new(ComparisonConfig::default(), inputs).expect("comparison");

    let found: Vec<EquivalentObservation<String>> = comparison
        .lookup_equivalents(
            date(2019, 10, 1),
            Campaign::new(2020).expect("campaign"),
            &FailingLookup,
        )
        .expect("lookup");

    assert_eq!(found[0].query.campaign.end_year(), 2020);
    assert_eq!(found[0].observation.as_deref(), Some("ndvi-2019-10-01"));
    assert_eq!(found[1].observation.as_deref(), Some("ndvi-2020-10-01"));
}

#[test]
fn dates_at_index_cover_every_campaign() {
    let dates = comparison()
        .dates_at_index(DayIndex::JANUARY_FIRST)
        .expect("dates");

    let expected: Vec<(i32, NaiveDate)> = vec![
        (2022, date(2022, 1, 1)),
        (2023, date(2023, 1, 1)),
        (2024, date(2024, 1, 1)),
    ];
    let actual: Vec<(i32, NaiveDate)> = dates
        .into_iter()
        .map(|(campaign, date)| (campaign.end_year(), date))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn rejects_too_many_campaigns() {
    let inputs = (2020..2025)
        .map(|year| CampaignSamples::new(Campaign::new(year).expect("campaign"), Vec::new()))
        .collect();
    let err = CampaignComparison::new(ComparisonConfig::default(), inputs).expect_err("too many");
    assert!(matches!(err, AlignError::InvalidData(_)));

    let wider = ComparisonConfig::default().with_max_campaigns(5);
    let inputs = (2020..2025)
        .map(|year| CampaignSamples::new(Campaign::new(year).expect("campaign"), Vec::new()))
        .collect();
    assert!(CampaignComparison::new(wider, inputs).is_ok());
}

#[test]
fn malformed_sample_dates_fail_the_build() {
    let payload = r#"{ "campaigns": [ { "year": 2024, "samples": [ { "date": "2024-02-31", "value": 0.5 } ] } ] }"#;
    let err = CampaignComparison::from_json_str(ComparisonConfig::default(), payload)
        .expect_err("invalid date");
    assert!(matches!(err, AlignError::InvalidDate(_)));
}

#[test]
fn click_on_missing_point_is_reported() {
    assert!(comparison().point(2, 0).is_err());
    assert!(comparison().point(7, 0).is_err());
}
