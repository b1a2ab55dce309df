//! Comparison facade consumed by dashboards: builds every campaign series of
//! a parcel, answers cursor/click queries, and exchanges versioned JSON with
//! the data source and the chart renderer.

mod axis_ticks;
mod comparison;
mod comparison_config;
mod json_contract;
mod observation_lookup;

pub use axis_ticks::{MONTH_LABEL_TOLERANCE_DAYS, MONTH_TICKS, MonthTick, month_tick_label};
pub use comparison::{CampaignComparison, EquivalentObservation};
pub use comparison_config::{
    ComparisonConfig, DEFAULT_MAX_CAMPAIGNS, MAX_SEARCH_MARGIN_DAYS,
};
pub use json_contract::{
    CHART_SERIES_JSON_SCHEMA_V1, COMPARISON_PAYLOAD_JSON_SCHEMA_V1, CampaignRecord,
    ChartSeriesJsonContractV1, ComparisonPayload, ComparisonPayloadJsonContractV1, SampleRecord,
    chart_series_json_contract_v1_pretty,
};
pub use observation_lookup::{ObservationLookup, SeriesObservationLookup};
