pub mod day_index;
pub mod equivalent_date;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod types;
pub mod windowing;

pub use day_index::DayIndexConverter;
pub use equivalent_date::{DEFAULT_SEARCH_MARGIN_DAYS, EquivalentDateQuery, EquivalentDateResolver};
pub use primitives::{decimal_to_f64, parse_iso_date};
pub use scale::DayAxisScale;
pub use series::{
    AlignedPoint, CampaignSamples, Sample, SamplePayload, Series, SeriesAligner, SeriesStats,
};
pub use types::{CAMPAIGN_DAYS, Campaign, DayIndex, LeapDayPolicy};
pub use windowing::{DateWindow, points_in_date_window};
