//! campaign-align: campaign-relative temporal alignment for multi-campaign
//! vegetation index comparisons.
//!
//! Agricultural campaigns run from Sep 1 to Aug 31 and are named by their
//! ending year. The engine places every campaign on one shared 0–364 day axis
//! so several years can be overlaid, matched under a cursor, and cross
//! referenced ("the same moment" in another campaign).
//!
//! All operations are pure functions over immutable values.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{CampaignComparison, ComparisonConfig};
pub use crate::core::{Campaign, DayIndex, DayIndexConverter, EquivalentDateResolver, SeriesAligner};
pub use error::{AlignError, AlignResult};
pub use interaction::{NearestPointMatcher, match_all};
