use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_SEARCH_MARGIN_DAYS, LeapDayPolicy};
use crate::error::{AlignError, AlignResult};
use crate::interaction::DEFAULT_MATCH_TOLERANCE;

/// The dashboard compares the three most recent campaigns.
pub const DEFAULT_MAX_CAMPAIGNS: usize = 3;

/// Half a campaign.
pub const MAX_SEARCH_MARGIN_DAYS: u32 = 182;

/// Public comparison configuration.
///
/// Every field has a serde default, so hosts can persist only what they
/// override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    #[serde(default = "default_match_tolerance")]
    pub match_tolerance: f64,
    #[serde(default = "default_search_margin_days")]
    pub search_margin_days: u32,
    #[serde(default)]
    pub leap_day_policy: LeapDayPolicy,
    #[serde(default = "default_max_campaigns")]
    pub max_campaigns: usize,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            match_tolerance: default_match_tolerance(),
            search_margin_days: default_search_margin_days(),
            leap_day_policy: LeapDayPolicy::default(),
            max_campaigns: default_max_campaigns(),
        }
    }
}

impl ComparisonConfig {
    #[must_use]
    pub fn with_match_tolerance(mut self, match_tolerance: f64) -> Self {
        self.match_tolerance = match_tolerance;
        self
    }

    #[must_use]
    pub fn with_search_margin_days(mut self, search_margin_days: u32) -> Self {
        self.search_margin_days = search_margin_days;
        self
    }

    #[must_use]
    pub fn with_leap_day_policy(mut self, leap_day_policy: LeapDayPolicy) -> Self {
        self.leap_day_policy = leap_day_policy;
        self
    }

    #[must_use]
    pub fn with_max_campaigns(mut self, max_campaigns: usize) -> Self {
        self.max_campaigns = max_campaigns;
        self
    }

    pub fn validate(self) -> AlignResult<Self> {
        if !self.match_tolerance.is_finite() || self.match_tolerance < 0.0 {
            return Err(AlignError::InvalidData(
                "match tolerance must be finite and >= 0".to_owned(),
            ));
        }
        if self.search_margin_days > MAX_SEARCH_MARGIN_DAYS {
            return Err(AlignError::InvalidData(format!(
                "search margin must be <= {MAX_SEARCH_MARGIN_DAYS} days"
            )));
        }
        if self.max_campaigns == 0 {
            return Err(AlignError::InvalidData(
                "max campaigns must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> AlignResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            AlignError::InvalidData(format!("failed to parse comparison config: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> AlignResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            AlignError::InvalidData(format!("failed to serialize comparison config: {e}"))
        })
    }
}

fn default_match_tolerance() -> f64 {
    DEFAULT_MATCH_TOLERANCE
}

fn default_search_margin_days() -> u32 {
    DEFAULT_SEARCH_MARGIN_DAYS
}

fn default_max_campaigns() -> usize {
    DEFAULT_MAX_CAMPAIGNS
}
