use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[cfg(feature = "parallel-alignment")]
use rayon::prelude::*;

use crate::core::primitives::decimal_to_f64;
use crate::core::{Campaign, DayIndex, DayIndexConverter};
use crate::error::{AlignError, AlignResult};

/// Extra observation fields carried through alignment untouched.
pub type SamplePayload = IndexMap<String, serde_json::Value>;

/// Dated observation of one campaign (e.g. a mean NDVI value).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub payload: SamplePayload,
}

impl Sample {
    pub fn new(date: NaiveDate, value: f64) -> AlignResult<Self> {
        if !value.is_finite() {
            return Err(AlignError::InvalidData(format!(
                "sample value on {date} must be finite"
            )));
        }
        Ok(Self {
            date,
            value,
            payload: SamplePayload::new(),
        })
    }

    pub fn from_decimal_value(date: NaiveDate, value: Decimal) -> AlignResult<Self> {
        Self::new(date, decimal_to_f64(value, "sample value")?)
    }

    #[must_use]
    pub fn with_payload_field(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }
}

/// Sample projected on the shared day-index axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub day_index: DayIndex,
    pub value: f64,
    /// Original observation date, kept for display.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub payload: SamplePayload,
}

/// Summary shown next to each campaign in the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// One campaign's points ordered by ascending day index.
///
/// Built only through [`SeriesAligner`], so the ordering always holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    campaign: Campaign,
    label: String,
    points: Vec<AlignedPoint>,
}

impl Series {
    #[must_use]
    pub fn empty(campaign: Campaign, label: impl Into<String>) -> Self {
        Self {
            campaign,
            label: label.into(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn campaign(&self) -> Campaign {
        self.campaign
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn points(&self) -> &[AlignedPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlignedPoint> {
        self.points.iter()
    }

    /// Mean/min/max of the values, `None` when the series has no points.
    #[must_use]
    pub fn stats(&self) -> Option<SeriesStats> {
        if self.points.is_empty() {
            return None;
        }

        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in &self.points {
            sum += point.value;
            min = min.min(point.value);
            max = max.max(point.value);
        }

        let count = self.points.len();
        Some(SeriesStats {
            count,
            mean: sum / count as f64,
            min,
            max,
        })
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a AlignedPoint;
    type IntoIter = std::slice::Iter<'a, AlignedPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Input of a single campaign for [`SeriesAligner::align_all`].
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignSamples {
    pub campaign: Campaign,
    pub label: String,
    pub samples: Vec<Sample>,
}

impl CampaignSamples {
    /// Uses the campaign's default label.
    #[must_use]
    pub fn new(campaign: Campaign, samples: Vec<Sample>) -> Self {
        Self {
            campaign,
            label: campaign.label(),
            samples,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Projects per-campaign samples onto the day-index axis.
///
/// Only observed samples are emitted: no interpolation, no gap filling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesAligner {
    converter: DayIndexConverter,
}

impl SeriesAligner {
    #[must_use]
    pub fn new(converter: DayIndexConverter) -> Self {
        Self { converter }
    }

    #[must_use]
    pub fn converter(self) -> DayIndexConverter {
        self.converter
    }

    /// Aligns one campaign. Ties on the day index keep their input order.
    pub fn align(
        self,
        samples: impl IntoIterator<Item = Sample>,
        campaign: Campaign,
        label: impl Into<String>,
    ) -> AlignResult<Series> {
        let label = label.into();
        let mut points = samples
            .into_iter()
            .map(|sample| {
                let day_index = self.converter.to_day_index(sample.date, campaign)?;
                Ok(AlignedPoint {
                    day_index,
                    value: sample.value,
                    date: sample.date,
                    payload: sample.payload,
                })
            })
            .collect::<AlignResult<Vec<_>>>()?;

        // `sort_by_key` is stable.
        points.sort_by_key(|point| point.day_index);

        debug!(
            campaign = campaign.end_year(),
            label = %label,
            points = points.len(),
            "aligned campaign series"
        );

        Ok(Series {
            campaign,
            label,
            points,
        })
    }

    /// Aligns several campaigns, preserving input order in the output.
    pub fn align_all(self, inputs: Vec<CampaignSamples>) -> AlignResult<Vec<Series>> {
        #[cfg(feature = "parallel-alignment")]
        {
            inputs
                .into_par_iter()
                .map(|input| self.align(input.samples, input.campaign, input.label))
                .collect()
        }

        #[cfg(not(feature = "parallel-alignment"))]
        {
            inputs
                .into_iter()
                .map(|input| self.align(input.samples, input.campaign, input.label))
                .collect()
        }
    }
}
