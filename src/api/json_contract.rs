use serde::{Deserialize, Serialize};

use crate::core::{Campaign, CampaignSamples, Sample, SamplePayload, Series, parse_iso_date};
use crate::error::{AlignError, AlignResult};

use super::MonthTick;

pub const COMPARISON_PAYLOAD_JSON_SCHEMA_V1: u32 = 1;
pub const CHART_SERIES_JSON_SCHEMA_V1: u32 = 1;

/// Observation as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// ISO-8601 calendar date.
    pub date: String,
    pub value: f64,
    #[serde(flatten)]
    pub extra: SamplePayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// Display name; defaults to the campaign label when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Campaign end year.
    pub year: i32,
    #[serde(default)]
    pub samples: Vec<SampleRecord>,
}

/// Per-parcel comparison input: one record per campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayload {
    pub campaigns: Vec<CampaignRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPayloadJsonContractV1 {
    pub schema_version: u32,
    pub payload: ComparisonPayload,
}

/// Chart-renderer output: aligned series plus the month tick layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeriesJsonContractV1<'a> {
    pub schema_version: u32,
    pub series: &'a [Series],
    pub month_ticks: &'a [MonthTick],
}

impl SampleRecord {
    pub fn to_sample(&self) -> AlignResult<Sample> {
        let date = parse_iso_date(&self.date)?;
        let mut sample = Sample::new(date, self.value)?;
        sample.payload = self.extra.clone();
        Ok(sample)
    }
}

impl CampaignRecord {
    pub fn to_campaign_samples(&self) -> AlignResult<CampaignSamples> {
        let campaign = Campaign::new(self.year)?;
        let samples = self
            .samples
            .iter()
            .map(SampleRecord::to_sample)
            .collect::<AlignResult<Vec<_>>>()?;

        let input = CampaignSamples::new(campaign, samples);
        Ok(match &self.name {
            Some(name) => input.with_label(name.clone()),
            None => input,
        })
    }
}

impl ComparisonPayload {
    /// Accepts either a bare payload or a versioned v1 contract.
    pub fn from_json_compat_str(input: &str) -> AlignResult<Self> {
        if let Ok(payload) = serde_json::from_str::<ComparisonPayload>(input) {
            return Ok(payload);
        }
        let contract: ComparisonPayloadJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                AlignError::InvalidData(format!("failed to parse comparison json payload: {e}"))
            })?;
        if contract.schema_version != COMPARISON_PAYLOAD_JSON_SCHEMA_V1 {
            return Err(AlignError::InvalidData(format!(
                "unsupported comparison payload schema version: {}",
                contract.schema_version
            )));
        }
        Ok(contract.payload)
    }

    pub fn to_json_contract_v1_pretty(&self) -> AlignResult<String> {
        let contract = ComparisonPayloadJsonContractV1 {
            schema_version: COMPARISON_PAYLOAD_JSON_SCHEMA_V1,
            payload: self.clone(),
        };
        serde_json::to_string_pretty(&contract).map_err(|e| {
            AlignError::InvalidData(format!("failed to serialize comparison contract v1: {e}"))
        })
    }
}

pub fn chart_series_json_contract_v1_pretty(
    series: &[Series],
    month_ticks: &[MonthTick],
) -> AlignResult<String> {
    let contract = ChartSeriesJsonContractV1 {
        schema_version: CHART_SERIES_JSON_SCHEMA_V1,
        series,
        month_ticks,
    };
    serde_json::to_string_pretty(&contract).map_err(|e| {
        AlignError::InvalidData(format!("failed to serialize chart series contract v1: {e}"))
    })
}
