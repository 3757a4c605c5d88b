use std::str::FromStr;

use anyhow::bail;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::PipelineError;

/// Reduction applied to the numeric values of each (hexagon, time bucket) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mean,
    Sum,
    Min,
    Max,
}

impl Strategy {
    /// Reduce a non-empty group of values. A group of size one reduces to
    /// itself under every strategy; empty groups never reach this point
    /// because groups are formed from non-empty input partitions.
    pub(crate) fn reduce(self, values: &[f64]) -> f64 {
        debug_assert!(!values.is_empty(), "reduction over an empty group");
        match self {
            Strategy::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Strategy::Sum => values.iter().sum(),
            Strategy::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            Strategy::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

impl FromStr for Strategy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mean" => Ok(Strategy::Mean),
            "sum" => Ok(Strategy::Sum),
            "min" => Ok(Strategy::Min),
            "max" => Ok(Strategy::Max),
            other => Err(PipelineError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Temporal bucket granularity. Absence of a `TimeAgg` (the `Option::None`
/// case at call sites) puts all records in one constant bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeAgg {
    Daily,
    Monthly,
    Yearly,
}

impl TimeAgg {
    /// Bucket label for a date: calendar date, year-month, or year.
    pub(crate) fn bucket(self, date: NaiveDate) -> String {
        let pattern = match self {
            TimeAgg::Daily => "%Y-%m-%d",
            TimeAgg::Monthly => "%Y-%m",
            TimeAgg::Yearly => "%Y",
        };
        date.format(pattern).to_string()
    }
}

impl FromStr for TimeAgg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(TimeAgg::Daily),
            "monthly" => Ok(TimeAgg::Monthly),
            "yearly" => Ok(TimeAgg::Yearly),
            other => bail!("invalid time aggregation: {other:?} (expected daily, monthly, or yearly)"),
        }
    }
}

/// Explicit configuration for one pipeline run. There are no process-wide
/// defaults; every top-level call receives its own config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// H3 resolution for the feature→hexagon mapping stage (finer).
    pub fine_resolution: u8,
    /// H3 resolution for the aggregation stage (coarser, ≤ fine).
    pub coarse_resolution: u8,
    /// Temporal bucketing; `None` groups all records together.
    pub time_agg: Option<TimeAgg>,
    /// Per-group reduction.
    pub strategy: Strategy,
    /// Attach hexagon boundary polygons (as WKT) to the output table.
    pub include_geometry: bool,
    /// Scale replicated values by overlap fraction instead of copying them.
    pub area_weighted: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fine_resolution: 10,
            coarse_resolution: 8,
            time_agg: None,
            strategy: Strategy::Mean,
            include_geometry: false,
            area_weighted: false,
        }
    }
}
