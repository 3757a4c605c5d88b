use ahash::AHashMap;
use anyhow::Result;
use geo::Point;
use h3o::{CellIndex, LatLng};
use polars::{frame::DataFrame, prelude::Column};
use tracing::debug;
use wkt::ToWkt;

use crate::common::{PipelineError, Strategy, TimeAgg};
use crate::region::Region;

use super::hierarchy::Hierarchy;
use super::mapper::parse_resolution;
use super::record::{cell_polygon, HexRecord};

/// Grouping key: coarse cell plus optional time-bucket label.
///
/// The aggregated output has exactly one row per distinct key present in the
/// input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregationKey {
    pub cell: CellIndex,
    pub bucket: Option<String>,
}

/// One aggregated output row. `value` is `None` when a group held only
/// categorical records; `count` is the number of input records in the group.
#[derive(Debug, Clone)]
pub struct AggregatedCell {
    pub key: AggregationKey,
    pub value: Option<f64>,
    pub count: u32,
    pub geometry: Option<geo::Polygon<f64>>,
}

/// Regroup fine-resolution records by their ancestor cell at `resolution` and
/// an optional time bucket, reducing each group's numeric values with
/// `strategy`.
///
/// Coarsening only: `resolution` must be coarser than or equal to every input
/// record's resolution, otherwise `InvalidResolution`. Rows whose coarse-cell
/// centroid falls outside `region` are dropped. Output rows are sorted by
/// (bucket, cell), which also makes the result set stable across runs.
pub fn aggregate_records<H: Hierarchy>(
    records: &[HexRecord],
    region: &Region,
    hierarchy: &H,
    resolution: u8,
    time_agg: Option<TimeAgg>,
    strategy: Strategy,
    include_geometry: bool,
) -> Result<Vec<AggregatedCell>> {
    let target = parse_resolution(resolution)?;

    let mut groups: AHashMap<AggregationKey, (Vec<f64>, u32)> = AHashMap::new();
    for record in records {
        let parent = hierarchy.ancestor_at(record.cell, target)?;
        let bucket = match time_agg {
            Some(agg) => {
                let date = record.timestamp.ok_or(PipelineError::MissingTimestamp)?;
                Some(agg.bucket(date))
            }
            None => None,
        };

        let entry = groups.entry(AggregationKey { cell: parent, bucket }).or_default();
        if let Some(value) = record.value.as_numeric() {
            entry.0.push(value);
        }
        entry.1 += 1;
    }

    let mut rows = Vec::with_capacity(groups.len());
    for (key, (values, count)) in groups {
        let center = LatLng::from(key.cell);
        if !region.contains_point(&Point::new(center.lng(), center.lat())) {
            continue;
        }

        rows.push(AggregatedCell {
            value: (!values.is_empty()).then(|| strategy.reduce(&values)),
            geometry: include_geometry.then(|| cell_polygon(key.cell)),
            count,
            key,
        });
    }

    rows.sort_by(|a, b| {
        (a.key.bucket.as_deref(), u64::from(a.key.cell))
            .cmp(&(b.key.bucket.as_deref(), u64::from(b.key.cell)))
    });

    debug!(records = records.len(), groups = rows.len(), "aggregated hexagons");
    Ok(rows)
}

/// `aggregate_records` assembled into a Polars table.
///
/// Columns: `hex` (cell index string), `date` (bucket label, present only
/// when `time_agg` is set), `value`, `count`, and `geometry` (WKT, present
/// only when `include_geometry` is set).
pub fn h3_aggregation<H: Hierarchy>(
    records: &[HexRecord],
    region: &Region,
    hierarchy: &H,
    resolution: u8,
    time_agg: Option<TimeAgg>,
    strategy: Strategy,
    include_geometry: bool,
) -> Result<DataFrame> {
    let rows = aggregate_records(
        records,
        region,
        hierarchy,
        resolution,
        time_agg,
        strategy,
        include_geometry,
    )?;

    let hex: Vec<String> = rows.iter().map(|row| row.key.cell.to_string()).collect();
    let mut columns = vec![Column::new("hex".into(), hex)];

    if time_agg.is_some() {
        let date: Vec<String> = rows
            .iter()
            .map(|row| row.key.bucket.clone().unwrap_or_default())
            .collect();
        columns.push(Column::new("date".into(), date));
    }

    let value: Vec<Option<f64>> = rows.iter().map(|row| row.value).collect();
    columns.push(Column::new("value".into(), value));

    let count: Vec<u32> = rows.iter().map(|row| row.count).collect();
    columns.push(Column::new("count".into(), count));

    if include_geometry {
        let geometry: Vec<String> = rows
            .iter()
            .map(|row| {
                row.geometry
                    .as_ref()
                    .map(|polygon| polygon.wkt_string())
                    .unwrap_or_default()
            })
            .collect();
        columns.push(Column::new("geometry".into(), geometry));
    }

    Ok(DataFrame::new(columns)?)
}
