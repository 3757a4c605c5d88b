use anyhow::Result;
use geo::{Area, BooleanOps, MultiPolygon};
use h3o::{
    geom::{ContainmentMode, PolyfillConfig, Polygon as H3Polygon, ToCells},
    Resolution,
};
use tracing::debug;

use crate::common::PipelineError;
use crate::region::Region;
use crate::vector::VectorFeature;

use super::record::{cell_polygon, HexRecord};

/// Options for the feature→hexagon mapping stage; both default off.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapOptions {
    /// Attach each cell's boundary polygon to its records.
    pub include_geometry: bool,
    /// Scale numeric values by the cell∩feature overlap fraction instead of
    /// copying them verbatim.
    pub area_weighted: bool,
}

/// Map vector features onto H3 cells at `resolution` (0–15, finer = larger).
///
/// Enumeration is overlap-based: every cell whose hexagon intersects a
/// feature's geometry receives one record carrying the feature's full value,
/// not centroid containment and not an area split (unless `area_weighted`).
/// Cells that do not intersect `region` are excluded even when they overlap
/// the feature, since raster alignment lets features spill past the region
/// edge. A feature left with no surviving cell is silently dropped.
pub fn vector_to_h3(
    features: &[VectorFeature],
    region: &Region,
    resolution: u8,
    options: MapOptions,
) -> Result<Vec<HexRecord>> {
    let resolution = parse_resolution(resolution)?;
    let config = PolyfillConfig::new(resolution).containment_mode(ContainmentMode::Covers);

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for feature in features {
        let polygon = match H3Polygon::from_degrees(feature.geometry.clone()) {
            Ok(polygon) => polygon,
            Err(_) => {
                // Degenerate geometry; boundary behavior, not failure.
                dropped += 1;
                continue;
            }
        };
        let feature_area = feature.geometry.unsigned_area();

        let mut matched = false;
        for cell in polygon.to_cells(config) {
            let boundary = cell_polygon(cell);
            if !region.intersects(&boundary) {
                continue;
            }

            let value = if options.area_weighted && feature_area > 0.0 {
                let overlap = MultiPolygon(vec![boundary.clone()])
                    .intersection(&MultiPolygon(vec![feature.geometry.clone()]))
                    .unsigned_area();
                feature.value.scaled(overlap / feature_area)
            } else {
                feature.value.clone()
            };

            records.push(HexRecord {
                cell,
                value,
                timestamp: feature.timestamp,
                geometry: options.include_geometry.then(|| boundary),
            });
            matched = true;
        }
        if !matched {
            dropped += 1;
        }
    }

    debug!(
        features = features.len(),
        records = records.len(),
        dropped,
        "mapped features to hexagons"
    );
    Ok(records)
}

/// Validate a caller-supplied resolution against the H3 range.
pub(crate) fn parse_resolution(resolution: u8) -> Result<Resolution> {
    Resolution::try_from(resolution).map_err(|_| {
        PipelineError::InvalidResolution(format!("{resolution} is outside the H3 range 0-15"))
            .into()
    })
}
