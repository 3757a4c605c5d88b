use anyhow::Result;
use geo::Area;
use tracing::debug;

use crate::common::PipelineError;
use crate::geom::Reprojection;
use crate::raster::RasterGrid;
use crate::region::Region;

use super::{Value, VectorFeature};

/// Convert a raster into vector features, one per usable data cell.
///
/// Cells equal to the nodata sentinel (or NaN) are skipped. Surviving cell
/// footprints are clipped to `region`; features whose clipped geometry is
/// degenerate (zero area) are silently dropped. Every feature inherits the
/// raster's acquisition date. Output order is row-major over the grid and
/// carries no meaning downstream.
///
/// Fails with `ShapeMismatch` when the raster's CRS differs from the
/// region's, and with `EmptyRaster` when every cell is nodata.
pub fn vectorize(raster: &RasterGrid, region: &Region) -> Result<Vec<VectorFeature>> {
    if raster.epsg() != region.epsg() {
        return Err(PipelineError::ShapeMismatch {
            raster: raster.epsg(),
            region: region.epsg(),
        }
        .into());
    }

    let date = raster.acquired().date();
    let mut features = Vec::new();
    let mut usable = 0usize;

    for ((row, col), &value) in raster.values().indexed_iter() {
        if raster.is_nodata(value) {
            continue;
        }
        usable += 1;

        let footprint = raster.cell_polygon(row, col);
        for clipped in region.clip(&footprint) {
            if clipped.unsigned_area() <= 0.0 {
                continue;
            }
            features.push(VectorFeature {
                geometry: clipped,
                value: Value::Numeric(value),
                timestamp: Some(date),
            });
        }
    }

    if usable == 0 {
        return Err(PipelineError::EmptyRaster.into());
    }

    debug!(cells = usable, features = features.len(), "vectorized raster");
    Ok(features)
}

/// Reproject feature geometries between CRSs; values and dates pass through.
pub fn reproject_features(
    features: &[VectorFeature],
    from_epsg: u32,
    to_epsg: u32,
) -> Result<Vec<VectorFeature>> {
    let projection = Reprojection::new(from_epsg, to_epsg)?;
    features
        .iter()
        .map(|feature| {
            Ok(VectorFeature {
                geometry: projection.apply(&feature.geometry)?,
                value: feature.value.clone(),
                timestamp: feature.timestamp,
            })
        })
        .collect()
}
