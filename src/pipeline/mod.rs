use anyhow::Result;
use polars::frame::DataFrame;
use tracing::info;

use crate::common::PipelineConfig;
use crate::hex::{h3_aggregation, vector_to_h3, H3Hierarchy, MapOptions};
use crate::raster::RasterGrid;
use crate::region::Region;
use crate::vector::{reproject_features, vectorize, VectorFeature};

/// Run the full raster→hexagon pipeline over a batch of rasters.
///
/// Each raster is vectorized, the features are mapped onto H3 cells at
/// `config.fine_resolution`, and the records are aggregated at
/// `config.coarse_resolution`. Rasters in a metric CRS are handled by
/// projecting the region into the raster CRS for vectorization and
/// projecting the features back afterwards; `vectorize` itself requires CRS
/// equality. Every stage is pure and the caller owns all inputs and outputs.
pub fn run_pipeline(
    rasters: &[RasterGrid],
    region: &Region,
    config: &PipelineConfig,
) -> Result<DataFrame> {
    let mut features: Vec<VectorFeature> = Vec::new();
    for raster in rasters {
        let batch = if raster.epsg() == region.epsg() {
            vectorize(raster, region)?
        } else {
            let local = region.to_epsg(raster.epsg())?;
            reproject_features(&vectorize(raster, &local)?, raster.epsg(), region.epsg())?
        };
        features.extend(batch);
    }
    info!(
        rasters = rasters.len(),
        features = features.len(),
        "vectorized input rasters"
    );

    let records = vector_to_h3(
        &features,
        region,
        config.fine_resolution,
        MapOptions {
            include_geometry: false,
            area_weighted: config.area_weighted,
        },
    )?;

    h3_aggregation(
        &records,
        region,
        &H3Hierarchy,
        config.coarse_resolution,
        config.time_agg,
        config.strategy,
        config.include_geometry,
    )
}
