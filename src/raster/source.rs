use anyhow::Result;
use chrono::NaiveDate;

use crate::region::Region;

use super::RasterGrid;

/// Boundary to the download layer: anything that can produce rasters for a
/// region and date window. Implementations (Sentinel-2 NDVI, Sentinel-5P
/// atmospheric layers, GHSL settlement grids) live outside this crate; the
/// pipeline only sees the rasters they yield.
pub trait RasterSource {
    /// Dataset name, for logging and provenance.
    fn name(&self) -> &str;

    /// Fetch every raster overlapping `region` acquired within `[start, end]`.
    fn fetch(&self, region: &Region, start: NaiveDate, end: NaiveDate) -> Result<Vec<RasterGrid>>;
}
