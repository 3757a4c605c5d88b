use thiserror::Error;

/// Errors raised by pipeline stages on caller-input violations.
///
/// Every variant is a precondition failure: the detecting stage raises it
/// immediately and nothing is retried or partially returned. Boundary
/// conditions (nodata cells, features outside the region) are silent
/// exclusions, not errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Raster and region declare different coordinate reference systems.
    #[error("raster CRS (EPSG:{raster}) does not match region CRS (EPSG:{region})")]
    ShapeMismatch { raster: u32, region: u32 },

    /// Every cell of the raster equals the nodata sentinel.
    #[error("raster has no usable cells (every value is nodata)")]
    EmptyRaster,

    /// Resolution outside the H3 range, or an aggregation target finer than
    /// the input records.
    #[error("invalid H3 resolution: {0}")]
    InvalidResolution(String),

    /// Temporal aggregation was requested on records without timestamps.
    #[error("time aggregation requested but a record carries no timestamp")]
    MissingTimestamp,

    /// Reduction strategy name not among mean/sum/min/max.
    #[error("unknown aggregation strategy: {0:?}")]
    UnknownStrategy(String),
}
