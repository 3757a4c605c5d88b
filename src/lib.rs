#![doc = "Hexcast public API"]
mod common;
mod geom;
mod hex;
mod pipeline;
mod raster;
mod region;
mod vector;

#[doc(inline)]
pub use common::{read_from_csv, write_to_csv, PipelineConfig, PipelineError, Strategy, TimeAgg};

#[doc(inline)]
pub use raster::{ndvi, Acquisition, RasterGrid, RasterSource};

#[doc(inline)]
pub use region::Region;

#[doc(inline)]
pub use vector::{reproject_features, vectorize, Value, VectorFeature};

#[doc(inline)]
pub use hex::{
    aggregate_records, cell_polygon, h3_aggregation, vector_to_h3, AggregatedCell,
    AggregationKey, H3Hierarchy, Hierarchy, HexRecord, MapOptions,
};

#[doc(inline)]
pub use pipeline::run_pipeline;
