mod aggregate;
mod hierarchy;
mod mapper;
mod record;

pub use aggregate::{aggregate_records, h3_aggregation, AggregatedCell, AggregationKey};
pub use hierarchy::{H3Hierarchy, Hierarchy};
pub use mapper::{vector_to_h3, MapOptions};
pub use record::{cell_polygon, HexRecord};
