mod config;
mod data;
mod error;

pub use config::{PipelineConfig, Strategy, TimeAgg};
pub use data::{read_from_csv, write_to_csv};
pub use error::PipelineError;
