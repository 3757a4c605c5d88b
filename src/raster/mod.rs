mod grid;
mod index;
mod source;

pub use grid::{Acquisition, RasterGrid};
pub use index::ndvi;
pub use source::RasterSource;
