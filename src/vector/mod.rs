mod feature;
mod vectorize;

pub use feature::{Value, VectorFeature};
pub use vectorize::{reproject_features, vectorize};
