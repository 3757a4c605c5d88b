use anyhow::{bail, Result};
use ndarray::Array2;

// Guards the denominator where NIR + Red is zero (water, shadow).
const EPSILON: f64 = 1e-8;

/// Normalized Difference Vegetation Index: (NIR − Red) / (NIR + Red).
pub fn ndvi(red: &Array2<f64>, nir: &Array2<f64>) -> Result<Array2<f64>> {
    if red.dim() != nir.dim() {
        bail!(
            "band shape mismatch: red is {:?}, nir is {:?}",
            red.dim(),
            nir.dim()
        );
    }
    Ok((nir - red) / (nir + red + EPSILON))
}
