use std::sync::Arc;

use chrono::NaiveDate;
use geo::Polygon;

/// Attribute value carried through the pipeline. Numeric values participate
/// in aggregation; categorical values survive mapping but are excluded from
/// reduction (mode aggregation is a non-goal).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(f64),
    Categorical(Arc<str>),
}

impl Value {
    /// Numeric payload, if any.
    #[inline]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Numeric(value) => Some(*value),
            Value::Categorical(_) => None,
        }
    }

    /// Copy with the numeric payload scaled; categorical values pass through.
    pub(crate) fn scaled(&self, factor: f64) -> Value {
        match self {
            Value::Numeric(value) => Value::Numeric(value * factor),
            other => other.clone(),
        }
    }
}

/// One vectorized raster cell: the clipped footprint polygon, its attribute
/// value, and the acquisition date inherited from the source raster.
///
/// Invariants: the geometry has positive area and the value is never the
/// source raster's nodata sentinel (nodata cells are dropped before features
/// are built).
#[derive(Debug, Clone)]
pub struct VectorFeature {
    pub geometry: Polygon<f64>,
    pub value: Value,
    pub timestamp: Option<NaiveDate>,
}
