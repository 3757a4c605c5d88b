use chrono::NaiveDate;
use geo::{Coord, LineString, Polygon};
use h3o::CellIndex;

use crate::vector::Value;

/// One hexagon-level observation: a cell at the mapping resolution, the
/// attribute value replicated (or area-weighted) from a source feature, and
/// that feature's acquisition date.
#[derive(Debug, Clone)]
pub struct HexRecord {
    pub cell: CellIndex,
    pub value: Value,
    pub timestamp: Option<NaiveDate>,
    /// Cell boundary, attached only when requested at mapping time.
    pub geometry: Option<Polygon<f64>>,
}

/// Cell boundary as a lon/lat polygon (EPSG:4326).
pub fn cell_polygon(cell: CellIndex) -> Polygon<f64> {
    let ring: Vec<Coord<f64>> = cell
        .boundary()
        .iter()
        .map(|vertex| Coord { x: vertex.lng(), y: vertex.lat() })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}
