use chrono::NaiveDate;
use geo::{Coord, Polygon, Rect};
use ndarray::Array2;

/// Acquisition window of a raster: a single date or an inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    Date(NaiveDate),
    Range { start: NaiveDate, end: NaiveDate },
}

impl Acquisition {
    /// Representative date: the acquisition date itself, or the range
    /// midpoint. The endpoints are ordered first, so a swapped range yields
    /// the same midpoint.
    pub fn date(&self) -> NaiveDate {
        match *self {
            Acquisition::Date(date) => date,
            Acquisition::Range { start, end } => {
                let (lo, hi) = if end < start { (end, start) } else { (start, end) };
                lo + hi.signed_duration_since(lo) / 2
            }
        }
    }
}

/// A single-band raster: cell values plus the georeferencing needed to place
/// them. Immutable once built; consumed once by `vectorize`.
#[derive(Debug, Clone)]
pub struct RasterGrid {
    values: Array2<f64>,
    origin: Coord<f64>, // min-x / min-y corner, in CRS units
    cell_size: f64,     // in CRS units
    epsg: u32,
    nodata: f64,
    acquired: Acquisition,
}

impl RasterGrid {
    pub fn new(
        values: Array2<f64>,
        origin: Coord<f64>,
        cell_size: f64,
        epsg: u32,
        nodata: f64,
        acquired: Acquisition,
    ) -> Self {
        Self { values, origin, cell_size, epsg, nodata, acquired }
    }

    #[inline] pub fn values(&self) -> &Array2<f64> { &self.values }
    #[inline] pub fn origin(&self) -> Coord<f64> { self.origin }
    #[inline] pub fn cell_size(&self) -> f64 { self.cell_size }
    #[inline] pub fn epsg(&self) -> u32 { self.epsg }
    #[inline] pub fn nodata(&self) -> f64 { self.nodata }
    #[inline] pub fn acquired(&self) -> Acquisition { self.acquired }

    #[inline] pub fn nrows(&self) -> usize { self.values.nrows() }
    #[inline] pub fn ncols(&self) -> usize { self.values.ncols() }

    /// True if `value` means "no measurement". NaN is always nodata.
    #[inline]
    pub(crate) fn is_nodata(&self, value: f64) -> bool {
        value.is_nan() || value == self.nodata
    }

    /// Rectangular footprint of the cell at (row, col). Row 0 is the top edge
    /// of the grid, matching raster storage order.
    pub(crate) fn cell_polygon(&self, row: usize, col: usize) -> Polygon<f64> {
        let min_x = self.origin.x + col as f64 * self.cell_size;
        let min_y = self.origin.y + (self.nrows() - row - 1) as f64 * self.cell_size;
        Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: min_x + self.cell_size, y: min_y + self.cell_size },
        )
        .to_polygon()
    }
}

#[cfg(test)]
mod tests {
    use geo::{Area, Centroid};
    use ndarray::array;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_midpoint() {
        let window = Acquisition::Range { start: date(2020, 1, 1), end: date(2020, 1, 31) };
        assert_eq!(window.date(), date(2020, 1, 16));
        assert_eq!(Acquisition::Date(date(2020, 3, 1)).date(), date(2020, 3, 1));
    }

    #[test]
    fn reversed_range_has_the_same_midpoint() {
        let swapped = Acquisition::Range { start: date(2020, 1, 31), end: date(2020, 1, 1) };
        assert_eq!(swapped.date(), date(2020, 1, 16));
    }

    #[test]
    fn cell_footprints_tile_the_grid() {
        let raster = RasterGrid::new(
            array![[1.0, 2.0], [3.0, 4.0]],
            Coord { x: 10.0, y: 20.0 },
            0.5,
            4326,
            -9999.0,
            Acquisition::Date(date(2020, 1, 1)),
        );

        // Top-left cell sits above the bottom-left cell.
        let top_left = raster.cell_polygon(0, 0).centroid().unwrap();
        let bottom_left = raster.cell_polygon(1, 0).centroid().unwrap();
        assert_eq!(top_left.x(), bottom_left.x());
        assert!(top_left.y() > bottom_left.y());

        let total: f64 = (0..2)
            .flat_map(|r| (0..2).map(move |c| (r, c)))
            .map(|(r, c)| raster.cell_polygon(r, c).unsigned_area())
            .sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn nan_is_always_nodata() {
        let raster = RasterGrid::new(
            array![[f64::NAN]],
            Coord { x: 0.0, y: 0.0 },
            1.0,
            4326,
            -9999.0,
            Acquisition::Date(date(2020, 1, 1)),
        );
        assert!(raster.is_nodata(f64::NAN));
        assert!(raster.is_nodata(-9999.0));
        assert!(!raster.is_nodata(0.0));
    }
}
