use anyhow::{anyhow, bail, Result};
use geo::{BooleanOps, Contains, Geometry, Intersects, MultiPolygon, Point, Polygon};
use wkt::TryFromWkt;

use crate::geom::Reprojection;

/// Region of interest: a polygon boundary in a known CRS. Read-only; used for
/// clipping at the vectorizer, hex mapper, and aggregator boundaries.
#[derive(Debug, Clone)]
pub struct Region {
    boundary: MultiPolygon<f64>,
    epsg: u32,
}

impl Region {
    /// Construct from a boundary in the given EPSG CRS.
    pub fn new(boundary: MultiPolygon<f64>, epsg: u32) -> Self {
        Self { boundary, epsg }
    }

    /// Construct from a single polygon in EPSG:4326.
    pub fn from_polygon(polygon: Polygon<f64>) -> Self {
        Self::new(MultiPolygon(vec![polygon]), 4326)
    }

    /// Parse a WKT POLYGON or MULTIPOLYGON, assumed to be in EPSG:4326.
    pub fn from_wkt(wkt_str: &str) -> Result<Self> {
        let geometry = Geometry::<f64>::try_from_wkt_str(wkt_str)
            .map_err(|err| anyhow!("failed to parse WKT region: {err}"))?;
        let boundary = match geometry {
            Geometry::Polygon(polygon) => MultiPolygon(vec![polygon]),
            Geometry::MultiPolygon(multi) => multi,
            other => bail!("region WKT must be a polygon or multipolygon, got {other:?}"),
        };
        Ok(Self::new(boundary, 4326))
    }

    #[inline] pub fn epsg(&self) -> u32 { self.epsg }
    #[inline] pub fn boundary(&self) -> &MultiPolygon<f64> { &self.boundary }

    /// True if `geometry` shares any area or boundary with the region.
    #[inline]
    pub fn intersects(&self, geometry: &Polygon<f64>) -> bool {
        self.boundary.intersects(geometry)
    }

    /// True if `point` lies inside the region.
    #[inline]
    pub fn contains_point(&self, point: &Point<f64>) -> bool {
        self.boundary.contains(point)
    }

    /// Clip `geometry` to the region boundary. An empty result means the
    /// geometry lies entirely outside.
    pub fn clip(&self, geometry: &Polygon<f64>) -> MultiPolygon<f64> {
        self.boundary.intersection(&MultiPolygon(vec![geometry.clone()]))
    }

    /// Reproject the boundary into another CRS.
    pub fn to_epsg(&self, epsg: u32) -> Result<Region> {
        let projection = Reprojection::new(self.epsg, epsg)?;
        Ok(Region::new(projection.apply(&self.boundary)?, epsg))
    }
}
