use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords};
use proj4rs::{proj::Proj as Proj4, transform::transform};

/// Build a PROJ.4 string for a supported EPSG code.
/// Geographic: 4326 (WGS84), 4269 (NAD83). Metric: UTM 326zz (north) / 327zz (south).
fn epsg_to_proj4(epsg: u32) -> Result<String> {
    match epsg {
        4326 => Ok("+proj=longlat +datum=WGS84 +no_defs +type=crs".to_string()),
        4269 => Ok("+proj=longlat +datum=NAD83 +no_defs +type=crs".to_string()),
        32601..=32660 => Ok(format!(
            "+proj=utm +zone={} +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32600
        )),
        32701..=32760 => Ok(format!(
            "+proj=utm +zone={} +south +datum=WGS84 +units=m +no_defs +type=crs",
            epsg - 32700
        )),
        _ => bail!("unsupported EPSG code: {epsg}"),
    }
}

#[inline]
fn is_geographic(epsg: u32) -> bool {
    matches!(epsg, 4326 | 4269)
}

/// A prepared coordinate transform between two EPSG codes.
/// Geographic coordinates cross the proj4rs boundary in radians; degrees are
/// converted on the way in and out.
#[derive(Debug)]
pub(crate) struct Reprojection {
    from: Proj4,
    to: Proj4,
    src_geog: bool,
    dst_geog: bool,
    identity: bool,
}

impl Reprojection {
    pub(crate) fn new(from_epsg: u32, to_epsg: u32) -> Result<Self> {
        let from = {
            let proj_string = epsg_to_proj4(from_epsg)?;
            Proj4::from_proj_string(&proj_string)
                .with_context(|| anyhow!("failed to build source PROJ.4: {proj_string}"))?
        };

        let to = {
            let proj_string = epsg_to_proj4(to_epsg)?;
            Proj4::from_proj_string(&proj_string)
                .with_context(|| anyhow!("failed to build target PROJ.4: {proj_string}"))?
        };

        Ok(Self {
            from,
            to,
            src_geog: is_geographic(from_epsg),
            dst_geog: is_geographic(to_epsg),
            identity: from_epsg == to_epsg,
        })
    }

    /// Reproject every coordinate of `shape`.
    pub(crate) fn apply<G>(&self, shape: &G) -> Result<G>
    where
        G: MapCoords<f64, f64, Output = G>,
    {
        if self.identity {
            return Ok(shape.map_coords(|coord| coord));
        }

        shape.try_map_coords(|coord: Coord<f64>| {
            let mut point = if self.src_geog {
                (coord.x.to_radians(), coord.y.to_radians(), 0.0)
            } else {
                (coord.x, coord.y, 0.0)
            };
            transform(&self.from, &self.to, &mut point)
                .map_err(|err| anyhow!("CRS transform failed: {err}"))?;
            Ok(if self.dst_geog {
                Coord { x: point.0.to_degrees(), y: point.1.to_degrees() }
            } else {
                Coord { x: point.0, y: point.1 }
            })
        })
    }
}
