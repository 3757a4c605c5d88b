use anyhow::Result;
use h3o::{CellIndex, Resolution};

use crate::common::PipelineError;

/// Ancestor lookup over a cell hierarchy.
///
/// The aggregator needs exactly one capability from the spatial index: the
/// unique ancestor of a cell at a coarser resolution. Keeping it behind a
/// trait lets tests substitute a synthetic hierarchy.
pub trait Hierarchy {
    /// Ancestor of `cell` at `resolution`; identity when the resolutions are
    /// equal. Fails when `resolution` is finer than the cell's own.
    fn ancestor_at(&self, cell: CellIndex, resolution: Resolution) -> Result<CellIndex>;
}

/// The H3 parent relation: every cell has exactly one ancestor at any coarser
/// resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Hierarchy;

impl Hierarchy for H3Hierarchy {
    fn ancestor_at(&self, cell: CellIndex, resolution: Resolution) -> Result<CellIndex> {
        if resolution == cell.resolution() {
            return Ok(cell);
        }
        cell.parent(resolution).ok_or_else(|| {
            PipelineError::InvalidResolution(format!(
                "target resolution {} is finer than input resolution {}",
                u8::from(resolution),
                u8::from(cell.resolution()),
            ))
            .into()
        })
    }
}
