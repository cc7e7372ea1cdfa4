use glam::Vec3;

use crate::error::{FoamError, Result};

/// One radiance foam cell as seen by a caller building a scene by hand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub position: Vec3,
    pub color: [u8; 3],
    pub density: f32,
    /// Exclusive cumulative neighbor count up to and including this cell.
    pub neighbor_range_end: u32,
}

/// Parsed point cloud record, flat arrays as the PLY parser hands them over.
///
/// `positions` and `colors` have stride 3, `density` and `adjacency_offset`
/// stride 1. The cell count is taken from `adjacency_offset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<f32>,
    pub colors: Vec<u8>,
    pub density: Vec<f32>,
    pub adjacency_offset: Vec<u32>,
    /// Length of the textual PLY header, in bytes.
    pub header_length_bytes: u32,
}

impl PointCloud {
    pub fn from_cells(cells: &[Cell], header_length_bytes: u32) -> Self {
        let mut cloud = PointCloud {
            positions: Vec::with_capacity(cells.len() * 3),
            colors: Vec::with_capacity(cells.len() * 3),
            density: Vec::with_capacity(cells.len()),
            adjacency_offset: Vec::with_capacity(cells.len()),
            header_length_bytes,
        };
        for cell in cells {
            cloud.positions.extend_from_slice(&cell.position.to_array());
            cloud.colors.extend_from_slice(&cell.color);
            cloud.density.push(cell.density);
            cloud.adjacency_offset.push(cell.neighbor_range_end);
        }
        cloud
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.adjacency_offset.len()
    }

    /// Check that every co-indexed array describes the same number of cells.
    pub fn validate(&self) -> Result<()> {
        let n = self.cell_count();
        check_len("positions", n * 3, self.positions.len())?;
        check_len("colors", n * 3, self.colors.len())?;
        check_len("density", n, self.density.len())?;
        Ok(())
    }

    /// Position of cell `i`. Caller guarantees `i < cell_count()`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    /// Start of cell `i`'s slice of the flat adjacency array.
    #[inline]
    pub fn range_start(&self, i: usize) -> u32 {
        if i == 0 { 0 } else { self.adjacency_offset[i - 1] }
    }

    /// Total number of adjacency entries the offsets claim.
    pub fn entry_count(&self) -> u32 {
        self.adjacency_offset.last().copied().unwrap_or(0)
    }

    /// Index of the cell closest to `point`, `None` for an empty cloud.
    pub fn closest_cell(&self, point: Vec3) -> Option<u32> {
        let mut best: Option<(u32, f32)> = None;
        for i in 0..self.cell_count() {
            let d = self.position(i).distance_squared(point);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i as u32, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

fn check_len(field: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(FoamError::SchemaMismatch { field, expected, found });
    }
    Ok(())
}
