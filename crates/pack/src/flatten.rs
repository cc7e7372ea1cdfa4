use foam_types::{IndexFault, PointCloud, Result};

/// Check the CSR offsets against the flat index array.
///
/// Offsets must not decrease, must stay inside `entry_count`, and the last
/// one must cover every entry so the index and diff textures stay aligned.
pub fn check_offsets(offsets: &[u32], entry_count: usize) -> Result<()> {
    let mut previous = 0u32;
    for (cell, &offset) in offsets.iter().enumerate() {
        if offset < previous {
            return Err(IndexFault::DecreasingOffset { cell, previous, current: offset }.into());
        }
        if offset as usize > entry_count {
            return Err(IndexFault::OffsetPastEntries { cell, offset, entry_count }.into());
        }
        previous = offset;
    }
    if previous as usize != entry_count {
        return Err(IndexFault::RangeEndMismatch { last: previous, entry_count }.into());
    }
    Ok(())
}

/// Displacement from each cell to each of its neighbors, stride 3.
///
/// Output entry `j` belongs to adjacency entry `j`: the GPU reads the
/// neighbor index and the diff with the same texel coordinate.
pub fn neighbor_diffs(cloud: &PointCloud, neighbors: &[u32]) -> Result<Vec<f32>> {
    cloud.validate()?;
    check_offsets(&cloud.adjacency_offset, neighbors.len())?;

    let cell_count = cloud.cell_count();
    let mut diffs = Vec::with_capacity(neighbors.len() * 3);
    for cell in 0..cell_count {
        let origin = cloud.position(cell);
        let start = cloud.range_start(cell) as usize;
        let end = cloud.adjacency_offset[cell] as usize;
        for (entry, &neighbor) in (start..end).zip(&neighbors[start..end]) {
            if neighbor as usize >= cell_count {
                return Err(IndexFault::NeighborIndex { entry, neighbor, cell_count }.into());
            }
            let diff = cloud.position(neighbor as usize) - origin;
            diffs.extend_from_slice(&diff.to_array());
        }
    }
    Ok(diffs)
}
