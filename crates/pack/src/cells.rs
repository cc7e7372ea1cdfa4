use foam_types::{smuggle_u32, PointCloud, Result};

/// Interleaved per-cell buffers, 4 floats per cell, unpadded.
#[derive(Debug, Clone, PartialEq)]
pub struct CellBuffers {
    /// `[x, y, z, range_end bits]`
    pub positions: Vec<f32>,
    /// `[r, g, b, density]`, colors in 0..=1
    pub attributes: Vec<f32>,
}

pub fn pack_cells(cloud: &PointCloud) -> Result<CellBuffers> {
    cloud.validate()?;

    let n = cloud.cell_count();
    let mut positions = Vec::with_capacity(n * 4);
    let mut attributes = Vec::with_capacity(n * 4);
    for i in 0..n {
        positions.extend_from_slice(&cloud.positions[i * 3..i * 3 + 3]);
        // bit copy only, this lane is a u32 on the GPU side
        positions.push(smuggle_u32(cloud.adjacency_offset[i]));

        let rgb = &cloud.colors[i * 3..i * 3 + 3];
        attributes.extend(rgb.iter().map(|&c| c as f32 / 255.0));
        attributes.push(cloud.density[i]);
    }
    Ok(CellBuffers { positions, attributes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use foam_types::{recover_u32, Cell, FoamError};
    use glam::Vec3;

    fn two_cells() -> PointCloud {
        PointCloud::from_cells(
            &[
                Cell { position: Vec3::ZERO, color: [255, 0, 0], density: 1.0, neighbor_range_end: 1 },
                Cell { position: Vec3::X, color: [0, 255, 0], density: 2.0, neighbor_range_end: 2 },
            ],
            0,
        )
    }

    #[test]
    fn two_cell_example() {
        let packed = pack_cells(&two_cells()).unwrap();
        assert_eq!(&packed.positions[0..3], &[0.0, 0.0, 0.0]);
        assert_eq!(&packed.positions[4..7], &[1.0, 0.0, 0.0]);
        assert_eq!(recover_u32(packed.positions[3]), 1);
        assert_eq!(recover_u32(packed.positions[7]), 2);
        assert_eq!(packed.attributes, vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 2.0]);
    }

    #[test]
    fn range_end_lane_roundtrips_exactly() {
        let ends = [0u32, 7, 0x0080_0000, 30_268_338, 0x7F00_0001];
        let cells: Vec<Cell> = ends
            .iter()
            .map(|&neighbor_range_end| Cell {
                position: Vec3::splat(0.5),
                color: [1, 2, 3],
                density: 0.0,
                neighbor_range_end,
            })
            .collect();
        let packed = pack_cells(&PointCloud::from_cells(&cells, 0)).unwrap();
        for (i, &end) in ends.iter().enumerate() {
            assert_eq!(recover_u32(packed.positions[i * 4 + 3]), end, "cell {i}");
        }
    }

    #[test]
    fn colors_normalized_density_passthrough() {
        let cloud = PointCloud::from_cells(
            &[Cell { position: Vec3::ZERO, color: [51, 102, 0], density: -3.5, neighbor_range_end: 0 }],
            0,
        );
        let packed = pack_cells(&cloud).unwrap();
        assert_eq!(packed.attributes, vec![0.2, 0.4, 0.0, -3.5]);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let mut cloud = two_cells();
        cloud.positions.truncate(3);
        assert!(matches!(
            pack_cells(&cloud),
            Err(FoamError::SchemaMismatch { field: "positions", expected: 6, found: 3 })
        ));
    }

    #[test]
    fn empty_cloud_packs_to_nothing() {
        let packed = pack_cells(&PointCloud::default()).unwrap();
        assert!(packed.positions.is_empty());
        assert!(packed.attributes.is_empty());
    }
}
