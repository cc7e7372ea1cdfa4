use std::num::NonZeroU32;
use std::path::Path;

use foam_types::{
    smuggle_u32, LayoutParams, PerCell, PerEntry, PointCloud, Result, SceneConfig, TexelFormat,
    TileLayout,
};
use glam::Vec3;

use crate::cells::pack_cells;
use crate::extract::extract_adjacency;
use crate::fetch::fetch_bytes;
use crate::flatten::neighbor_diffs;
use crate::stats::PackStats;
use crate::tile::TiledBuffer;

/// One loaded radiance foam scene: the parsed cloud plus its adjacency list.
///
/// Owned by whoever loaded it. Loading a new scene means building a new
/// `Scene`; nothing is mutated in place.
#[derive(Debug, Clone)]
pub struct Scene {
    cloud: PointCloud,
    neighbors: Vec<u32>,
}

impl Scene {
    pub fn from_parts(cloud: PointCloud, neighbors: Vec<u32>) -> Result<Self> {
        cloud.validate()?;
        Ok(Self { cloud, neighbors })
    }

    /// Pull the adjacency block out of the raw scene bytes.
    pub fn load(cloud: PointCloud, raw: &[u8], config: &SceneConfig) -> Result<Self> {
        cloud.validate()?;
        let neighbors = extract_adjacency(
            raw,
            cloud.header_length_bytes,
            cloud.cell_count(),
            &config.adjacency,
        )?;
        Self::from_parts(cloud, neighbors)
    }

    /// Read the scene file at `path` and load it.
    pub fn open(cloud: PointCloud, path: impl AsRef<Path>, config: &SceneConfig) -> Result<Self> {
        let raw = fetch_bytes(path)?;
        Self::load(cloud, &raw, config)
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn neighbors(&self) -> &[u32] {
        &self.neighbors
    }

    pub fn cell_count(&self) -> usize {
        self.cloud.cell_count()
    }

    pub fn entry_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Cell nearest to `point`; the ray-marcher starts walking from there.
    pub fn closest_cell(&self, point: Vec3) -> Option<u32> {
        self.cloud.closest_cell(point)
    }

    /// Build all four upload buffers.
    pub fn pack(&self, row_width: NonZeroU32) -> Result<PackedScene> {
        let diffs = neighbor_diffs(&self.cloud, &self.neighbors)?;
        let cells = pack_cells(&self.cloud)?;
        let indices: Vec<f32> = self.neighbors.iter().map(|&n| smuggle_u32(n)).collect();

        let packed = PackedScene {
            positions: TiledBuffer::new("positions_tex", TexelFormat::Rgba32Float, cells.positions, row_width)?,
            attributes: TiledBuffer::new("attr_tex", TexelFormat::Rgba32Float, cells.attributes, row_width)?,
            adjacency: TiledBuffer::new("adjacency_tex", TexelFormat::R32Float, indices, row_width)?,
            adjacency_diffs: TiledBuffer::new("adjacency_diff_tex", TexelFormat::Rgb32Float, diffs, row_width)?,
        };

        let stats = packed.stats();
        log::info!(
            "packed {} cells / {} adjacency entries: {}x{} cell tiles, {}x{} entry tiles, {} MB",
            stats.cell_count,
            stats.entry_count,
            stats.row_width,
            stats.cell_rows,
            stats.row_width,
            stats.entry_rows,
            stats.upload_bytes() / (1024 * 1024),
        );
        Ok(packed)
    }
}

/// The four buffers handed to the GPU upload adapter.
#[derive(Debug, Clone)]
pub struct PackedScene {
    /// `[x, y, z, range_end bits]` per cell.
    pub positions: TiledBuffer<PerCell>,
    /// `[r, g, b, density]` per cell.
    pub attributes: TiledBuffer<PerCell>,
    /// Neighbor index bits per adjacency entry.
    pub adjacency: TiledBuffer<PerEntry>,
    /// `[dx, dy, dz]` per adjacency entry.
    pub adjacency_diffs: TiledBuffer<PerEntry>,
}

impl PackedScene {
    pub fn cell_layout(&self) -> &TileLayout<PerCell> {
        self.positions.layout()
    }

    pub fn entry_layout(&self) -> &TileLayout<PerEntry> {
        self.adjacency.layout()
    }

    pub fn layout_params(&self, start_cell: u32) -> LayoutParams {
        LayoutParams::new(self.cell_layout(), self.entry_layout(), start_cell)
    }

    pub fn stats(&self) -> PackStats {
        let cells = self.cell_layout();
        let entries = self.entry_layout();
        PackStats {
            cell_count: cells.items(),
            entry_count: entries.items(),
            row_width: cells.width(),
            cell_rows: cells.height(),
            entry_rows: entries.height(),
            cell_padding: cells.padding(),
            entry_padding: entries.padding(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foam_types::{recover_u32, Cell, FoamError, IndexFault};

    fn w(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn two_cell_scene() -> Scene {
        let cloud = PointCloud::from_cells(
            &[
                Cell { position: Vec3::ZERO, color: [255, 0, 0], density: 1.0, neighbor_range_end: 1 },
                Cell { position: Vec3::X, color: [0, 255, 0], density: 2.0, neighbor_range_end: 2 },
            ],
            0,
        );
        Scene::from_parts(cloud, vec![1, 0]).unwrap()
    }

    #[test]
    fn two_cell_example_end_to_end() {
        let packed = two_cell_scene().pack(w(4)).unwrap();

        let pos = packed.positions.data();
        assert_eq!(pos.len(), 16);
        assert_eq!(recover_u32(pos[3]), 1);
        assert_eq!(recover_u32(pos[7]), 2);
        assert!(pos[8..].iter().all(|&v| v.to_bits() == 0));

        assert_eq!(packed.attributes.texels(), &[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 2.0]);

        let idx: Vec<u32> = packed.adjacency.texels().iter().map(|&v| recover_u32(v)).collect();
        assert_eq!(idx, vec![1, 0]);
        assert_eq!(packed.adjacency.data().len(), 4);

        assert_eq!(packed.adjacency_diffs.texels(), &[1.0, 0.0, 0.0, -1.0, 0.0, 0.0]);
        assert_eq!(packed.adjacency_diffs.data().len(), 12);
    }

    #[test]
    fn families_planned_separately() {
        // 3 cells, 9 entries at width 4: 1 cell row, 3 entry rows
        let cells: Vec<Cell> = (0..3)
            .map(|i| Cell {
                position: Vec3::new(i as f32, 0.0, 0.0),
                color: [0; 3],
                density: 0.0,
                neighbor_range_end: 3 * (i + 1),
            })
            .collect();
        let neighbors = vec![1, 2, 1, 0, 2, 0, 0, 1, 1];
        let scene = Scene::from_parts(PointCloud::from_cells(&cells, 0), neighbors).unwrap();
        assert_eq!(scene.cell_count(), 3);
        assert_eq!(scene.entry_count(), 9);
        let packed = scene.pack(w(4)).unwrap();

        let stats = packed.stats();
        assert_eq!(stats.cell_count, scene.cell_count());
        assert_eq!(stats.entry_count, scene.entry_count());
        assert_eq!(stats.cell_rows, 1);
        assert_eq!(stats.entry_rows, 3);
        assert_eq!(stats.cell_padding, 1);
        assert_eq!(stats.entry_padding, 3);
        assert_eq!(packed.attributes.layout(), packed.cell_layout());
        assert_eq!(packed.adjacency_diffs.layout(), packed.entry_layout());

        let params = packed.layout_params(2);
        assert_eq!(params.positions_texel_size, [0.25, 1.0]);
        assert_eq!(params.adjacency_texel_size, [0.25, 1.0 / 3.0]);
        assert_eq!(params.start_cell, 2);
    }

    #[test]
    fn bad_neighbor_fails_pack() {
        let cloud = two_cell_scene().cloud().clone();
        let scene = Scene::from_parts(cloud, vec![1, 9]).unwrap();
        assert!(matches!(
            scene.pack(w(4)),
            Err(FoamError::IndexOutOfRange(IndexFault::NeighborIndex { neighbor: 9, .. }))
        ));
    }

    #[test]
    fn from_parts_checks_schema() {
        let mut cloud = two_cell_scene().cloud().clone();
        cloud.density.clear();
        assert!(matches!(
            Scene::from_parts(cloud, vec![1, 0]),
            Err(FoamError::SchemaMismatch { field: "density", .. })
        ));
    }

    #[test]
    fn closest_cell_delegates() {
        let scene = two_cell_scene();
        assert_eq!(scene.closest_cell(Vec3::new(0.0, 0.0, -50.0)), Some(0));
        assert_eq!(scene.closest_cell(Vec3::new(2.0, 0.0, 0.0)), Some(1));
    }
}
