use crate::layout::{PerCell, PerEntry, TileLayout};

/// Layout uniform for the ray-marcher.
/// Serialized to bytes and uploaded as a GPU uniform buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    pub positions_texel_size: [f32; 2],
    pub adjacency_texel_size: [f32; 2],
    /// Cell the march starts in.
    pub start_cell: u32,
}

impl LayoutParams {
    /// Texel sizes come from each family's own layout, so a per-cell height
    /// can never end up in the adjacency lookup.
    pub fn new(cells: &TileLayout<PerCell>, entries: &TileLayout<PerEntry>, start_cell: u32) -> Self {
        Self {
            positions_texel_size: cells.texel_size(),
            adjacency_texel_size: entries.texel_size(),
            start_cell,
        }
    }

    /// Serialize all fields to bytes, padded to 16-byte alignment.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32);
        for f in self.positions_texel_size.iter().chain(&self.adjacency_texel_size) {
            bytes.extend_from_slice(&f.to_le_bytes());
        }
        bytes.extend_from_slice(&self.start_cell.to_le_bytes());
        // 3 words of padding
        bytes.resize(32, 0);
        bytes
    }
}
