/// Layout counters of one packed scene, for checking tile math by eye.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackStats {
    pub cell_count: usize,
    pub entry_count: usize,
    pub row_width: u32,
    pub cell_rows: u32,
    pub entry_rows: u32,
    /// Zero texels appended to each per-cell buffer.
    pub cell_padding: usize,
    /// Zero texels appended to each per-entry buffer.
    pub entry_padding: usize,
}

impl PackStats {
    /// Bytes uploaded across all four buffers, padding included.
    pub fn upload_bytes(&self) -> usize {
        let cell_texels = self.cell_count + self.cell_padding;
        let entry_texels = self.entry_count + self.entry_padding;
        // positions + attributes: 4 channels each; adjacency: 1; diffs: 3, widened to 4 on upload
        (cell_texels * 8 + entry_texels * 5) * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_bytes_counts_padding() {
        let stats = PackStats {
            cell_count: 3,
            entry_count: 5,
            row_width: 4,
            cell_rows: 1,
            entry_rows: 2,
            cell_padding: 1,
            entry_padding: 3,
        };
        assert_eq!(stats.upload_bytes(), (4 * 8 + 8 * 5) * 4);
    }
}
