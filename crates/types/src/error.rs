use std::fmt;
use std::io;
use std::path::PathBuf;

/// Which adjacency invariant a scene violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFault {
    /// `neighbor_index[entry]` names a cell that does not exist.
    NeighborIndex { entry: usize, neighbor: u32, cell_count: usize },
    /// `neighbor_range_end[cell]` is smaller than the previous cell's end.
    DecreasingOffset { cell: usize, previous: u32, current: u32 },
    /// `neighbor_range_end[cell]` points past the end of the index array.
    OffsetPastEntries { cell: usize, offset: u32, entry_count: usize },
    /// The last range end does not cover every adjacency entry.
    RangeEndMismatch { last: u32, entry_count: usize },
}

impl fmt::Display for IndexFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            IndexFault::NeighborIndex { entry, neighbor, cell_count } => write!(
                f,
                "adjacency entry {entry} references cell {neighbor}, scene has {cell_count} cells"
            ),
            IndexFault::DecreasingOffset { cell, previous, current } => write!(
                f,
                "range end of cell {cell} is {current}, below previous end {previous}"
            ),
            IndexFault::OffsetPastEntries { cell, offset, entry_count } => write!(
                f,
                "range end of cell {cell} is {offset}, only {entry_count} adjacency entries exist"
            ),
            IndexFault::RangeEndMismatch { last, entry_count } => write!(
                f,
                "last range end is {last} but {entry_count} adjacency entries were supplied"
            ),
        }
    }
}

#[derive(Debug)]
pub enum FoamError {
    /// The raw byte source could not be read.
    Fetch { path: PathBuf, source: io::Error },
    /// The adjacency block runs past the end of the available bytes.
    TruncatedInput { offset: u64, required: u64, available: u64 },
    IndexOutOfRange(IndexFault),
    /// Co-indexed per-cell arrays disagree in length.
    SchemaMismatch { field: &'static str, expected: usize, found: usize },
    /// A versioned trailer footer with an unknown magic or version.
    UnsupportedTrailer { magic: [u8; 4], version: u32 },
    Config(String),
}

pub type Result<T> = std::result::Result<T, FoamError>;

impl fmt::Display for FoamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoamError::Fetch { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FoamError::TruncatedInput { offset, required, available } => write!(
                f,
                "adjacency block at byte {offset} needs {required} bytes, buffer holds {available}"
            ),
            FoamError::IndexOutOfRange(fault) => write!(f, "adjacency index out of range: {fault}"),
            FoamError::SchemaMismatch { field, expected, found } => write!(
                f,
                "point cloud field `{field}` has {found} values, expected {expected}"
            ),
            FoamError::UnsupportedTrailer { magic, version } => write!(
                f,
                "unsupported adjacency trailer (magic {:?}, version {version})",
                String::from_utf8_lossy(magic)
            ),
            FoamError::Config(msg) => write!(f, "invalid scene config: {msg}"),
        }
    }
}

impl std::error::Error for FoamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FoamError::Fetch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<IndexFault> for FoamError {
    fn from(fault: IndexFault) -> Self {
        FoamError::IndexOutOfRange(fault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn truncated_message_carries_offset_and_length() {
        let err = FoamError::TruncatedInput { offset: 400, required: 16, available: 410 };
        let msg = err.to_string();
        assert!(msg.contains("400"), "{msg}");
        assert!(msg.contains("16"), "{msg}");
    }

    #[test]
    fn fetch_exposes_io_source() {
        let err = FoamError::Fetch {
            path: PathBuf::from("scene.ply"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("scene.ply"));
    }

    #[test]
    fn index_fault_converts() {
        let err: FoamError = IndexFault::RangeEndMismatch { last: 3, entry_count: 4 }.into();
        assert!(matches!(
            err,
            FoamError::IndexOutOfRange(IndexFault::RangeEndMismatch { last: 3, entry_count: 4 })
        ));
    }
}
