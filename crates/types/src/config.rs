use std::num::NonZeroU32;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FoamError, Result};
use crate::layout::DEFAULT_ROW_WIDTH;

/// Where the adjacency index block lives in the raw scene file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjacencySource {
    /// Block starts right after the vertex records: `cells * record_stride + header`.
    /// Both numbers are measured per scene by whoever exported it.
    Fixed { record_stride: u64, entry_count: u64 },
    /// Self-describing trailer at the end of the file.
    #[default]
    Versioned,
}

impl AdjacencySource {
    /// Constants measured against the bonsai radiance foam export.
    pub const BONSAI: AdjacencySource = AdjacencySource::Fixed {
        record_stride: 203,
        entry_count: 30_268_338,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Texels per row of every packed texture.
    pub row_width: NonZeroU32,
    pub adjacency: AdjacencySource,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            row_width: DEFAULT_ROW_WIDTH,
            adjacency: AdjacencySource::default(),
        }
    }
}

impl SceneConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FoamError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FoamError::Fetch {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}
