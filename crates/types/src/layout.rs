//! Tile layout of the packed buffers.
//!
//! Every buffer is uploaded as a `width × height` texture with a shared row
//! width. Heights differ between the per-cell buffers and the per-entry
//! buffers; the family marker keeps the two from being mixed up.

use std::fmt;
use std::marker::PhantomData;
use std::num::NonZeroU32;

use crate::error::{FoamError, Result};

/// Row width used by the ray-marcher shaders.
pub const DEFAULT_ROW_WIDTH: NonZeroU32 = match NonZeroU32::new(4096) {
    Some(w) => w,
    None => panic!("row width must be non-zero"),
};

/// A group of buffers sharing an item count, and therefore a tile height.
pub trait BufferFamily {
    const NAME: &'static str;
}

/// Buffers with one item per cell: positions and attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerCell {}

/// Buffers with one item per adjacency entry: neighbor indices and diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerEntry {}

impl BufferFamily for PerCell {
    const NAME: &'static str = "per-cell";
}

impl BufferFamily for PerEntry {
    const NAME: &'static str = "per-entry";
}

/// Rows needed to hold `items` texels at `width` texels per row,
/// `None` when the row count does not fit a u32 texture height.
#[inline]
pub fn rows_for(items: usize, width: NonZeroU32) -> Option<u32> {
    u32::try_from(items.div_ceil(width.get() as usize)).ok()
}

/// Texture extent for one buffer family.
pub struct TileLayout<F: BufferFamily> {
    width: NonZeroU32,
    height: u32,
    items: usize,
    _family: PhantomData<F>,
}

// Manual impls: derives would put bounds on F.
impl<F: BufferFamily> Clone for TileLayout<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: BufferFamily> Copy for TileLayout<F> {}

impl<F: BufferFamily> PartialEq for TileLayout<F> {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.items == other.items
    }
}

impl<F: BufferFamily> fmt::Debug for TileLayout<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileLayout")
            .field("family", &F::NAME)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("items", &self.items)
            .finish()
    }
}

impl<F: BufferFamily> TileLayout<F> {
    pub fn plan(items: usize, width: NonZeroU32) -> Result<Self> {
        let Some(height) = rows_for(items, width) else {
            return Err(FoamError::SchemaMismatch {
                field: F::NAME,
                expected: (u32::MAX as usize).saturating_mul(width.get() as usize),
                found: items,
            });
        };
        Ok(Self {
            width,
            height,
            items,
            _family: PhantomData,
        })
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Real items, before padding.
    pub fn items(&self) -> usize {
        self.items
    }

    /// Texel slots in the full rectangle.
    pub fn capacity(&self) -> usize {
        self.width.get() as usize * self.height as usize
    }

    /// Zero texels appended after the real items.
    pub fn padding(&self) -> usize {
        self.capacity() - self.items
    }

    /// Length in f32s of a padded buffer with `channels` per texel.
    pub fn padded_len(&self, channels: u32) -> usize {
        self.capacity() * channels as usize
    }

    /// `[1 / width, 1 / height]`, the texel size the shader uses for lookups.
    pub fn texel_size(&self) -> [f32; 2] {
        let h = self.height.max(1) as f32;
        [1.0 / self.width.get() as f32, 1.0 / h]
    }
}
