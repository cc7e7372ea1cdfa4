use std::num::NonZeroU32;

use foam_types::{BufferFamily, FoamError, Result, TexelFormat, TileLayout};

/// A packed buffer padded out to a full `width × height` rectangle.
///
/// The family parameter ties the buffer to the layout it was planned with,
/// so per-cell and per-entry heights cannot be swapped at upload time.
#[derive(Debug, Clone)]
pub struct TiledBuffer<F: BufferFamily> {
    label: &'static str,
    format: TexelFormat,
    layout: TileLayout<F>,
    data: Vec<f32>,
}

impl<F: BufferFamily> TiledBuffer<F> {
    /// Pad `data` with zero texels up to the next full row.
    pub fn new(label: &'static str, format: TexelFormat, mut data: Vec<f32>, width: NonZeroU32) -> Result<Self> {
        let channels = format.channels() as usize;
        if data.len() % channels != 0 {
            return Err(FoamError::SchemaMismatch {
                field: label,
                expected: data.len().next_multiple_of(channels),
                found: data.len(),
            });
        }
        let layout = TileLayout::<F>::plan(data.len() / channels, width)?;
        data.resize(layout.padded_len(format.channels()), 0.0);

        log::debug!(
            "{label} ({}): {} texels in {}x{}, {} padding texels",
            F::NAME,
            layout.items(),
            layout.width(),
            layout.height(),
            layout.padding(),
        );

        Ok(Self { label, format, layout, data })
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn format(&self) -> TexelFormat {
        self.format
    }

    pub fn layout(&self) -> &TileLayout<F> {
        &self.layout
    }

    pub fn channels(&self) -> u32 {
        self.format.channels()
    }

    /// Padded contents, `width * height * channels` floats.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Padded contents as raw bytes for upload. Bit patterns are untouched.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// The real texels, without the zero tail.
    pub fn texels(&self) -> &[f32] {
        &self.data[..self.layout.items() * self.channels() as usize]
    }
}
