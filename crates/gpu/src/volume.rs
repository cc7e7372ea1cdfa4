use wgpu;

use foam_pack::{PackedScene, TiledBuffer};
use foam_types::{BufferFamily, TexelFormat, TileLayout};

/// wgpu format a packed texel format is uploaded as.
/// WebGPU has no 3-channel float texture, so `Rgb32Float` is widened to
/// `Rgba32Float` with a zero fourth lane.
pub fn texture_format(format: TexelFormat) -> wgpu::TextureFormat {
    match format {
        TexelFormat::Rgba32Float | TexelFormat::Rgb32Float => wgpu::TextureFormat::Rgba32Float,
        TexelFormat::R32Float => wgpu::TextureFormat::R32Float,
    }
}

/// Bytes per texel of the uploaded texture, after widening.
fn upload_texel_size(format: TexelFormat) -> u32 {
    match format {
        TexelFormat::Rgb32Float => TexelFormat::Rgba32Float.texel_size(),
        other => other.texel_size(),
    }
}

/// `[x, y, z]` texels to `[x, y, z, 0]`.
fn widen_to_rgba(rgb: &[f32]) -> Vec<f32> {
    let mut rgba = Vec::with_capacity(rgb.len() / 3 * 4);
    for texel in rgb.chunks_exact(3) {
        rgba.extend_from_slice(texel);
        rgba.push(0.0);
    }
    rgba
}

/// Reject layouts the device cannot hold as a single 2D texture.
fn check_extent<F: BufferFamily>(layout: &TileLayout<F>, max_dim: u32) -> Result<(), String> {
    if layout.height() == 0 {
        return Err(format!("{} textures are empty, nothing to upload", F::NAME));
    }
    if layout.width() > max_dim || layout.height() > max_dim {
        return Err(format!(
            "{} textures need {}x{}, device max dimension: {}",
            F::NAME,
            layout.width(),
            layout.height(),
            max_dim,
        ));
    }
    Ok(())
}

/// GPU copies of a packed scene, ready to bind for the ray-marcher.
pub struct VolumeTextures {
    pub positions: wgpu::Texture,
    pub positions_view: wgpu::TextureView,
    pub attributes: wgpu::Texture,
    pub attributes_view: wgpu::TextureView,
    pub adjacency: wgpu::Texture,
    pub adjacency_view: wgpu::TextureView,
    /// `[dx, dy, dz, 0]` per entry, same texel coordinates as `adjacency`.
    pub adjacency_diffs: wgpu::Texture,
    pub adjacency_diffs_view: wgpu::TextureView,
    /// Serialized `LayoutParams`.
    pub layout_uniform: wgpu::Buffer,
}

impl VolumeTextures {
    pub fn try_new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        packed: &PackedScene,
        start_cell: u32,
    ) -> Result<Self, String> {
        let limits = device.limits();
        check_extent(packed.cell_layout(), limits.max_texture_dimension_2d)?;
        check_extent(packed.entry_layout(), limits.max_texture_dimension_2d)?;

        let positions = upload_texture(device, queue, &packed.positions);
        let attributes = upload_texture(device, queue, &packed.attributes);
        let adjacency = upload_texture(device, queue, &packed.adjacency);
        let adjacency_diffs = upload_texture(device, queue, &packed.adjacency_diffs);

        let params = packed.layout_params(start_cell).to_bytes();
        let layout_uniform = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("foam_layout"),
            size: params.len() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&layout_uniform, 0, &params);

        let stats = packed.stats();
        log::info!(
            "uploaded scene: {} cells ({}x{}), {} entries ({}x{}), start cell {}",
            stats.cell_count,
            stats.row_width,
            stats.cell_rows,
            stats.entry_count,
            stats.row_width,
            stats.entry_rows,
            start_cell,
        );

        let positions_view = positions.create_view(&wgpu::TextureViewDescriptor::default());
        let attributes_view = attributes.create_view(&wgpu::TextureViewDescriptor::default());
        let adjacency_view = adjacency.create_view(&wgpu::TextureViewDescriptor::default());
        let adjacency_diffs_view = adjacency_diffs.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            positions,
            positions_view,
            attributes,
            attributes_view,
            adjacency,
            adjacency_view,
            adjacency_diffs,
            adjacency_diffs_view,
            layout_uniform,
        })
    }
}

fn upload_texture<F: BufferFamily>(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    buf: &TiledBuffer<F>,
) -> wgpu::Texture {
    let format = texture_format(buf.format());
    let layout = buf.layout();
    let size = wgpu::Extent3d {
        width: layout.width(),
        height: layout.height(),
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(buf.label()),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    let widened;
    let bytes: &[u8] = if buf.format() == TexelFormat::Rgb32Float {
        widened = widen_to_rgba(buf.data());
        bytemuck::cast_slice(&widened)
    } else {
        buf.as_bytes()
    };

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        bytes,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(layout.width() * upload_texel_size(buf.format())),
            rows_per_image: Some(layout.height()),
        },
        size,
    );
    texture
}
