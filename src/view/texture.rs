use image::{Rgba, RgbaImage};

use crate::model::Finish;

/// Side length of the synthesized placeholder textures.
const TEXTURE_SIZE: u32 = 256;

/// Bind group layout shared by every gallery material: albedo + sampler.
pub fn material_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("material_bind_group_layout"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    })
}

/// The image file a finish would load from `assets/`, when one is shipped.
fn asset_file(finish: Finish) -> &'static str {
    match finish {
        Finish::FloorTiles => "floor.png",
        Finish::Concrete => "wall.png",
        Finish::Plaster => "ceiling.png",
        Finish::Artwork(0) => "painting-1.png",
        Finish::Artwork(1) => "painting-2.png",
        Finish::Artwork(2) => "painting-3.png",
        Finish::Artwork(_) => "painting-4.png",
    }
}

/// Decode an asset from disk. Only meaningful natively; the wasm build is
/// always served the synthesized placeholders.
#[cfg(not(target_arch = "wasm32"))]
fn load_asset(finish: Finish) -> Option<RgbaImage> {
    let path = std::path::Path::new("assets").join(asset_file(finish));
    if !path.exists() {
        return None;
    }
    match image::open(&path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            tracing::warn!("failed to decode {}: {e}", path.display());
            None
        }
    }
}

/// Resolve the pixels for a finish: decoded asset if available, synthesized
/// placeholder otherwise.
pub fn resolve_image(finish: Finish) -> RgbaImage {
    #[cfg(not(target_arch = "wasm32"))]
    if let Some(img) = load_asset(finish) {
        return img;
    }
    synthesize(finish)
}

/// Deterministic per-pixel noise in [0, 1).
fn noise(x: u32, y: u32, seed: u32) -> f32 {
    let mut h = x
        .wrapping_mul(374_761_393)
        .wrapping_add(y.wrapping_mul(668_265_263))
        .wrapping_add(seed.wrapping_mul(2_246_822_519));
    h = (h ^ (h >> 13)).wrapping_mul(1_274_126_177);
    ((h ^ (h >> 16)) & 0xffff) as f32 / 65536.0
}

fn shade(base: [f32; 3], factor: f32) -> Rgba<u8> {
    let to_byte = |c: f32| (c * factor * 255.0).clamp(0.0, 255.0) as u8;
    Rgba([to_byte(base[0]), to_byte(base[1]), to_byte(base[2]), 255])
}

/// Synthesize a placeholder texture for a finish.
pub fn synthesize(finish: Finish) -> RgbaImage {
    let size = TEXTURE_SIZE;
    match finish {
        Finish::FloorTiles => RgbaImage::from_fn(size, size, |x, y| {
            let tile = ((x / 32) + (y / 32)) % 2;
            let base = if tile == 0 {
                [0.55, 0.47, 0.40]
            } else {
                [0.38, 0.32, 0.28]
            };
            shade(base, 0.92 + 0.08 * noise(x, y, 1))
        }),
        Finish::Concrete => RgbaImage::from_fn(size, size, |x, y| {
            // light gray with fine speckle
            let speckle = if noise(x, y, 2) > 0.97 { 0.8 } else { 1.0 };
            shade([0.72, 0.72, 0.70], speckle * (0.94 + 0.06 * noise(x, y, 3)))
        }),
        Finish::Plaster => RgbaImage::from_fn(size, size, |x, y| {
            shade([0.88, 0.87, 0.84], 0.97 + 0.03 * noise(x, y, 4))
        }),
        Finish::Artwork(index) => synthesize_artwork(index),
    }
}

/// A framed abstract canvas; each index gets its own palette.
fn synthesize_artwork(index: u8) -> RgbaImage {
    let size = TEXTURE_SIZE;
    let palettes: [([f32; 3], [f32; 3]); 4] = [
        ([0.82, 0.35, 0.25], [0.95, 0.80, 0.55]),
        ([0.25, 0.45, 0.70], [0.85, 0.90, 0.95]),
        ([0.30, 0.60, 0.40], [0.90, 0.85, 0.60]),
        ([0.55, 0.30, 0.60], [0.95, 0.75, 0.80]),
    ];
    let (a, b) = palettes[(index as usize) % palettes.len()];
    let frame = 12u32;
    let seed = 100 + index as u32;

    RgbaImage::from_fn(size, size, |x, y| {
        if x < frame || y < frame || x >= size - frame || y >= size - frame {
            return shade([0.28, 0.20, 0.12], 0.9 + 0.1 * noise(x, y, seed));
        }
        // diagonal wash between the two palette colors, broken up by noise
        let t = ((x + y) as f32 / (2.0 * size as f32) + 0.25 * noise(x / 8, y / 8, seed))
            .clamp(0.0, 1.0);
        let mix = |ca: f32, cb: f32| ca + (cb - ca) * t;
        shade([mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])], 1.0)
    })
}

/// Upload an image and build its material bind group.
pub fn create_material(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    image: &RgbaImage,
    label: &str,
) -> wgpu::BindGroup {
    let (width, height) = image.dimensions();
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        image.as_raw(),
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some(label),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesized_dimensions() {
        let img = synthesize(Finish::Concrete);
        assert_eq!(img.dimensions(), (TEXTURE_SIZE, TEXTURE_SIZE));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let a = synthesize(Finish::FloorTiles);
        let b = synthesize(Finish::FloorTiles);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_artworks_differ_by_index() {
        let a = synthesize(Finish::Artwork(0));
        let b = synthesize(Finish::Artwork(1));
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_artwork_has_frame() {
        let img = synthesize(Finish::Artwork(0));
        // frame pixels are dark wood, canvas center is not
        let corner = img.get_pixel(2, 2);
        let center = img.get_pixel(TEXTURE_SIZE / 2, TEXTURE_SIZE / 2);
        assert!(corner.0[0] < 100);
        assert!(center.0[0] > corner.0[0]);
    }
}
