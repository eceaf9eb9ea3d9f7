use anyhow::Result;

use crate::data::image::Image;

pub struct ImageTexture {
    #[allow(dead_code)]
    pub gpu_texture: wgpu::Texture,
    pub gpu_texture_view: wgpu::TextureView,
    pub gpu_sampler: wgpu::Sampler,
    pub grayscale: bool,
    pub dimensions: (u32, u32),
}

impl ImageTexture {
    pub fn from_image(
        source_image: &Image,
        name: &str,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
    ) -> Result<Self> {
        let dimensions = texture_dimensions(
            source_image.width(),
            source_image.height(),
            device.limits().max_texture_dimension_2d,
        )?;
        let image_size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };

        let grayscale = source_image.channels() == 1;

        let (format, bytes_per_pixel, image_data) = if grayscale {
            (
                wgpu::TextureFormat::R8Unorm,
                1,
                source_image.as_raw().to_vec(),
            )
        } else {
            (
                wgpu::TextureFormat::Rgba8Unorm,
                4,
                source_image.to_rgba8().into_raw(),
            )
        };

        let gpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size: image_size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image_data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_pixel * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            image_size,
        );

        let gpu_texture_view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let gpu_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            gpu_texture,
            gpu_texture_view,
            gpu_sampler,
            grayscale,
            dimensions,
        })
    }
}

/// Width and height of an image as a texture extent no larger than `max_dimension`.
fn texture_dimensions(width: usize, height: usize, max_dimension: u32) -> Result<(u32, u32)> {
    if width == 0 || height == 0 {
        return Err(anyhow::anyhow!("Cannot preview an empty {width}x{height} image."));
    }

    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w <= max_dimension && h <= max_dimension => Ok((w, h)),
        _ => Err(anyhow::anyhow!(
            "A {width}x{height} image exceeds the maximum texture size of {max_dimension}."
        )),
    }
}
