use winit::dpi::PhysicalSize;

use crate::renderer::error::{scoped, RenderError};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct Depth {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: PhysicalSize<u32>,
}

impl Depth {
    pub fn descriptor(size: PhysicalSize<u32>) -> wgpu::TextureDescriptor<'static> {
        wgpu::TextureDescriptor {
            label: Some("SceneDepth"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        }
    }

    pub fn new(device: &wgpu::Device, size: PhysicalSize<u32>) -> Result<Self, RenderError> {
        let texture = scoped(device, "SceneDepth", || {
            device.create_texture(&Self::descriptor(size))
        })?;
        let view = scoped(device, "SceneDepthView", || {
            texture.create_view(&wgpu::TextureViewDescriptor {
                label: Some("SceneDepthView"),
                format: Some(DEPTH_FORMAT),
                dimension: Some(wgpu::TextureViewDimension::D2),
                aspect: wgpu::TextureAspect::DepthOnly,
                ..Default::default()
            })
        })?;
        log::debug!("Created {}x{} depth buffer", size.width, size.height);
        Ok(Self {
            texture,
            view,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_matches_requested_size() {
        let desc = Depth::descriptor(PhysicalSize::new(640, 480));
        assert_eq!(desc.size.width, 640);
        assert_eq!(desc.size.height, 480);
        assert_eq!(desc.size.depth_or_array_layers, 1);
        assert_eq!(desc.mip_level_count, 1);
        assert_eq!(desc.sample_count, 1);
        assert_eq!(desc.format, wgpu::TextureFormat::Depth32Float);
        assert!(desc.usage.contains(wgpu::TextureUsages::RENDER_ATTACHMENT));
    }

    #[test]
    fn identical_sizes_give_identical_descriptors() {
        let a = Depth::descriptor(PhysicalSize::new(800, 600));
        let b = Depth::descriptor(PhysicalSize::new(800, 600));
        assert_eq!(a.size, b.size);
        assert_eq!(a.format, b.format);
    }
}
