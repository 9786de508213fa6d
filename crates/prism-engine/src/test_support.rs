//! Headless GPU fixtures for unit tests (wgpu's noop backend).

use std::sync::{Arc, Mutex};

use crate::device::{acquire_device, AcquiredDevice, GpuInit};

/// Instance that only exposes the noop adapter.
pub(crate) fn noop_instance() -> wgpu::Instance {
    wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::NOOP,
        backend_options: wgpu::BackendOptions {
            noop: wgpu::NoopBackendOptions { enable: true },
            ..Default::default()
        },
        ..Default::default()
    })
}

/// A noop device whose uncaptured errors are collected instead of logged.
pub(crate) struct NoopGpu {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub errors: Arc<Mutex<Vec<String>>>,
}

impl NoopGpu {
    pub(crate) fn new() -> Self {
        let instance = noop_instance();
        let AcquiredDevice { device, queue, .. } =
            pollster::block_on(acquire_device(&instance, None, &GpuInit::default()))
                .expect("noop adapter and device");

        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = errors.clone();
        device.on_uncaptured_error(Arc::new(move |err: wgpu::Error| {
            sink.lock().expect("error sink poisoned").push(err.to_string());
        }));

        Self {
            device,
            queue,
            errors,
        }
    }

    pub(crate) fn errors(&self) -> Vec<String> {
        self.errors.lock().expect("error sink poisoned").clone()
    }

    /// Offscreen color target standing in for a surface texture.
    pub(crate) fn color_target(&self, format: wgpu::TextureFormat) -> wgpu::TextureView {
        self.device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("test color target"),
                size: wgpu::Extent3d {
                    width: 512,
                    height: 512,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default())
    }
}
