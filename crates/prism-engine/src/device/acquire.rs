use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

use super::GpuInit;

/// Shared flag raised by the device-lost callback.
///
/// wgpu may invoke the callback from any thread; the render loop polls the flag
/// once per frame and shuts down when it is set.
#[derive(Debug, Clone, Default)]
pub struct DeviceLostFlag(Arc<AtomicBool>);

impl DeviceLostFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub(crate) fn set(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// Result of a successful adapter + device negotiation.
pub struct AcquiredDevice {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub lost: DeviceLostFlag,
}

/// Negotiates an adapter, then a logical device, able to present to `surface`
/// (any adapter when `None`).
///
/// This is the only asynchronous step of startup; callers drive it once
/// (`pollster::block_on`). Both failures are fatal and returned as errors:
/// - no adapter compatible with the surface
/// - the adapter refused the device request
///
/// On success the device already has its uncaptured-error handler (log and
/// continue) and device-lost callback installed.
pub async fn acquire_device(
    instance: &wgpu::Instance,
    surface: Option<&wgpu::Surface<'_>>,
    init: &GpuInit,
) -> Result<AcquiredDevice> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: surface,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a suitable GPU adapter")?;

    let info = adapter.get_info();
    log::info!("adapter: {} ({:?})", info.name, info.backend);

    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("prism device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")?;

    device.on_uncaptured_error(Arc::new(|err: wgpu::Error| {
        log::error!("uncaptured GPU error: {err}");
    }));

    let lost = DeviceLostFlag::default();
    let lost_cb = lost.clone();
    device.set_device_lost_callback(move |reason, message| {
        log::error!("GPU device lost ({reason:?}): {message}");
        lost_cb.set();
    });

    Ok(AcquiredDevice {
        adapter,
        device,
        queue,
        lost,
    })
}
