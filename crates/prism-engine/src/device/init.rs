/// Initialization parameters for the GPU layer.
///
/// Defaults reproduce the fixed swapchain of the triangle demos: `Bgra8Unorm`,
/// FIFO presentation, no optional features.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Surface format used when the surface supports it.
    ///
    /// Falls back to the first format the surface reports otherwise.
    pub preferred_format: wgpu::TextureFormat,

    /// Present mode (swap behavior). FIFO is vsync-locked and always supported.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Adapter power preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            preferred_format: wgpu::TextureFormat::Bgra8Unorm,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
