use winit::dpi::PhysicalSize;

/// What the render loop should do after failing to acquire a surface texture.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip this frame.
    SkipFrame,
    /// Unrecoverable (out of memory); shut down.
    Fatal,
}

/// Picks `preferred` if the surface supports it, otherwise its first format.
pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    preferred: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.contains(&preferred) {
        return Some(preferred);
    }

    caps.formats.first().copied()
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// wgpu rejects 0x0 configurations; in that case only `size` is updated and
/// configuration is deferred to the next non-zero resize.
pub(crate) fn apply_resize(
    surface: &wgpu::Surface,
    device: &wgpu::Device,
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
) {
    *size = new_size;

    if new_size.width == 0 || new_size.height == 0 {
        return;
    }

    config.width = new_size.width;
    config.height = new_size.height;

    surface.configure(device, config);
}

pub(crate) fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    use wgpu::SurfaceError;

    match err {
        SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wgpu::SurfaceError;

    fn caps(
        formats: &[wgpu::TextureFormat],
        alpha: &[wgpu::CompositeAlphaMode],
    ) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats: formats.to_vec(),
            alpha_modes: alpha.to_vec(),
            ..Default::default()
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn preferred_format_is_used_when_supported() {
        let c = caps(
            &[wgpu::TextureFormat::Rgba8Unorm, wgpu::TextureFormat::Bgra8Unorm],
            &[],
        );
        assert_eq!(
            choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(
            &[wgpu::TextureFormat::Rgba8UnormSrgb, wgpu::TextureFormat::Rgba8Unorm],
            &[],
        );
        assert_eq!(
            choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn no_formats_yields_none() {
        let c = caps(&[], &[]);
        assert_eq!(choose_surface_format(&c, wgpu::TextureFormat::Bgra8Unorm), None);
    }

    // ── alpha ─────────────────────────────────────────────────────────────

    #[test]
    fn requested_alpha_mode_is_kept_when_supported() {
        let c = caps(
            &[],
            &[wgpu::CompositeAlphaMode::Opaque, wgpu::CompositeAlphaMode::PreMultiplied],
        );
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::PreMultiplied
        );
    }

    #[test]
    fn unsupported_alpha_mode_falls_back_to_first() {
        let c = caps(&[], &[wgpu::CompositeAlphaMode::Opaque]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PostMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    #[test]
    fn empty_alpha_modes_fall_back_to_auto() {
        let c = caps(&[], &[]);
        assert_eq!(choose_alpha_mode(&c, None), wgpu::CompositeAlphaMode::Auto);
    }

    // ── surface errors ────────────────────────────────────────────────────

    #[test]
    fn lost_and_outdated_reconfigure() {
        for err in [SurfaceError::Lost, SurfaceError::Outdated] {
            assert_eq!(surface_error_action(&err), SurfaceErrorAction::Reconfigured);
        }
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let action = surface_error_action(&SurfaceError::OutOfMemory);
        assert_eq!(action, SurfaceErrorAction::Fatal);
    }

    #[test]
    fn timeout_skips_frame() {
        for err in [SurfaceError::Timeout, SurfaceError::Other] {
            assert_eq!(surface_error_action(&err), SurfaceErrorAction::SkipFrame);
        }
    }
}
