use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, StartCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "WebGPU".to_string(),
            size: PhysicalSize::new(512, 512),
            resizable: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, acquires the device, runs `app.on_start` once, then
    /// renders continuously until the window closes.
    ///
    /// Returns the startup error (window, adapter, device or app start) if the
    /// frame loop was never entered, or the device-lost error if it ended that way.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Progress of the single window through startup and shutdown.
///
/// Frames are only rendered while `Running`; a failed start can never reach it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Lifecycle {
    Pending,
    Running,
    Failed,
    Closed,
}

impl Lifecycle {
    fn started(self, ok: bool) -> Self {
        match (self, ok) {
            (Lifecycle::Pending, true) => Lifecycle::Running,
            (Lifecycle::Pending, false) => Lifecycle::Failed,
            (other, _) => other,
        }
    }

    fn close(self) -> Self {
        match self {
            Lifecycle::Failed => Lifecycle::Failed,
            _ => Lifecycle::Closed,
        }
    }

    fn renders(self) -> bool {
        self == Lifecycle::Running
    }

    fn finished(self) -> bool {
        matches!(self, Lifecycle::Failed | Lifecycle::Closed)
    }
}

#[self_referencing]
struct WindowEntry {
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    lifecycle: Lifecycle,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            lifecycle: Lifecycle::Pending,
            failure: None,
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        let mut entry = WindowEntryTryBuilder {
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| pollster::block_on(Gpu::new(w, gpu_init)),
        }
        .try_build()?;

        let app = &mut self.app;
        entry
            .with(|fields| {
                let ctx = StartCtx {
                    window: WindowCtx {
                        id: fields.window.id(),
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                };
                app.on_start(&ctx)
            })
            .context("application start failed")?;

        // Elapsed time counts from the first frame, not from window creation.
        entry.with_mut(|fields| fields.clock.reset());

        Ok(entry)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.lifecycle = self.lifecycle.started(false);
        self.entry = None;
        self.failure = Some(err);
        event_loop.exit();
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.lifecycle = self.lifecycle.close();
        self.entry = None;
        event_loop.exit();
    }

    fn device_lost(&self) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| entry.borrow_gpu().is_device_lost())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId) {
        if !self.lifecycle.renders() {
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };

        let control = entry.with_mut(|fields| {
            let time = fields.clock.tick();
            let control = {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        id: window_id,
                        window: fields.window,
                    },
                    gpu: &mut *fields.gpu,
                    time,
                };
                app.on_frame(&mut ctx)
            };

            fields.gpu.poll();
            control
        });

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle != Lifecycle::Pending {
            return;
        }

        match self.create_window_entry(event_loop) {
            Ok(entry) => {
                let adapter = entry.with_gpu(|gpu| gpu.adapter_info());
                log::info!(
                    "frame loop started on {} ({:?}, {})",
                    adapter.name,
                    adapter.backend,
                    adapter.driver
                );
                entry.with_window(|w| w.request_redraw());
                self.entry = Some(entry);
                self.lifecycle = self.lifecycle.started(true);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.finished() {
            event_loop.exit();
            return;
        }

        if self.device_lost() {
            self.failure = Some(anyhow!("GPU device lost"));
            self.shutdown(event_loop);
            return;
        }

        // Continuous redraw: one frame per loop iteration, paced by FIFO present.
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.lifecycle.finished() {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(window_id, &event) == AppControl::Exit {
            self.shutdown(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                self.shutdown(event_loop);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, window_id),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_is_fixed_512() {
        let cfg = RuntimeConfig::default();
        assert_eq!(cfg.size, PhysicalSize::new(512, 512));
        assert!(!cfg.resizable);
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn successful_start_renders() {
        let l = Lifecycle::Pending.started(true);
        assert_eq!(l, Lifecycle::Running);
        assert!(l.renders());
    }

    #[test]
    fn failed_start_never_renders() {
        let l = Lifecycle::Pending.started(false);
        assert_eq!(l, Lifecycle::Failed);
        assert!(!l.renders());
        assert!(l.finished());
        // A late success report cannot revive a failed start.
        assert!(!l.started(true).renders());
        assert_eq!(l.close(), Lifecycle::Failed);
    }

    #[test]
    fn pending_does_not_render() {
        assert!(!Lifecycle::Pending.renders());
        assert!(!Lifecycle::Pending.finished());
    }

    #[test]
    fn close_stops_rendering() {
        let l = Lifecycle::Running.close();
        assert_eq!(l, Lifecycle::Closed);
        assert!(!l.renders());
        assert!(l.finished());
    }
}
