//! The triangle demos, one `PipelineConfig` per binary.

use anyhow::Result;

use prism_engine::core::{App, AppControl, FrameCtx, StartCtx};
use prism_engine::device::GpuInit;
use prism_engine::logging::{init_logging, LoggingConfig};
use prism_engine::render::{FramePipeline, PipelineConfig};
use prism_engine::window::{Runtime, RuntimeConfig};

/// Draws one triangle per frame through a [`FramePipeline`].
pub struct TriangleApp {
    config: PipelineConfig,
    pipeline: Option<FramePipeline>,
}

impl TriangleApp {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            pipeline: None,
        }
    }
}

impl App for TriangleApp {
    fn on_start(&mut self, ctx: &StartCtx<'_, '_>) -> Result<()> {
        self.pipeline = Some(FramePipeline::new(&ctx.render_ctx(), self.config)?);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pipeline) = self.pipeline.as_ref() else {
            log::error!("frame requested before the pipeline was built");
            return AppControl::Exit;
        };

        let plan = pipeline.plan(ctx.time.elapsed);
        pipeline.write_uniforms(&ctx.render_ctx(), &plan);
        ctx.render(|_, target| pipeline.record(target, &plan))
    }
}

/// Initializes logging and runs the demo for `config` until the window closes.
pub fn run(config: PipelineConfig) -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting {} triangle", config.name());

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        TriangleApp::new(config),
    )
}
