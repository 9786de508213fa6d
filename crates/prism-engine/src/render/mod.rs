//! GPU rendering subsystem.
//!
//! A renderer owns its GPU resources (pipelines, buffers) and records its draw
//! into the `RenderTarget` it is handed each frame.

mod ctx;
pub mod pipeline;

pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::{
    ColorIndexing, DrawCall, FramePipeline, FramePlan, PipelineConfig, UniformWrite,
};
