//! The single-triangle frame pipeline.
//!
//! Setup (`FramePipeline::new`) builds every immutable GPU object once; the
//! per-frame routine replays a `FramePlan`: `write_uniforms` queues the time
//! value, then `record` encodes one render pass, one bind and one draw.
//!
//! Variants differ only by `PipelineConfig`:
//! - `STATIC`: fixed triangle, no uniform
//! - `ANIMATED`: positions driven by a time uniform
//! - `INDEXED`: animated, colors selected by `vertex_index % 3`

mod config;
mod frame_pipeline;
mod geometry;
mod plan;
mod shader;

pub use config::{ColorIndexing, PipelineConfig};
pub use frame_pipeline::FramePipeline;
pub use geometry::{
    animated_position, vertex_color, vertex_position, INSTANCE_COUNT, PHASE_X, PHASE_Y,
    STATIC_POSITIONS, VERTEX_COLORS, VERTEX_COUNT,
};
pub use plan::{DrawCall, FramePlan, TimeUniform, UniformWrite};
pub use shader::{shader_source, FS_ENTRY, VS_ENTRY};
