//! Embedded WGSL programs, one per pipeline variant.

use super::{ColorIndexing, PipelineConfig};

pub const VS_ENTRY: &str = "vs_main";
pub const FS_ENTRY: &str = "fs_main";

const STATIC_WGSL: &str = include_str!("shaders/static.wgsl");
const ANIMATED_WGSL: &str = include_str!("shaders/animated.wgsl");
const INDEXED_WGSL: &str = include_str!("shaders/indexed.wgsl");

/// Returns the WGSL program for `config`.
///
/// The uniform declaration is present iff `config.time_uniform`. Without the
/// uniform only vertices 0..3 are ever drawn, where `i % 3 == i`, so both color
/// indexings share the static program.
pub fn shader_source(config: &PipelineConfig) -> &'static str {
    match (config.time_uniform, config.color_indexing) {
        (false, _) => STATIC_WGSL,
        (true, ColorIndexing::Direct) => ANIMATED_WGSL,
        (true, ColorIndexing::Modulo3) => INDEXED_WGSL,
    }
}
