use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use super::{PipelineConfig, INSTANCE_COUNT, VERTEX_COUNT};

/// GPU layout of the time uniform: one `f32`, seconds since start.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TimeUniform {
    pub seconds: f32,
}

impl TimeUniform {
    pub const SIZE: wgpu::BufferAddress = std::mem::size_of::<TimeUniform>() as wgpu::BufferAddress;
}

/// A full overwrite of the time uniform buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformWrite {
    pub offset: wgpu::BufferAddress,
    pub bytes: [u8; 4],
}

impl UniformWrite {
    pub fn time(seconds: f32) -> Self {
        Self {
            offset: 0,
            bytes: bytemuck::cast(TimeUniform { seconds }),
        }
    }
}

/// Arguments of the non-indexed draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub vertices: Range<u32>,
    pub instances: Range<u32>,
}

impl DrawCall {
    pub const TRIANGLE: Self = Self {
        vertices: 0..VERTEX_COUNT,
        instances: 0..INSTANCE_COUNT,
    };
}

/// Everything one frame does, in order: optional uniform write, optional bind
/// at `bind_group_slot`, then `draw`.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub uniform_write: Option<UniformWrite>,
    pub bind_group_slot: Option<u32>,
    pub draw: DrawCall,
}

impl FramePlan {
    pub fn new(config: &PipelineConfig, elapsed: f32) -> Self {
        if config.time_uniform {
            Self {
                uniform_write: Some(UniformWrite::time(elapsed)),
                bind_group_slot: Some(0),
                draw: DrawCall::TRIANGLE,
            }
        } else {
            Self {
                uniform_write: None,
                bind_group_slot: None,
                draw: DrawCall::TRIANGLE,
            }
        }
    }
}
