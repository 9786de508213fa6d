use std::num::NonZeroU64;

use anyhow::Result;

use crate::render::{RenderCtx, RenderTarget};

use super::{shader_source, FramePlan, PipelineConfig, TimeUniform, FS_ENTRY, VS_ENTRY};

const TIME_UNIFORM_MIN_BINDING_SIZE: NonZeroU64 = match NonZeroU64::new(TimeUniform::SIZE) {
    Some(size) => size,
    None => panic!("TimeUniform must not be zero-sized"),
};

/// Clear to opaque black, then store.
const COLOR_OPS: wgpu::Operations<wgpu::Color> = wgpu::Operations {
    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
    store: wgpu::StoreOp::Store,
};

/// Time uniform buffer and the bind group exposing it at binding 0.
struct TimeBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Immutable GPU state for drawing one triangle per frame.
///
/// Everything is built once in [`FramePipeline::new`]; afterwards only the
/// time uniform's contents change.
pub struct FramePipeline {
    config: PipelineConfig,
    pipeline: wgpu::RenderPipeline,
    time: Option<TimeBinding>,
    color_ops: wgpu::Operations<wgpu::Color>,
}

impl FramePipeline {
    /// Builds the shader module, optional uniform binding, pipeline layout and
    /// render pipeline for `ctx.surface_format`.
    pub fn new(ctx: &RenderCtx<'_>, config: PipelineConfig) -> Result<Self> {
        anyhow::ensure!(
            !ctx.surface_format.is_depth_stencil_format(),
            "surface format {:?} is not a color format",
            ctx.surface_format
        );

        let name = config.name();
        log::info!("building {name} frame pipeline for {:?}", ctx.surface_format);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("prism triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source(&config).into()),
        });

        let time_layout = config.time_uniform.then(|| {
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("prism time bgl"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: Some(TIME_UNIFORM_MIN_BINDING_SIZE),
                        },
                        count: None,
                    }],
                })
        });

        let time = time_layout.as_ref().map(|layout| {
            let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("prism time ubo"),
                size: TimeUniform::SIZE,
                usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::UNIFORM,
                mapped_at_creation: false,
            });

            let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("prism time bind group"),
                layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

            TimeBinding { buffer, bind_group }
        });

        let bind_group_layouts: Vec<&wgpu::BindGroupLayout> = time_layout.iter().collect();
        let pipeline_layout = ctx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("prism triangle pipeline layout"),
                bind_group_layouts: &bind_group_layouts,
                immediate_size: 0,
            });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("prism triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some(VS_ENTRY),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some(FS_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            config,
            pipeline,
            time,
            color_ops: COLOR_OPS,
        })
    }

    /// What one frame at `elapsed` seconds will do.
    pub fn plan(&self, elapsed: f32) -> FramePlan {
        FramePlan::new(&self.config, elapsed)
    }

    /// Queues the plan's uniform write.
    ///
    /// Must run before the frame's command buffer is recorded and submitted so
    /// the write lands ahead of the draw reading it.
    pub fn write_uniforms(&self, ctx: &RenderCtx<'_>, plan: &FramePlan) {
        if let (Some(write), Some(time)) = (plan.uniform_write, self.time.as_ref()) {
            ctx.queue.write_buffer(&time.buffer, write.offset, &write.bytes);
        }
    }

    /// Records the plan into `target`: clear pass, bind, draw.
    ///
    /// The caller submits the encoder and presents the surface texture.
    pub fn record(&self, target: &mut RenderTarget<'_>, plan: &FramePlan) {
        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: self.color_ops,
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&self.pipeline);
        if let (Some(slot), Some(time)) = (plan.bind_group_slot, self.time.as_ref()) {
            rpass.set_bind_group(slot, &time.bind_group, &[]);
        }
        rpass.draw(plan.draw.vertices.clone(), plan.draw.instances.clone());
    }
}
