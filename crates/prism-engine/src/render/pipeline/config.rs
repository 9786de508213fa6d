/// How the vertex stage picks each vertex's color.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorIndexing {
    /// `colors[vertex_index]`; only valid for the three triangle vertices.
    Direct,
    /// `colors[vertex_index % 3]`.
    Modulo3,
}

/// Parameterizes the one frame pipeline.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PipelineConfig {
    /// Bind a 4-byte time uniform at group 0 / binding 0 and animate positions with it.
    pub time_uniform: bool,
    pub color_indexing: ColorIndexing,
}

impl PipelineConfig {
    /// Fixed triangle, no uniform.
    pub const STATIC: Self = Self {
        time_uniform: false,
        color_indexing: ColorIndexing::Direct,
    };

    /// Time-animated triangle.
    pub const ANIMATED: Self = Self {
        time_uniform: true,
        color_indexing: ColorIndexing::Direct,
    };

    /// Time-animated triangle with `i % 3` color lookup.
    pub const INDEXED: Self = Self {
        time_uniform: true,
        color_indexing: ColorIndexing::Modulo3,
    };

    /// Short name used in labels and logs.
    pub fn name(&self) -> &'static str {
        match (self.time_uniform, self.color_indexing) {
            (false, ColorIndexing::Direct) => "static",
            (false, ColorIndexing::Modulo3) => "static-indexed",
            (true, ColorIndexing::Direct) => "animated",
            (true, ColorIndexing::Modulo3) => "indexed",
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::ANIMATED
    }
}
