use prism_engine::render::PipelineConfig;

fn main() -> anyhow::Result<()> {
    prism_demo::run(PipelineConfig::STATIC)
}
