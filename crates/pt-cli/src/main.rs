mod output;
mod progress;
mod utils;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use output::FileOutput;
use progress::ConsoleProgress;
use pt::{sampler::DEFAULT_SEED, scene::SceneDescription, Executor, FrameBuffer, RenderOptions};
use utils::{AvailableScene, Dimensions};

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(long = "spp", default_value_t = 32)]
    /// Samples per pixel
    spp: usize,

    #[arg(long, value_enum, default_value_t)]
    /// Scene selector
    scene: AvailableScene,

    #[arg(short, long, default_value = "800x600")]
    /// Screen dimension in format `width`x`height`
    dimensions: Dimensions,

    #[arg(long, default_value_t = 32)]
    tile_size: u32,

    #[arg(long, default_value_t = DEFAULT_SEED)]
    /// Seed to use for all the random stuff.
    /// Given a seed, the rendering is deterministic whatever the number of threads.
    seed: u64,

    #[arg(short = 'j', long)]
    /// Worker threads, defaults to the number of cores
    threads: Option<usize>,

    #[arg(long, default_value_t = 0.75)]
    /// Russian roulette survival probability, in (0, 1]
    survival: f32,

    #[arg(long)]
    max_bounces: Option<u32>,

    #[arg(short, long, default_value = "output.png")]
    /// `.exr` keeps linear radiance, other formats are 8 bits sRGB
    output: PathBuf,

    #[arg(long)]
    /// Stop the render after this many tiles
    abort_after: Option<usize>,
}

impl Args {
    fn render_options(&self) -> RenderOptions {
        let Dimensions { width, height } = self.dimensions;
        RenderOptions::default()
            .dimensions(width, height)
            .spp(self.spp)
            .tile_size(self.tile_size, self.tile_size)
            .seed(self.seed)
            .threads(self.threads)
            .survival_probability(self.survival)
            .max_bounces(self.max_bounces)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("loading scene {:?}", args.scene);
    let mut description = SceneDescription::new();
    args.scene.insert_into(&mut description);
    description.camera.aspect_ratio = args.dimensions.aspect_ratio();
    let scene = description.build().context("building the scene")?;
    log::info!("scene has {} primitives", scene.primitive_count());

    let options = args.render_options();
    log::info!(
        "rendering {} at {} spp, seed {}",
        args.dimensions,
        options.samples_per_pixel,
        options.seed
    );
    let executor = Executor::new(options);
    let mut frame = FrameBuffer::new(args.dimensions.width, args.dimensions.height);
    let mut progress = ConsoleProgress::new(args.abort_after);

    let start = std::time::Instant::now();
    let status = executor
        .run(&scene, &mut frame, |report, status| {
            progress.on_progress(report, status)
        })
        .context("rendering")?;
    log::info!("render {status} in {:.2?}", start.elapsed());

    FileOutput::new(&args.output).commit(&frame)?;

    Ok(())
}
