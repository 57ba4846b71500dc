//! Tile parallel render loop.
//!
//! Tiles are rendered on a rayon pool and sent over a channel to the calling
//! thread, the only one writing into the frame buffer and talking to the
//! progress callback.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver},
    },
    time::{Duration, Instant},
};

use log::{debug, error, info, trace, warn};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    color::Rgb,
    error::{RenderError, Result},
    frame_buffer::FrameBuffer,
    integrators::PathTracer,
    progress::{Progress, ProgressReport, RenderCommand, RenderStatus},
    sampler::{TileStreams, DEFAULT_SEED},
    scene::SceneData,
    tile::{FrameTiling, Tile},
    Rng,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: usize,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Russian roulette survival probability, in (0, 1]. 1 disables the roulette.
    pub survival_probability: f32,
    /// Paths stop after this many bounces, unbounded when None
    pub max_bounces: Option<u32>,
    pub seed: u64,
    /// Size of the worker pool, rayon's default when None
    pub threads: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 32,
            tile_width: 32,
            tile_height: 32,
            survival_probability: 0.75,
            max_bounces: None,
            seed: DEFAULT_SEED,
            threads: None,
        }
    }
}

impl RenderOptions {
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn spp(mut self, samples_per_pixel: usize) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self
    }

    pub fn tile_size(mut self, tile_width: u32, tile_height: u32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    pub fn survival_probability(mut self, survival_probability: f32) -> Self {
        self.survival_probability = survival_probability;
        self
    }

    pub fn max_bounces(mut self, max_bounces: Option<u32>) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(RenderError::InvalidConfig(msg));
        if self.samples_per_pixel == 0 {
            return invalid("samples per pixel must be positive".to_owned());
        }
        if self.width == 0 || self.height == 0 {
            return invalid(format!(
                "frame {}x{} has no pixel",
                self.width, self.height
            ));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return invalid(format!(
                "tile size {}x{} has no pixel",
                self.tile_width, self.tile_height
            ));
        }
        if !(self.survival_probability > 0.0 && self.survival_probability <= 1.0) {
            return invalid(format!(
                "survival probability {} is not in (0, 1]",
                self.survival_probability
            ));
        }
        if self.threads == Some(0) {
            return invalid("the worker pool needs at least one thread".to_owned());
        }
        Ok(())
    }

    pub fn tiling(&self) -> Result<FrameTiling> {
        FrameTiling::new(self.width, self.height, self.tile_width, self.tile_height)
    }
}

struct TileMsg {
    tile: Tile,
    pixels: Vec<Rgb>,
}

/// Why workers stopped picking up tiles
#[derive(Debug)]
enum Interruption {
    Cancelled,
    Disconnected,
}

pub struct Executor {
    options: RenderOptions,
}

impl Executor {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render `scene` into `frame_buffer`
    ///
    /// `on_progress` is called on the calling thread after each tile and once
    /// more with the final status. Returning [RenderCommand::Abort] stops the
    /// dispatch of new tiles, the ones being rendered still complete.
    pub fn run<F>(
        &self,
        scene: &SceneData,
        frame_buffer: &mut FrameBuffer,
        mut on_progress: F,
    ) -> Result<RenderStatus>
    where
        F: FnMut(&ProgressReport, RenderStatus) -> RenderCommand,
    {
        let options = &self.options;
        options.validate()?;
        if (frame_buffer.width(), frame_buffer.height()) != (options.width, options.height) {
            return Err(RenderError::InvalidConfig(format!(
                "frame buffer is {}x{} but the render is {}x{}",
                frame_buffer.width(),
                frame_buffer.height(),
                options.width,
                options.height
            )));
        }

        let tiling = options.tiling()?;
        let tracer = PathTracer {
            samples_per_pixel: options.samples_per_pixel,
            survival_probability: options.survival_probability,
            max_bounces: options.max_bounces,
        };
        let frame_size = tiling.frame_size();

        let work: Vec<(Tile, Rng)> = tiling.tiles().zip(TileStreams::new(options.seed)).collect();
        let progress = Progress::new(
            tiling.tile_count(),
            options.width as usize * options.height as usize * options.samples_per_pixel,
        );
        let cancel = AtomicBool::new(false);

        let mut pool = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("pt-worker-{i}"));
        if let Some(threads) = options.threads {
            pool = pool.num_threads(threads);
        }
        let pool = pool.build()?;

        info!(
            "Rendering {}x{} at {} spp: {} tiles over {} threads",
            options.width,
            options.height,
            options.samples_per_pixel,
            tiling.tile_count(),
            pool.current_num_threads()
        );
        info!(
            "Scene has {} spheres, {} planes and {} materials",
            scene.spheres().len(),
            scene.planes().len(),
            scene.materials().len()
        );
        let start = Instant::now();

        let (tx, rx) = channel::<TileMsg>();
        let workers = std::thread::scope(|s| {
            let handle = s.spawn(|| {
                let tx = tx; // Force move without moving anything else
                pool.install(|| {
                    work.into_par_iter().try_for_each_init(
                        || tx.clone(),
                        |tx, (tile, mut rng)| {
                            if cancel.load(Ordering::SeqCst) {
                                return Err(Interruption::Cancelled);
                            }
                            trace!("working on tile {tile:?}");
                            let pixels = tracer.render_tile(scene, frame_size, tile.rect, &mut rng);
                            tx.send(TileMsg { tile, pixels })
                                .map_err(|_| Interruption::Disconnected)
                        },
                    )
                })
            });

            let rx: Receiver<TileMsg> = rx;
            for msg in rx.iter() {
                frame_buffer.write_rect(msg.tile.rect, &msg.pixels);
                progress.add_tile(msg.tile.rect.len() * tracer.samples_per_pixel);
                debug!("tile {} done", msg.tile.id);
                let command = on_progress(&progress.report(), RenderStatus::Running);
                if command == RenderCommand::Abort && !cancel.swap(true, Ordering::SeqCst) {
                    warn!("Render abort requested, finishing the tiles in flight");
                }
            }

            handle.join()
        });

        let report = progress.report();
        let status = final_status(workers, &report);
        on_progress(&report, status);
        conclude(status, &report, start.elapsed())
    }
}

/// How the render ended, from the way the workers stopped and the tiles written
///
/// A render that wrote every tile is done, even if an abort came with the last one.
fn final_status(
    workers: std::thread::Result<std::result::Result<(), Interruption>>,
    report: &ProgressReport,
) -> RenderStatus {
    match workers {
        Err(_) => RenderStatus::Failed,
        Ok(_) if report.tiles_completed == report.tiles_target => RenderStatus::Done,
        Ok(Err(Interruption::Disconnected)) => RenderStatus::Failed,
        Ok(_) => RenderStatus::Aborted,
    }
}

fn conclude(
    status: RenderStatus,
    report: &ProgressReport,
    elapsed: Duration,
) -> Result<RenderStatus> {
    match status {
        RenderStatus::Failed => {
            error!("Render failed after {elapsed:.2?}");
            Err(RenderError::WorkerPanicked)
        }
        RenderStatus::Aborted => {
            warn!(
                "Render aborted after {elapsed:.2?}, {}/{} tiles rendered",
                report.tiles_completed, report.tiles_target
            );
            Ok(status)
        }
        _ => {
            info!("Image fully generated in {elapsed:.2?}");
            Ok(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{examples::DebugScene, SceneDescription};

    fn debug_scene() -> SceneData {
        let mut scene = SceneDescription::new();
        DebugScene::insert_into(&mut scene);
        scene.build().expect("valid scene")
    }

    #[test]
    fn invalid_options_are_rejected() {
        let base = RenderOptions::default();
        for options in [
            base.clone().spp(0),
            base.clone().dimensions(0, 10),
            base.clone().tile_size(16, 0),
            base.clone().survival_probability(0.0),
            base.clone().survival_probability(1.5),
            base.clone().survival_probability(f32::NAN),
            base.clone().threads(Some(0)),
        ] {
            assert!(
                matches!(options.validate(), Err(RenderError::InvalidConfig(_))),
                "{options:?}"
            );
        }
        assert!(base.validate().is_ok());
    }

    #[test]
    fn mismatched_frame_buffer_is_rejected() {
        let options = RenderOptions::default().dimensions(8, 8);
        let mut fb = FrameBuffer::new(8, 4);
        let mut calls = 0;
        let result = Executor::new(options).run(&debug_scene(), &mut fb, |_, _| {
            calls += 1;
            RenderCommand::Continue
        });
        assert!(matches!(result, Err(RenderError::InvalidConfig(_))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn reports_every_tile_then_done() {
        let options = RenderOptions::default()
            .dimensions(12, 8)
            .tile_size(4, 4)
            .spp(2)
            .threads(Some(2));
        let mut fb = FrameBuffer::new(12, 8);
        let mut reports = Vec::new();
        let status = Executor::new(options)
            .run(&debug_scene(), &mut fb, |report, status| {
                reports.push((*report, status));
                RenderCommand::Continue
            })
            .expect("render succeeds");

        assert_eq!(status, RenderStatus::Done);
        assert_eq!(reports.len(), 7);
        let (last, last_status) = reports[6];
        assert_eq!(last_status, RenderStatus::Done);
        assert_eq!(last.tiles_completed, 6);
        assert_eq!(last.tiles_target, 6);
        assert_eq!(last.primary_rays_traced, 12 * 8 * 2);
        assert_eq!(last.primary_rays_target, 12 * 8 * 2);
        assert!(reports[..6]
            .iter()
            .all(|(_, status)| *status == RenderStatus::Running));
        // a report only counts the tiles already in the frame buffer
        for (i, (report, _)) in reports[..6].iter().enumerate() {
            assert_eq!(report.tiles_completed, i + 1);
            assert_eq!(report.primary_rays_traced, (i + 1) * 4 * 4 * 2);
        }
    }

    fn report(tiles_completed: usize) -> ProgressReport {
        ProgressReport {
            tiles_completed,
            tiles_target: 4,
            primary_rays_traced: tiles_completed * 16,
            primary_rays_target: 64,
        }
    }

    #[test]
    fn status_from_how_workers_ended() {
        let all = report(4);
        let some = report(2);

        let panicked = || -> std::thread::Result<std::result::Result<(), Interruption>> {
            Err(Box::new("tile panicked"))
        };
        assert_eq!(final_status(panicked(), &some), RenderStatus::Failed);
        assert_eq!(final_status(panicked(), &all), RenderStatus::Failed);

        assert_eq!(final_status(Ok(Ok(())), &all), RenderStatus::Done);
        // the abort arrived with the last tile
        assert_eq!(
            final_status(Ok(Err(Interruption::Cancelled)), &all),
            RenderStatus::Done
        );
        assert_eq!(
            final_status(Ok(Err(Interruption::Cancelled)), &some),
            RenderStatus::Aborted
        );
        assert_eq!(
            final_status(Ok(Err(Interruption::Disconnected)), &some),
            RenderStatus::Failed
        );
    }

    #[test]
    fn failure_is_an_error() {
        let elapsed = Duration::from_millis(3);
        assert!(matches!(
            conclude(RenderStatus::Failed, &report(1), elapsed),
            Err(RenderError::WorkerPanicked)
        ));
        assert!(matches!(
            conclude(RenderStatus::Aborted, &report(1), elapsed),
            Ok(RenderStatus::Aborted)
        ));
        assert!(matches!(
            conclude(RenderStatus::Done, &report(4), elapsed),
            Ok(RenderStatus::Done)
        ));
    }
}
