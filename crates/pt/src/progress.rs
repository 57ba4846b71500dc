use std::{
    fmt::Display,
    sync::atomic::{self, AtomicUsize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RenderStatus {
    #[display("running")]
    Running,
    #[display("done")]
    Done,
    #[display("aborted")]
    Aborted,
    #[display("failed")]
    Failed,
}

/// What the progress callback wants the render to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum RenderCommand {
    #[default]
    #[display("continue")]
    Continue,
    #[display("abort")]
    Abort,
}

/// A snapshot of the render progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressReport {
    /// Tiles already written to the frame buffer
    pub tiles_completed: usize,
    pub tiles_target: usize,
    pub primary_rays_traced: usize,
    pub primary_rays_target: usize,
}

impl ProgressReport {
    /// Fraction of the primary rays traced, in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.primary_rays_target == 0 {
            1.0
        } else {
            (self.primary_rays_traced as f32 / self.primary_rays_target as f32).clamp(0.0, 1.0)
        }
    }
}

impl Display for ProgressReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}/{} tiles",
            PercentBar {
                percent: self.fraction(),
                width: 50
            },
            self.tiles_completed,
            self.tiles_target
        )
    }
}

/// Render counters, readable from any thread
#[derive(Debug, Default)]
pub struct Progress {
    tiles_completed: AtomicUsize,
    primary_rays_traced: AtomicUsize,
    tiles_target: usize,
    primary_rays_target: usize,
}

impl Progress {
    pub fn new(tiles_target: usize, primary_rays_target: usize) -> Self {
        Self {
            tiles_target,
            primary_rays_target,
            ..Default::default()
        }
    }

    /// Account for one more tile written to the frame buffer
    pub fn add_tile(&self, primary_rays: usize) {
        self.primary_rays_traced
            .fetch_add(primary_rays, atomic::Ordering::SeqCst);
        self.tiles_completed.fetch_add(1, atomic::Ordering::SeqCst);
    }

    pub fn report(&self) -> ProgressReport {
        ProgressReport {
            tiles_completed: self.tiles_completed.load(atomic::Ordering::SeqCst),
            tiles_target: self.tiles_target,
            primary_rays_traced: self.primary_rays_traced.load(atomic::Ordering::SeqCst),
            primary_rays_target: self.primary_rays_target,
        }
    }
}

pub struct PercentBar {
    pub percent: f32,
    pub width: usize,
}

impl Display for PercentBar {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filled = ((self.width - 1) as f32 * self.percent).round() as usize;
        write!(
            f,
            "[{empty:=>width_left$}>{empty:.<width_right$}] {percent:.1}%",
            empty = "",
            width_left = filled,
            width_right = self.width - 1 - filled,
            percent = 100. * self.percent
        )
    }
}
