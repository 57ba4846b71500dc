use std::{
    io::Write,
    time::{Duration, Instant},
};

use pt::{ProgressReport, RenderCommand, RenderStatus};

const REFRESH_PERIOD: Duration = Duration::from_millis(300);

/// Prints the render progress on a single console line
///
/// Can also stop the render once enough tiles are done, which is handy to
/// look at a partial image.
pub struct ConsoleProgress {
    abort_after: Option<usize>,
    last_print: Option<Instant>,
}

impl ConsoleProgress {
    pub fn new(abort_after: Option<usize>) -> Self {
        Self {
            abort_after,
            last_print: None,
        }
    }

    pub fn command(&self, report: &ProgressReport) -> RenderCommand {
        match self.abort_after {
            Some(n) if report.tiles_completed >= n => RenderCommand::Abort,
            _ => RenderCommand::Continue,
        }
    }

    pub fn on_progress(&mut self, report: &ProgressReport, status: RenderStatus) -> RenderCommand {
        let now = Instant::now();
        let due = self
            .last_print
            .map_or(true, |last| now.duration_since(last) >= REFRESH_PERIOD);

        if status != RenderStatus::Running {
            println!("\r{report} ({status})");
        } else if due {
            self.last_print = Some(now);
            print!("\r{report}");
            let _ = std::io::stdout().flush();
        }

        self.command(report)
    }
}
