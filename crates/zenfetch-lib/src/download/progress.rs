use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Receives the progress of a single download at a time.
///
/// `update` is called with the cumulative number of bytes written so far, so the
/// reported values never decrease.
pub trait DownloadProgress: Send + Sync {
    fn start(&self, name: &str, total: Option<u64>);
    fn update(&self, transferred: u64);
    fn finish(&self);
}

/// Discards all progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl DownloadProgress for NoProgress {
    fn start(&self, _name: &str, _total: Option<u64>) {}
    fn update(&self, _transferred: u64) {}
    fn finish(&self) {}
}

fn bytes_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {spinner:.dim} {prefix:20!} [{elapsed_precise}] [{bar:20!.bright.yellow/dim.white}] {bytes:>10}/{total_bytes:10} @ {bytes_per_sec:>12}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╾─")
}

fn unknown_size_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "  {spinner:.green} {prefix:20!} [{elapsed_precise}] {bytes:>10} @ {bytes_per_sec:>12}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// Terminal progress bar on stderr, one bar per download.
#[derive(Default)]
pub struct ProgressBarReporter {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressBarReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(current) = self.current.lock()
            && let Some(bar) = current.as_ref()
        {
            f(bar);
        }
    }
}

impl DownloadProgress for ProgressBarReporter {
    fn start(&self, name: &str, total: Option<u64>) {
        let bar = match total {
            Some(total) => ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr())
                .with_style(bytes_style()),
            None => {
                let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
                    .with_style(unknown_size_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        bar.set_prefix(name.to_string());

        if let Ok(mut current) = self.current.lock()
            && let Some(previous) = current.replace(bar)
        {
            previous.abandon();
        }
    }

    fn update(&self, transferred: u64) {
        self.with_bar(|bar| bar.set_position(transferred));
    }

    fn finish(&self) {
        if let Ok(mut current) = self.current.lock()
            && let Some(bar) = current.take()
        {
            bar.finish();
        }
    }
}
