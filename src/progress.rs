use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Spinner shown while the row store is being fetched
pub struct LoadingIndicator {
    bar: ProgressBar,
    start_time: Instant,
}

impl LoadingIndicator {
    pub fn new(message: impl Into<String>, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));

        Self {
            bar,
            start_time: Instant::now(),
        }
    }

    pub fn finish(self, rows: usize) {
        self.bar.finish_and_clear();
        log::info!(
            "Loaded {rows} entries in {:.2?}",
            self.start_time.elapsed()
        );
    }

    pub fn abandon(self) {
        self.bar.abandon();
    }
}
