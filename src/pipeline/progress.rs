use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Optional per-record progress display on stderr.
pub(crate) struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    /// A bar when the record count is known, otherwise a spinner.
    pub(crate) fn new(enabled: bool, total: Option<usize>, label: &str) -> Self {
        if !enabled {
            return Self { bar: None };
        }
        let bar = match total {
            Some(n) => {
                let bar = ProgressBar::new(n as u64);
                bar.set_style(
                    ProgressStyle::with_template("  {msg} [{bar:32.cyan/blue}] {pos}/{len} ({eta})")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("  {spinner:.cyan} {msg} {pos} records")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner())
                        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
                );
                bar.enable_steady_tick(Duration::from_millis(80));
                bar
            }
        };
        bar.set_message(label.to_string());
        Self { bar: Some(bar) }
    }

    pub(crate) fn tick(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    pub(crate) fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
