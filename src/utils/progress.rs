//! Search progress on stderr. Becomes a no-op when the `progress` feature is
//! disabled.

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

#[cfg(not(feature = "progress"))]
use self::noop::{ProgressBar, ProgressStyle};

use std::time::Duration;

/// Cells a worker scans between progress updates.
pub const PROGRESS_BATCH: u64 = 1 << 16;

const BAR_TEMPLATE: &str =
    "{spinner:.cyan} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% ({eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

/// Progress over the cells of a search volume.
///
/// Volumes beyond `u64::MAX` cells fall back to a spinner.
pub struct SearchProgress {
    bar: Option<ProgressBar>,
}

impl SearchProgress {
    pub fn new(total_cells: u128, enabled: bool) -> Self {
        if !enabled {
            return Self::hidden();
        }

        let bar = match u64::try_from(total_cells) {
            Ok(total) => {
                let bar = ProgressBar::new(total);
                if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                    bar.set_style(style.progress_chars("#>-"));
                }
                bar
            }
            Err(_) => {
                let spinner = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template(SPINNER_TEMPLATE) {
                    spinner.set_style(style);
                }
                spinner.set_message(format!("Scanning {} cells...", total_cells));
                spinner.enable_steady_tick(Duration::from_millis(120));
                spinner
            }
        };

        Self { bar: Some(bar) }
    }

    pub fn hidden() -> Self {
        Self { bar: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.bar.is_some()
    }

    #[inline]
    pub fn advance(&self, cells: u64) {
        if let Some(bar) = &self.bar {
            bar.inc(cells);
        }
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(not(feature = "progress"))]
mod noop {
    use std::time::Duration;

    #[derive(Clone)]
    pub struct ProgressBar;

    impl ProgressBar {
        pub fn new(_len: u64) -> Self {
            ProgressBar
        }

        pub fn new_spinner() -> Self {
            ProgressBar
        }

        pub fn set_style(&self, _style: ProgressStyle) {}
        pub fn set_message(&self, _msg: impl Into<std::borrow::Cow<'static, str>>) {}
        pub fn enable_steady_tick(&self, _interval: Duration) {}
        pub fn inc(&self, _delta: u64) {}
        pub fn finish_and_clear(&self) {}
    }

    pub struct ProgressStyle;

    impl ProgressStyle {
        pub fn default_spinner() -> Self {
            ProgressStyle
        }

        pub fn default_bar() -> Self {
            ProgressStyle
        }

        pub fn template(self, _template: &str) -> Result<Self, std::convert::Infallible> {
            Ok(self)
        }

        pub fn progress_chars(self, _chars: &str) -> Self {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_is_inert() {
        let progress = SearchProgress::new(1_000, false);
        assert!(!progress.is_enabled());
        progress.advance(10);
        progress.finish();
    }
}
