use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Step reporter for long-running pipeline stages.
///
/// Pipeline functions take an `Option<&ProgressReporter>`; passing `None`
/// runs the transformation with no reporting side effects, which keeps the
/// core logic unit-testable. A silent reporter accepts every call without
/// drawing anything, for callers that decide at runtime.
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    pub fn new(total: u64, message: &str, silent: bool) -> Self {
        if silent {
            Self { progress_bar: None }
        } else {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(100));

            Self {
                progress_bar: Some(pb),
            }
        }
    }

    /// Advance by `delta` steps with a new status message.
    pub fn advance(&self, delta: u64, message: &str) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(delta);
            pb.set_message(message.to_string());
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish();
        }
    }
}

/// Report a stage advance when a reporter is attached.
pub(crate) fn advance(progress: Option<&ProgressReporter>, delta: u64, message: &str) {
    if let Some(p) = progress {
        p.advance(delta, message);
    }
}
