use std::{cell::RefCell, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Started,
    Succeeded,
    Failed,
    Warned,
}

/// Spinner shown while a stage runs, replaced by a status line when it ends.
///
/// Every report is also recorded so callers can inspect what the user saw.
pub struct Progress {
    visible: bool,
    bar: RefCell<Option<ProgressBar>>,
    events: RefCell<Vec<(Status, String)>>,
}

impl Progress {
    #[must_use]
    pub fn spinner() -> Self {
        Self::with_visibility(true)
    }

    /// Records events without drawing anything.
    #[must_use]
    pub fn hidden() -> Self {
        Self::with_visibility(false)
    }

    fn with_visibility(visible: bool) -> Self {
        Self {
            visible,
            bar: RefCell::new(None),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn start(&self, message: impl Into<String>) {
        let message = message.into();
        self.finish_bar();

        if self.visible {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                bar.set_style(style);
            }
            bar.set_message(message.clone());
            bar.enable_steady_tick(Duration::from_millis(80));
            *self.bar.borrow_mut() = Some(bar);
        }

        self.record(Status::Started, message);
    }

    pub fn succeed(&self, message: impl Into<String>) {
        self.end(Status::Succeeded, message.into());
    }

    pub fn fail(&self, message: impl Into<String>) {
        self.end(Status::Failed, message.into());
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.end(Status::Warned, message.into());
    }

    #[must_use]
    pub fn events(&self) -> Vec<(Status, String)> {
        self.events.borrow().clone()
    }

    fn end(&self, status: Status, message: String) {
        self.finish_bar();

        if self.visible {
            let mark = match status {
                Status::Succeeded => "✓"
                    .if_supports_color(Stream::Stdout, |s| s.green())
                    .to_string(),
                Status::Failed => "✗"
                    .if_supports_color(Stream::Stdout, |s| s.red())
                    .to_string(),
                Status::Warned => "!"
                    .if_supports_color(Stream::Stdout, |s| s.yellow())
                    .to_string(),
                Status::Started => " ".to_string(),
            };
            println!("{mark} {message}");
        }

        self.record(status, message);
    }

    fn finish_bar(&self) {
        if let Some(bar) = self.bar.borrow_mut().take() {
            bar.finish_and_clear();
        }
    }

    fn record(&self, status: Status, message: String) {
        self.events.borrow_mut().push((status, message));
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish_bar();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_events_in_order() {
        let progress = Progress::hidden();

        progress.start("Installing");
        progress.succeed("Installed");
        progress.start("Committing");
        progress.warn("Skipped commit");

        assert_eq!(
            progress.events(),
            [
                (Status::Started, "Installing".to_string()),
                (Status::Succeeded, "Installed".to_string()),
                (Status::Started, "Committing".to_string()),
                (Status::Warned, "Skipped commit".to_string()),
            ]
        );
    }

    #[test]
    fn hidden_progress_never_creates_a_bar() {
        let progress = Progress::hidden();
        progress.start("Working");
        assert!(progress.bar.borrow().is_none());
    }
}
