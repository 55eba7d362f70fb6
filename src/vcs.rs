use std::path::Path;

use thiserror::Error;

use crate::{
    error::ScaffoldError,
    runner::{CommandRunner, Invocation},
};

pub const COMMIT_MESSAGE: &str = "Initial commit";

/// The step that stopped repository setup.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct StepFailure {
    /// Steps that finished before this one.
    pub completed: usize,
    pub step: Invocation,
    #[source]
    pub source: ScaffoldError,
}

impl StepFailure {
    /// The first step creates the repository; it stays once that succeeded.
    #[must_use]
    pub fn repository_created(&self) -> bool {
        self.completed > 0
    }
}

/// Commands that turn a directory into a repository with one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vcs {
    steps: Vec<Invocation>,
}

impl Vcs {
    #[must_use]
    pub fn new(steps: Vec<Invocation>) -> Self {
        Self { steps }
    }

    /// `git init`, `git add -A`, `git commit -m "Initial commit"`.
    #[must_use]
    pub fn git() -> Self {
        Self::new(vec![
            Invocation::new("git", ["init"]),
            Invocation::new("git", ["add", "-A"]),
            Invocation::new("git", ["commit", "-m", COMMIT_MESSAGE]),
        ])
    }

    /// Runs each step in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// A [`StepFailure`] for the first step that failed to start or exited
    /// non-zero.
    pub fn initialize(
        &self,
        runner: &dyn CommandRunner,
        target: &Path,
    ) -> Result<(), StepFailure> {
        for (completed, step) in self.steps.iter().enumerate() {
            step.run_in(runner, target)
                .map_err(|source| StepFailure {
                    completed,
                    step: step.clone(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl Default for Vcs {
    fn default() -> Self {
        Self::git()
    }
}
