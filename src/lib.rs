pub mod args;
pub mod choices;
pub mod config;
pub mod error;
pub mod install;
pub mod log;
pub mod materialize;
pub mod pipeline;
pub mod progress;
pub mod prompt;
pub mod runner;
pub mod templates;
pub mod vcs;

pub use choices::{ProjectName, Strictness, UserChoices};
pub use error::{Result, ScaffoldError};
pub use pipeline::{Failure, Outcome, Pipeline, Stage, VcsStatus};
