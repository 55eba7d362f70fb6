use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("{} already exists, refusing to overwrite it", .0.display())]
    TargetExists(PathBuf),

    #[error("invalid project name {0:?}: use only letters, digits, '-' and '_'")]
    InvalidProjectName(String),

    #[error("failed to {action} {}: {source}", .path.display())]
    Template {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` {}", describe_exit(.code, .stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("install finished but {lock_file} was not created in {}", .dir.display())]
    InstallVerification { lock_file: String, dir: PathBuf },

    #[error("invalid value {value:?} for {name}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl ScaffoldError {
    pub(crate) fn template(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Template {
            action,
            path,
            source,
        }
    }
}

fn describe_exit(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    };

    match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
        Some(last) => format!("{status}: {}", last.trim()),
        None => status,
    }
}
