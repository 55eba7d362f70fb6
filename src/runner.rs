use std::{
    fmt::Display,
    io,
    path::Path,
    process::{Command, Stdio},
};

use crate::error::{Result, ScaffoldError};

/// What is kept of a finished subprocess. Stdout is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stderr: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program to completion inside a directory.
pub trait CommandRunner {
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the program could not be started.
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput>;
}

/// Spawns real processes with stdin closed and output piped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String], cwd: &Path) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the invocation in `cwd`, treating a non-zero exit as an error.
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::Spawn`] if the program could not be started and
    /// [`ScaffoldError::CommandFailed`] if it did not exit with code 0.
    pub fn run_in(&self, runner: &dyn CommandRunner, cwd: &Path) -> Result<CommandOutput> {
        crate::trace!("Running `{}` in {}", self, cwd.display());

        let output =
            runner
                .run(&self.program, &self.args, cwd)
                .map_err(|source| ScaffoldError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;

        if output.success() {
            Ok(output)
        } else {
            Err(ScaffoldError::CommandFailed {
                command: self.to_string(),
                code: output.code,
                stderr: output.stderr,
            })
        }
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
