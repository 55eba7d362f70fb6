use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    error::{Result, ScaffoldError},
    runner::{CommandRunner, Invocation},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Executable name. Node package managers ship as `.cmd` shims on Windows.
    #[must_use]
    pub fn program(&self) -> String {
        if cfg!(windows) && *self != Self::Bun {
            format!("{}.cmd", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    /// Lock files an install may leave behind. Bun wrote the binary
    /// `bun.lockb` before 1.2 and the text `bun.lock` since.
    #[must_use]
    pub fn lock_files(&self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["package-lock.json"],
            Self::Pnpm => &["pnpm-lock.yaml"],
            Self::Yarn => &["yarn.lock"],
            Self::Bun => &["bun.lock", "bun.lockb"],
        }
    }

    /// How a package script is invoked, e.g. `npm run dev`.
    #[must_use]
    pub fn run_script(&self, script: &str) -> String {
        format!("{} run {script}", self.as_str())
    }
}

impl Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|pm| pm.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown package manager {s:?}"))
    }
}

/// Install command plus the lock files that prove it finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installer {
    pub command: Invocation,
    /// Accepted lock file names, checked in order.
    pub lock_files: Vec<String>,
}

impl Installer {
    pub fn new<I, S>(command: Invocation, lock_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command,
            lock_files: lock_files.into_iter().map(Into::into).collect(),
        }
    }

    /// Runs the install in `target` and returns the path of the first lock
    /// file found.
    ///
    /// A zero exit status is not enough: one of the lock files must exist
    /// afterwards.
    ///
    /// # Errors
    ///
    /// [`ScaffoldError::Spawn`] or [`ScaffoldError::CommandFailed`] from the
    /// subprocess, or [`ScaffoldError::InstallVerification`] if the lock file
    /// is missing.
    pub fn install(&self, runner: &dyn CommandRunner, target: &Path) -> Result<PathBuf> {
        self.command.run_in(runner, target)?;

        self.lock_files
            .iter()
            .map(|name| target.join(name))
            .find(|lock| lock.is_file())
            .ok_or_else(|| ScaffoldError::InstallVerification {
                lock_file: self.lock_files.join(" or "),
                dir: target.to_path_buf(),
            })
    }
}

impl From<PackageManager> for Installer {
    fn from(pm: PackageManager) -> Self {
        Self::new(Invocation::new(pm.program(), ["install"]), pm.lock_files().iter().copied())
    }
}

impl Default for Installer {
    fn default() -> Self {
        PackageManager::default().into()
    }
}
