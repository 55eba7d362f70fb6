use std::fmt::Display;

use crate::error::{Result, ScaffoldError};

/// A project name made only of ASCII letters, digits, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validates `name` and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidProjectName`] if `name` is empty or
    /// contains anything but `[A-Za-z0-9_-]`.
    pub fn new(name: &str) -> Result<Self> {
        if Self::is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(ScaffoldError::InvalidProjectName(name.to_string()))
        }
    }

    #[must_use]
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for ProjectName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How permissive the generated `tsconfig.json` is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strictness {
    Relaxed,
    #[default]
    Moderate,
    Strict,
}

impl Strictness {
    pub const ALL: [Strictness; 3] = [Self::Relaxed, Self::Moderate, Self::Strict];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relaxed => "relaxed",
            Self::Moderate => "moderate",
            Self::Strict => "strict",
        }
    }

    #[must_use]
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Relaxed => "strict mode off, implicit any allowed",
            Self::Moderate => "`strict: true`",
            Self::Strict => "`strict: true` plus unchecked-index and unused-code checks",
        }
    }
}

impl Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Answers collected from the user. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChoices {
    project_name: ProjectName,
    strictness: Strictness,
    initialize_vcs: bool,
}

impl UserChoices {
    #[must_use]
    pub fn new(project_name: ProjectName, strictness: Strictness, initialize_vcs: bool) -> Self {
        Self {
            project_name,
            strictness,
            initialize_vcs,
        }
    }

    #[must_use]
    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }

    #[must_use]
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    #[must_use]
    pub fn initialize_vcs(&self) -> bool {
        self.initialize_vcs
    }
}
