use std::path::PathBuf;

use crate::{
    error::{Result, ScaffoldError},
    install::PackageManager,
    templates::default_templates_dir,
};

pub const TEMPLATES_VAR: &str = "TSCAFFOLD_TEMPLATES";
pub const PACKAGE_MANAGER_VAR: &str = "TSCAFFOLD_PACKAGE_MANAGER";
pub const TRACE_VAR: &str = "TSCAFFOLD_TRACE";

/// Settings taken from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    /// Explicit template directory. Skips location detection when set.
    pub templates_dir: Option<PathBuf>,
    pub package_manager: PackageManager,
}

impl Settings {
    /// Reads [`TEMPLATES_VAR`] and [`PACKAGE_MANAGER_VAR`].
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidSetting`] for an unknown package
    /// manager.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`Settings::from_env`] but reading variables through `lookup`.
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidSetting`] for an unknown package
    /// manager.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let package_manager = match get(PACKAGE_MANAGER_VAR) {
            Some(value) => value
                .parse::<PackageManager>()
                .map_err(|_| ScaffoldError::InvalidSetting {
                    name: PACKAGE_MANAGER_VAR,
                    value,
                })?,
            None => PackageManager::default(),
        };

        Ok(Self {
            templates_dir: get(TEMPLATES_VAR).map(PathBuf::from),
            package_manager,
        })
    }

    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(default_templates_dir)
    }
}
