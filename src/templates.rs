use std::path::{Path, PathBuf};

use crate::choices::Strictness;

/// Token replaced with the project name inside the manifest template.
pub const PLACEHOLDER: &str = "{{PROJECT_NAME}}";

/// Where templates live relative to the installed binary's directory.
pub const PACKAGED_DIR: &str = "../share/tscaffold/templates";

pub const ENTRY_FILE: &str = "src/index.ts";
pub const IGNORE_FILE: &str = ".gitignore";
pub const MANIFEST_FILE: &str = "package.json";
pub const CONFIG_FILE: &str = "tsconfig.json";

/// Read-only view over a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    root: PathBuf,
}

impl TemplateSet {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn entry(&self) -> PathBuf {
        self.root.join("src").join("index.ts")
    }

    /// Stored without the leading dot so that package registries keep it.
    #[must_use]
    pub fn ignore(&self) -> PathBuf {
        self.root.join("gitignore")
    }

    #[must_use]
    pub fn manifest(&self) -> PathBuf {
        self.root.join("package.json")
    }

    #[must_use]
    pub fn config(&self, strictness: Strictness) -> PathBuf {
        self.root
            .join("tsconfig")
            .join(format!("{}.json", strictness.as_str()))
    }

    #[must_use]
    pub fn all(&self) -> Vec<PathBuf> {
        let mut files = vec![self.entry(), self.ignore(), self.manifest()];
        files.extend(Strictness::ALL.into_iter().map(|s| self.config(s)));
        files
    }

    /// Template files that are not present on disk.
    #[must_use]
    pub fn missing(&self) -> Vec<PathBuf> {
        self.all().into_iter().filter(|p| !p.is_file()).collect()
    }
}

/// Returns the packaged template directory if it exists, else `development`.
///
/// Nothing is checked on the fallback path; a missing template shows up
/// later as a copy error.
#[must_use]
pub fn resolve_templates_dir(install_dir: &Path, development: &Path) -> PathBuf {
    let packaged = install_dir.join(PACKAGED_DIR);

    if packaged.exists() {
        packaged
    } else {
        development.to_path_buf()
    }
}

/// [`resolve_templates_dir`] for the running executable, falling back to the
/// `templates/` directory of this source tree.
#[must_use]
pub fn default_templates_dir() -> PathBuf {
    let development = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");

    match std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        Some(install_dir) => resolve_templates_dir(&install_dir, &development),
        None => development,
    }
}
