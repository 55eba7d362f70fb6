use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use fs_extra::file::CopyOptions;

use crate::{
    choices::{ProjectName, Strictness},
    error::{Result, ScaffoldError},
    templates::{TemplateSet, CONFIG_FILE, ENTRY_FILE, IGNORE_FILE, MANIFEST_FILE, PLACEHOLDER},
    trace,
};

/// Fails if anything, including a dangling symlink, occupies `path`.
///
/// # Errors
///
/// Returns [`ScaffoldError::TargetExists`] when the path is taken.
pub fn ensure_target_absent(path: &Path) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        Err(ScaffoldError::TargetExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

/// Creates the project root. Unlike `create_dir_all`, this fails if the
/// directory appeared after [`ensure_target_absent`] ran.
///
/// # Errors
///
/// [`ScaffoldError::TargetExists`] if the path is taken, or
/// [`ScaffoldError::Template`] for any other IO error.
pub fn create_target(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(ScaffoldError::TargetExists(path.to_path_buf()))
        }
        Err(e) => Err(ScaffoldError::template("create", path)(e)),
    }
}

/// Writes the project files into `target` and returns their paths.
///
/// The entry, ignore and configuration templates are copied verbatim; the
/// manifest has every [`PLACEHOLDER`] replaced with `name`. Nothing under
/// `templates` is modified and no existing file in `target` is overwritten.
/// Files written before a failure are left in place.
///
/// # Errors
///
/// Returns [`ScaffoldError::Template`] naming the first path that could not
/// be read, copied or written.
pub fn copy_templates(
    templates: &TemplateSet,
    target: &Path,
    name: &ProjectName,
    strictness: Strictness,
) -> Result<Vec<PathBuf>> {
    let src = target.join(ENTRY_FILE);
    if let Some(parent) = src.parent() {
        fs::create_dir_all(parent).map_err(ScaffoldError::template("create", parent))?;
    }

    let mut written = Vec::with_capacity(4);

    for (from, to) in [
        (templates.entry(), src),
        (templates.ignore(), target.join(IGNORE_FILE)),
        (templates.config(strictness), target.join(CONFIG_FILE)),
    ] {
        copy_verbatim(&from, &to)?;
        written.push(to);
    }

    let manifest = target.join(MANIFEST_FILE);
    render_manifest(&templates.manifest(), &manifest, name)?;
    written.push(manifest);

    trace!("Wrote {} files into {}", written.len(), target.display());

    Ok(written)
}

fn copy_verbatim(from: &Path, to: &Path) -> Result<()> {
    trace!("Copying {} to {}", from.display(), to.display());

    let options = CopyOptions {
        overwrite: false,
        skip_exist: false,
        ..CopyOptions::new()
    };

    fs_extra::file::copy(from, to, &options)
        .map(|_| ())
        .map_err(|e| ScaffoldError::template("copy", from)(io::Error::other(e)))
}

fn render_manifest(template: &Path, to: &Path, name: &ProjectName) -> Result<()> {
    let contents =
        fs::read_to_string(template).map_err(ScaffoldError::template("read", template))?;

    let rendered = contents.replace(PLACEHOLDER, name.as_str());

    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .and_then(|mut file| file.write_all(rendered.as_bytes()))
        .map_err(ScaffoldError::template("write", to))
}
