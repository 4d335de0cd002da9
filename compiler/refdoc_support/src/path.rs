//! File system path helpers.

use std::fs;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use crate::{format_error, Error};

/// Return true if `path` ends in a separator.
pub fn is_dirsy(path: &str) -> bool {
    path.ends_with(['/', MAIN_SEPARATOR])
}

/// Lexically remove `.` components and fold `..` into the preceding
/// component where one exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    result.components().next_back(),
                    Some(Component::Normal(_))
                ) && result.pop();
                if !popped && !result.has_root() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Return the path of a file named `name.ext` inside `dir`.
pub fn append_file_name(dir: &Path, name: &str, ext: &str) -> PathBuf {
    dir.join(format!("{name}.{ext}"))
}

/// Return an error unless `path` names an existing directory.
pub fn require_directory(path: &Path) -> Result<(), Error> {
    let metadata = fs::metadata(path).map_err(|e| {
        Error::from_io(&e).context(format_args!("stat \"{}\"", path.display()))
    })?;
    if !metadata.is_dir() {
        return Err(format_error!("\"{}\" is not a directory", path.display()));
    }
    Ok(())
}

/// Create `path` and all of its missing parents.
pub fn create_directory(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(|e| {
        Error::from_io(&e).context(format_args!("create directory \"{}\"", path.display()))
    })
}
