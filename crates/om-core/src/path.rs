// crates/om-core/src/path.rs - Path expansion and write-time validation

use std::env;
use std::path::{Component, Path, PathBuf};

use directories::BaseDirs;

use crate::error::{RegistryError, RegistryResult};

/// Expand user input into an absolute, normalized path.
///
/// A leading `~` is replaced with the user's home directory, but only when
/// it is the entire input or immediately followed by a path separator
/// (`~foo` stays literal). Relative paths are resolved against the current
/// working directory. `.` and `..` segments are removed lexically - no
/// symlinks are followed, and the result is not required to exist.
pub fn expand(raw: &str) -> PathBuf {
    let input = expand_tilde(raw);

    let absolute = if input.is_absolute() {
        input
    } else {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        cwd.join(input)
    };

    normalize_lexically(&absolute)
}

/// Fail with `InvalidPath` unless `path` is an existing directory.
///
/// Advisory at write time only: the registries never re-validate stored
/// paths. A path that goes stale later is a launch-time error
/// (`PathMissing`), not a store error.
pub fn assert_directory(path: &Path) -> RegistryResult<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(RegistryError::InvalidPath(path.display().to_string()))
    }
}

fn expand_tilde(raw: &str) -> PathBuf {
    if raw == "~" {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().to_path_buf();
        }
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(raw)
}

/// Remove `.` and `..` components without touching the filesystem.
/// `..` at the root is dropped rather than underflowing.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    out.pop();
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
