use crate::core::error::{RunnersError, RunnersResult};
use std::path::{Component, Path, PathBuf};

/// Get the Runners home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\runners
/// - Linux: ~/.config/runners
/// - macOS: ~/Library/Application Support/runners
pub fn runners_home() -> RunnersResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| RunnersError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("runners"))
}

/// Get the config file path (`<runners home>/config.yaml`)
pub fn config_file() -> RunnersResult<PathBuf> {
    Ok(runners_home()?.join("config.yaml"))
}

/// Path of the resources directory inside a cloned repository
pub fn resources_dir(clone_dir: &Path, resources_dir: &str) -> PathBuf {
    clone_dir.join(resources_dir)
}

/// Check that `relative` names something strictly below the directory it is
/// joined onto: no `..`, root or drive components, and not empty
pub fn validate_relative(relative: &str) -> RunnersResult<()> {
    let mut names_something = false;
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(_) => names_something = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(RunnersError::Path(format!(
                    "`{}` must be a relative path without `..`",
                    relative
                )));
            }
        }
    }
    if !names_something {
        return Err(RunnersError::Path(format!(
            "`{}` does not name a file or directory",
            relative
        )));
    }
    Ok(())
}

/// Path an artifact (file name or relative directory) occupies inside the clone
///
/// Both `resources_dir_rel` and `name` must pass [`validate_relative`], so the
/// result always stays inside `clone_dir`.
pub fn resource_target(
    clone_dir: &Path,
    resources_dir_rel: &str,
    name: &str,
) -> RunnersResult<PathBuf> {
    validate_relative(resources_dir_rel)?;
    validate_relative(name)?;
    Ok(resources_dir(clone_dir, resources_dir_rel).join(name))
}

/// Check that `path` lies strictly below `root` without climbing out via `..`
pub fn ensure_within(root: &Path, path: &Path) -> RunnersResult<()> {
    let relative = path.strip_prefix(root).map_err(|_| {
        RunnersError::Path(format!(
            "{} is outside {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut names_something = false;
    for component in relative.components() {
        match component {
            Component::Normal(_) => names_something = true,
            Component::CurDir => {}
            _ => {
                return Err(RunnersError::Path(format!(
                    "{} escapes {}",
                    path.display(),
                    root.display()
                )));
            }
        }
    }
    if !names_something {
        return Err(RunnersError::Path(format!(
            "{} is {} itself",
            path.display(),
            root.display()
        )));
    }
    Ok(())
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> RunnersResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
