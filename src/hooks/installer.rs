use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrefixerError, Result};
use crate::hooks::HookType;

/// Marker line identifying hook scripts written by commit-prefixer
pub const HOOK_MARKER: &str = "# installed by commit-prefixer";

/// Contents of the hook script for `hook_type`
///
/// The script hands git's arguments to the binary and always exits 0.
pub fn hook_script(hook_type: HookType) -> String {
    format!(
        "#!/bin/sh\n{}\ncommit-prefixer hook {} \"$@\" || true\nexit 0\n",
        HOOK_MARKER,
        hook_type.name()
    )
}

/// Whether the file at `path` was written by commit-prefixer
pub fn is_managed_hook(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|contents| contents.lines().any(|line| line.trim() == HOOK_MARKER))
        .unwrap_or(false)
}

/// Write the hook script for `hook_type` into `hooks_dir`
///
/// An existing hook that commit-prefixer did not write is left alone unless
/// `force` is set.
///
/// # Returns
/// * `Ok(PathBuf)` - Path of the installed hook
/// * `Err` - If a foreign hook is in the way or the file cannot be written
pub fn install_hook(hooks_dir: &Path, hook_type: HookType, force: bool) -> Result<PathBuf> {
    let path = hooks_dir.join(hook_type.name());

    if path.exists() && !force && !is_managed_hook(&path) {
        return Err(PrefixerError::hook(format!(
            "{} already exists and was not installed by commit-prefixer (use --force to replace it)",
            path.display()
        )));
    }

    fs::create_dir_all(hooks_dir)?;
    fs::write(&path, hook_script(hook_type))?;
    make_executable(&path)?;

    tracing::debug!("Installed {} hook at {}", hook_type, path.display());
    Ok(path)
}

/// Remove the hook for `hook_type` from `hooks_dir` if commit-prefixer wrote it
///
/// # Returns
/// * `Ok(true)` - The hook was removed
/// * `Ok(false)` - No managed hook was present
pub fn uninstall_hook(hooks_dir: &Path, hook_type: HookType) -> Result<bool> {
    let path = hooks_dir.join(hook_type.name());

    if !path.exists() {
        return Ok(false);
    }

    if !is_managed_hook(&path) {
        return Err(PrefixerError::hook(format!(
            "{} was not installed by commit-prefixer, leaving it in place",
            path.display()
        )));
    }

    fs::remove_file(&path)?;
    Ok(true)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
