//! Output file writing.

use anyhow::{Context, Result};
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

/// Writes `contents` to `path` atomically.
///
/// The text goes to a temporary file in the target directory first and is
/// renamed over `path`, so readers never see a partially written module.
///
/// # Errors
/// Fails if the temporary file cannot be created, written or renamed.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temporary file in {}", dir.display()))?;
    file.write_all(contents.as_bytes())
        .context("failed to write generated module")?;
    file.as_file()
        .set_permissions(output_permissions(path, file.as_file())?)
        .context("failed to set permissions on generated module")?;
    file.persist(path)
        .with_context(|| format!("failed to move generated module to {}", path.display()))?;
    Ok(())
}

/// Permissions for the output: those of the file being replaced, or
/// `0644` for a new file.
fn output_permissions(path: &Path, temp: &std::fs::File) -> Result<Permissions> {
    if let Ok(existing) = std::fs::metadata(path) {
        return Ok(existing.permissions());
    }
    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut perms = temp
        .metadata()
        .context("failed to read temporary file metadata")?
        .permissions();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        perms.set_mode(0o644);
    }
    Ok(perms)
}

/// Import path hint for the generated module, e.g. `./out/helix-client`.
pub fn import_hint(path: &Path) -> String {
    let module = path.with_extension("");
    let hint = module.to_string_lossy().replace('\\', "/");
    if module.is_absolute() || hint.starts_with("./") || hint.starts_with("../") {
        hint
    } else {
        format!("./{hint}")
    }
}
