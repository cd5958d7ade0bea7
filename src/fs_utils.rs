//! Cross-platform filesystem utilities
//!
//! - `normalize_path`: Strips Windows `\\?\` prefix from canonicalized paths
//! - `to_slash`: Renders a path with `/` separators for patterns and output
//! - `atomic_rename`: Handles atomic file replacement (Windows requires explicit delete)
//! - `write_atomic`: Writes generated documentation next to its target, then renames

use std::io;
use std::path::{Path, PathBuf};

/// Normalize Windows paths by removing the `\\?\` prefix if present.
///
/// On Unix, path is returned unchanged.
///
/// ```
/// use std::path::PathBuf;
/// use pony_docgen::fs_utils::normalize_path;
///
/// let path = PathBuf::from("/home/user/repo");
/// assert_eq!(normalize_path(&path), path);
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    #[cfg(windows)]
    {
        let s = path.to_string_lossy();
        // Handle UNC paths: \\?\UNC\server\share -> \\server\share
        if let Some(stripped) = s.strip_prefix(r"\\?\UNC\") {
            return PathBuf::from(format!(r"\\{}", stripped));
        }
        // Handle local paths: \\?\C:\path -> C:\path
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return PathBuf::from(stripped);
        }
    }
    path.to_path_buf()
}

/// Render a path as a string with forward slashes.
///
/// Include/exclude patterns and route paths are always written with `/`,
/// whatever the host separator is.
///
/// ```
/// use std::path::Path;
/// use pony_docgen::fs_utils::to_slash;
///
/// assert_eq!(to_slash(Path::new("app/api/users/route.ts")), "app/api/users/route.ts");
/// ```
pub fn to_slash(path: &Path) -> String {
    normalize_path(path).to_string_lossy().replace('\\', "/")
}

/// Cross-platform atomic rename that handles Windows file replacement.
///
/// On Unix, `fs::rename` atomically replaces the target if it exists.
/// On Windows, `fs::rename` fails if the target exists, so the target is
/// deleted first.
pub fn atomic_rename(src: &Path, dst: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        if dst.exists() {
            std::fs::remove_file(dst)?;
        }
    }
    std::fs::rename(src, dst)
}

/// Write `contents` to `dst` through a sibling temp file and an atomic rename,
/// so a failed build never leaves a half-written document behind.
pub fn write_atomic(dst: &Path, contents: &str) -> io::Result<()> {
    let file_name = dst
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let tmp = dst.with_file_name(format!(".{}.pony-docgen.tmp", file_name));

    std::fs::write(&tmp, contents)?;
    if let Err(e) = atomic_rename(&tmp, dst) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e);
    }
    Ok(())
}
