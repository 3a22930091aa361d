// metamerge - platform/exiftool.rs
//
// Startup probe for the external ExifTool binary. The merge engine shells
// out to `exiftool`; when it is not on PATH the UI shows a blocking
// warning instead of the main view.

use crate::util::constants::EXIFTOOL_BINARY;
use std::path::{Path, PathBuf};

/// Search PATH for the exiftool executable.
///
/// Returns the first match, honouring PATHEXT-style `.exe` resolution on
/// Windows. `None` means the merge engine cannot run.
pub fn find_exiftool() -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        if let Some(hit) = executable_in(&dir) {
            tracing::debug!(path = %hit.display(), "ExifTool located");
            return Some(hit);
        }
    }
    None
}

/// Whether the exiftool executable is available on PATH.
pub fn exiftool_available() -> bool {
    find_exiftool().is_some()
}

fn executable_in(dir: &Path) -> Option<PathBuf> {
    let plain = dir.join(EXIFTOOL_BINARY);
    if plain.is_file() {
        return Some(plain);
    }
    if cfg!(windows) {
        let exe = dir.join(format!("{EXIFTOOL_BINARY}.exe"));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}

// =============================================================================
// Unit tests
// =============================================================================
