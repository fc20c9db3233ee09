//! Local disk-space availability check.

use std::path::{Path, PathBuf};

/// Contract for the asynchronous space-availability collaborator.
///
/// Implementations decide whether there is room to stage a copy of `paths`
/// for upload. When `is_move` is true no copy is kept, so no staging space
/// is needed. A check that fails to run must report `false` so the flow
/// degrades into the move-fallback confirmation rather than passing silently.
pub trait SpaceCheck: Send + Sync {
    fn has_enough_space(&self, paths: &[PathBuf], is_move: bool) -> bool;
}

/// Space check against the real filesystem: sums the sizes of the selected
/// files and compares against the free space on their volume.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskSpaceCheck;

impl SpaceCheck for DiskSpaceCheck {
    fn has_enough_space(&self, paths: &[PathBuf], is_move: bool) -> bool {
        if is_move || paths.is_empty() {
            // Moving keeps no second copy around.
            return true;
        }

        let mut required: u64 = 0;
        for path in paths {
            match std::fs::metadata(path) {
                Ok(meta) => required = required.saturating_add(meta.len()),
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "space check failed to stat");
                    return false;
                }
            }
        }

        let probe_dir = paths[0].parent().unwrap_or_else(|| Path::new("/"));
        match available_space(probe_dir) {
            Some(free) => free > required,
            None => {
                tracing::debug!(dir = %probe_dir.display(), "free-space probe unavailable");
                false
            }
        }
    }
}

/// Free space in bytes on the volume holding `path`.
#[cfg(unix)]
pub fn available_space(path: &Path) -> Option<u64> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let path_cstr = CString::new(path.as_os_str().as_bytes()).ok()?;

    unsafe {
        let mut stat: libc::statvfs = std::mem::zeroed();
        if libc::statvfs(path_cstr.as_ptr(), &mut stat) == 0 {
            Some(stat.f_bavail as u64 * stat.f_frsize as u64)
        } else {
            None
        }
    }
}

#[cfg(not(unix))]
pub fn available_space(_path: &Path) -> Option<u64> {
    None
}
