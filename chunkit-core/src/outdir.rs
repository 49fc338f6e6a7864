use crate::error::{ChunkError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// First unused name among `requested`, `requested_1`, `requested_2`, ...
pub fn next_free(requested: &Path) -> PathBuf {
    if !requested.exists() {
        return requested.to_path_buf();
    }
    let mut counter: u64 = 1;
    loop {
        let candidate = suffixed(requested, counter);
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Create a fresh output directory without touching an existing one.
/// Probes linearly for a free name, then issues a single `create_dir` for it;
/// a name taken in the meantime is an error, never reused.
pub fn allocate(requested: &Path) -> Result<PathBuf> {
    let dir = next_free(requested);
    if let Some(parent) = dir.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ChunkError::destination_unwritable(parent, e))?;
    }
    std::fs::create_dir(&dir).map_err(|e| ChunkError::destination_unwritable(&dir, e))?;
    if dir != requested {
        tracing::info!(
            requested = %requested.display(),
            actual = %dir.display(),
            "output directory exists, using suffixed name"
        );
    }
    Ok(dir)
}

fn suffixed(base: &Path, n: u64) -> PathBuf {
    let mut s = OsString::from(base.as_os_str());
    s.push(format!("_{n}"));
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_to_last_component() {
        assert_eq!(suffixed(Path::new("out/parts"), 2), PathBuf::from("out/parts_2"));
    }
}
