use crate::error::{ChunkError, Result};
use crate::manifest::FileManifest;
use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// Manifest filename inside a chunk directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Upper bound on what `read` will load; a real manifest is a few hundred bytes.
const MAX_MANIFEST_BYTES: u64 = 1024 * 1024;

pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_FILE)
}

/// Persist `manifest` as pretty JSON into `dir`.
pub fn write(manifest: &FileManifest, dir: &Path) -> Result<()> {
    let path = manifest_path(dir);
    let f = File::create(&path).map_err(|e| ChunkError::destination_unwritable(&path, e))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, manifest)
        .map_err(io::Error::from)
        .and_then(|_| w.write_all(b"\n"))
        .and_then(|_| w.flush())
        .map_err(|e| ChunkError::destination_unwritable(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote manifest");
    Ok(())
}

/// Load and validate the manifest stored in `dir`.
pub fn read(dir: &Path) -> Result<FileManifest> {
    let path = manifest_path(dir);
    let f = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound || !dir.is_dir() => {
            return Err(ChunkError::ManifestNotFound(path));
        }
        Err(e) => return Err(ChunkError::malformed(&path, format!("unreadable: {e}"))),
    };
    let mut raw = Vec::new();
    f.take(MAX_MANIFEST_BYTES + 1)
        .read_to_end(&mut raw)
        .map_err(|e| ChunkError::malformed(&path, format!("unreadable: {e}")))?;
    if raw.len() as u64 > MAX_MANIFEST_BYTES {
        return Err(ChunkError::malformed(&path, "manifest too large"));
    }
    decode(&raw).map_err(|reason| ChunkError::malformed(&path, reason))
}

/// Parse manifest bytes; the error is a human-readable reason.
pub fn decode(raw: &[u8]) -> std::result::Result<FileManifest, String> {
    let manifest: FileManifest = serde_json::from_slice(raw).map_err(|e| e.to_string())?;
    manifest.check_consistency()?;
    Ok(manifest)
}
