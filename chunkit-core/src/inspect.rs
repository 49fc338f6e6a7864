use crate::chunk::{parse_chunk_name, ChunkSet};
use crate::error::Result;
use crate::header;
use crate::manifest::FileManifest;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct InspectReport {
    pub manifest: FileManifest,
    pub present: u64,
    pub missing: Vec<u64>,
    /// Sum of sizes of the chunks that are present.
    pub chunk_bytes: u64,
    /// Chunk files with an index beyond `total_chunks`, sorted.
    pub stray: Vec<u64>,
}

impl InspectReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Quick health check of a chunk directory: manifest plus chunk presence.
pub fn inspect(source: &Path) -> Result<InspectReport> {
    let manifest = header::read(source)?;
    let chunks = ChunkSet::new(source, manifest.total_chunks);

    let scan = chunks.scan();

    // Stray detection is best effort; an unlistable directory just reports none.
    let mut stray = Vec::new();
    if let Ok(entries) = std::fs::read_dir(source) {
        for ent in entries.filter_map(|e| e.ok()) {
            let name = ent.file_name();
            if let Some(i) = name.to_str().and_then(parse_chunk_name) {
                if i > manifest.total_chunks {
                    stray.push(i);
                }
            }
        }
    }
    stray.sort_unstable();

    tracing::debug!(
        present = scan.present,
        missing = scan.missing.len(),
        stray = stray.len(),
        "inspected"
    );
    Ok(InspectReport {
        manifest,
        present: scan.present,
        missing: scan.missing,
        chunk_bytes: scan.bytes,
        stray,
    })
}
