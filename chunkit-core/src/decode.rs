use crate::chunk::ChunkSet;
use crate::error::{ChunkError, Result};
use crate::header;
use crate::manifest::FileManifest;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JoinReport {
    pub output_path: PathBuf,
    pub manifest: FileManifest,
    pub bytes_written: u64,
}

pub struct Decoder;

impl Decoder {
    /// Rebuild the original file from the chunk directory `source`.
    /// `output_dir` defaults to the current working directory.
    pub fn join(source: &Path, output_dir: Option<&Path>) -> Result<JoinReport> {
        let manifest = header::read(source)?;
        let base = match output_dir {
            Some(d) => d.to_path_buf(),
            None => std::env::current_dir()
                .map_err(|e| ChunkError::destination_unwritable(".", e))?,
        };
        let output_path = output_path(&base, &manifest.original_name);

        // Destination must exist before the first chunk is touched
        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChunkError::destination_unwritable(parent, e))?;
        }
        let out = File::create(&output_path)
            .map_err(|e| ChunkError::destination_unwritable(&output_path, e))?;
        let mut out = BufWriter::new(out);

        let chunks = ChunkSet::new(source, manifest.total_chunks);
        let mut bytes_written: u64 = 0;
        for (index, path) in chunks.iter() {
            let chunk = File::open(&path)
                .map_err(|source| ChunkError::ChunkMissing { index, path: path.clone(), source })?;
            let n = append_chunk(chunk, &mut out, index, &path, &output_path)?;
            tracing::debug!(index, len = n, "appended chunk");
            bytes_written += n;
        }
        out.flush().map_err(|e| ChunkError::destination_unwritable(&output_path, e))?;

        if bytes_written != manifest.original_size {
            tracing::warn!(
                expected = manifest.original_size,
                actual = bytes_written,
                "reassembled size differs from manifest"
            );
        }
        tracing::info!(
            source = %source.display(),
            output = %output_path.display(),
            chunks = manifest.total_chunks,
            bytes = bytes_written,
            "join complete"
        );
        Ok(JoinReport { output_path, manifest, bytes_written })
    }
}

/// `base + "/" + name`: root and prefix components of `name` are dropped so
/// an absolute original name still lands under `base`.
pub fn output_path(base: &Path, name: &str) -> PathBuf {
    let rel: PathBuf = Path::new(name)
        .components()
        .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
        .collect();
    base.join(rel)
}

// Copies one chunk, keeping read and write failures apart.
fn append_chunk<W: Write>(
    mut chunk: File,
    out: &mut W,
    index: u64,
    path: &Path,
    output_path: &Path,
) -> Result<u64> {
    let mut buf = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let n = match chunk.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ChunkError::ChunkMissing { index, path: path.to_path_buf(), source })
            }
        };
        out.write_all(&buf[..n])
            .map_err(|e| ChunkError::destination_unwritable(output_path, e))?;
        total += n as u64;
    }
}
