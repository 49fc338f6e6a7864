use crate::chunk::chunk_name;
use crate::error::{ChunkError, Result};
use crate::header;
use crate::manifest::FileManifest;
use crate::outdir;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub struct EncoderConfig {
    /// Maximum bytes per chunk; must be positive.
    pub chunk_size: usize,
}

impl EncoderConfig {
    pub fn new(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(ChunkError::InvalidArguments("chunk size must be positive".into()));
        }
        Ok(())
    }
}

/// Result of a full encode: the directory actually used and its manifest.
#[derive(Clone, Debug)]
pub struct Encoded {
    pub dir: PathBuf,
    pub manifest: FileManifest,
}

pub struct Encoder;

impl Encoder {
    /// Allocate a fresh directory at (or next to) `requested_dir` and split
    /// `input` into it. Nothing is created when the input cannot be opened.
    pub fn encode(input: &Path, requested_dir: &Path, cfg: &EncoderConfig) -> Result<Encoded> {
        cfg.validate()?;
        source_name(input)?;
        open_source(input)?;
        let dir = outdir::allocate(requested_dir)?;
        let manifest = Self::split(input, &dir, cfg)?;
        Ok(Encoded { dir, manifest })
    }

    /// Write `input` as `part_1.chunk`..`part_N.chunk` plus `manifest.json`
    /// into the existing directory `output`.
    pub fn split(input: &Path, output: &Path, cfg: &EncoderConfig) -> Result<FileManifest> {
        cfg.validate()?;
        let original_name = source_name(input)?;
        let mut src = open_source(input)?;
        let src_len = src.metadata().map(|m| m.len()).unwrap_or(0);

        // 1) Chunks, one reused buffer
        let cap = usize::try_from(src_len).unwrap_or(usize::MAX).min(cfg.chunk_size);
        let mut buf: Vec<u8> = Vec::with_capacity(cap);
        let mut written: u64 = 0;
        let mut total_bytes: u64 = 0;
        loop {
            buf.clear();
            let n = Read::by_ref(&mut src)
                .take(cfg.chunk_size as u64)
                .read_to_end(&mut buf)
                .map_err(|e| ChunkError::source_unreadable(input, e))?;
            if n == 0 {
                break;
            }
            let index = written + 1;
            let path = output.join(chunk_name(index));
            let mut out =
                File::create(&path).map_err(|e| ChunkError::destination_unwritable(&path, e))?;
            out.write_all(&buf).map_err(|e| ChunkError::destination_unwritable(&path, e))?;
            tracing::debug!(index, len = n, "wrote chunk");
            written = index;
            total_bytes += n as u64;
        }

        // 2) Manifest, only once every chunk is on disk
        let manifest = FileManifest::new(original_name, total_bytes, written);
        header::write(&manifest, output)?;
        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            chunks = written,
            bytes = total_bytes,
            "split complete"
        );
        Ok(manifest)
    }
}

// The name must survive the JSON manifest unchanged.
fn source_name(input: &Path) -> Result<String> {
    input.to_str().map(str::to_string).ok_or_else(|| {
        ChunkError::InvalidArguments(format!("input path is not valid UTF-8: {input:?}"))
    })
}

fn open_source(input: &Path) -> Result<File> {
    let f = File::open(input).map_err(|e| ChunkError::source_unreadable(input, e))?;
    let meta = f.metadata().map_err(|e| ChunkError::source_unreadable(input, e))?;
    if meta.is_dir() {
        return Err(ChunkError::source_unreadable(
            input,
            std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
        ));
    }
    Ok(f)
}
