pub mod chunk;
pub mod decode;
pub mod encode;
pub mod error;
pub mod header;
pub mod inspect;
pub mod manifest;
pub mod outdir;

pub use error::{ChunkError, Result};
