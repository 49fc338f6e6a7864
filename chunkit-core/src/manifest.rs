use serde::{Deserialize, Serialize};

/// Current on-disk manifest format version.
pub const MANIFEST_VERSION: u32 = 1;

/// Identity and shape of the original file, enough to rebuild it from its
/// chunks. The chunk size is not recorded; decode only walks
/// `1..=total_chunks`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileManifest {
    pub version: u32,
    pub total_chunks: u64,
    /// Input path exactly as given to `encode`.
    pub original_name: String,
    pub original_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<String>,
}

impl FileManifest {
    pub fn new(original_name: impl Into<String>, original_size: u64, total_chunks: u64) -> Self {
        Self {
            version: MANIFEST_VERSION,
            total_chunks,
            original_name: original_name.into(),
            original_size,
            created_utc: Some(chrono::Utc::now().to_rfc3339()),
        }
    }

    /// Check the fields against each other. Returns the reason on failure.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.version != MANIFEST_VERSION {
            return Err(format!("unsupported manifest version {}", self.version));
        }
        if self.original_name.is_empty() {
            return Err("original_name is empty".to_string());
        }
        if (self.total_chunks == 0) != (self.original_size == 0) {
            return Err(format!(
                "total_chunks={} does not fit original_size={}",
                self.total_chunks, self.original_size
            ));
        }
        if self.total_chunks > self.original_size {
            return Err(format!(
                "more chunks ({}) than bytes ({})",
                self.total_chunks, self.original_size
            ));
        }
        Ok(())
    }
}
