use std::path::PathBuf;

const CHUNK_PREFIX: &str = "part_";
const CHUNK_EXT: &str = ".chunk";

/// Standard chunk filename for a 1-based sequence index.
pub fn chunk_name(index: u64) -> String {
    format!("{CHUNK_PREFIX}{index}{CHUNK_EXT}")
}

/// Inverse of [`chunk_name`]. Rejects index 0 and anything with leading zeros,
/// so each index has exactly one spelling.
pub fn parse_chunk_name(name: &str) -> Option<u64> {
    let digits = name.strip_prefix(CHUNK_PREFIX)?.strip_suffix(CHUNK_EXT)?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

/// The ordered chunk artifacts `1..=total` of one split, addressed by index
/// rather than by directory listing.
#[derive(Clone, Debug)]
pub struct ChunkSet {
    dir: PathBuf,
    total: u64,
}

impl ChunkSet {
    pub fn new(dir: impl Into<PathBuf>, total: u64) -> Self {
        Self { dir: dir.into(), total }
    }

    pub fn path(&self, index: u64) -> PathBuf {
        self.dir.join(chunk_name(index))
    }

    /// `(index, path)` pairs in reassembly order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, PathBuf)> + '_ {
        (1..=self.total).map(move |i| (i, self.path(i)))
    }

    /// One pass over `1..=total`: which artifacts are regular files, which
    /// are not, and how many bytes the present ones hold.
    pub fn scan(&self) -> ChunkScan {
        let mut scan = ChunkScan::default();
        for (index, path) in self.iter() {
            match std::fs::metadata(&path) {
                Ok(m) if m.is_file() => {
                    scan.present += 1;
                    scan.bytes += m.len();
                }
                _ => scan.missing.push(index),
            }
        }
        scan
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkScan {
    pub present: u64,
    /// Ascending.
    pub missing: Vec<u64>,
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for i in [1u64, 2, 9, 10, 12345] {
            assert_eq!(parse_chunk_name(&chunk_name(i)), Some(i));
        }
        assert_eq!(chunk_name(3), "part_3.chunk");
    }

    #[test]
    fn foreign_names_are_ignored() {
        for n in [
            "part_0.chunk",
            "part_01.chunk",
            "part_.chunk",
            "part_x.chunk",
            "manifest.json",
            "part_3.chunk.tmp",
        ] {
            assert_eq!(parse_chunk_name(n), None, "{n}");
        }
    }

    #[test]
    fn order_comes_from_index_not_listing() {
        let set = ChunkSet::new("/d", 11);
        let names: Vec<_> = set.iter().map(|(_, p)| p.file_name().unwrap().to_owned()).collect();
        assert_eq!(names[1], "part_2.chunk");
        assert_eq!(names[9], "part_10.chunk");
        assert_eq!(names.len(), 11);
    }

    #[test]
    fn scan_counts_present_bytes_and_gaps() {
        let td = tempfile::tempdir().unwrap();
        let set = ChunkSet::new(td.path(), 4);
        std::fs::write(set.path(1), b"abcd").unwrap();
        std::fs::write(set.path(3), b"ef").unwrap();
        // a directory in a chunk slot does not count
        std::fs::create_dir(set.path(4)).unwrap();

        let scan = set.scan();
        assert_eq!(scan.present, 2);
        assert_eq!(scan.bytes, 6);
        assert_eq!(scan.missing, vec![2, 4]);
    }

    #[test]
    fn empty_set_has_no_members() {
        assert_eq!(ChunkSet::new("/d", 0).iter().count(), 0);
    }
}
