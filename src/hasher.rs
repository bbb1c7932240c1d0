//! Content hashing for duplicate detection

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Chunk size for streaming reads
pub const DEFAULT_CHUNK_SIZE: usize = 8192;

/// Computes a SHA-256 digest of a file's full content.
///
/// Reads in bounded chunks so memory use stays flat regardless of file
/// size.
#[derive(Debug, Clone)]
pub struct ContentHasher {
    chunk_size: usize,
}

impl ContentHasher {
    /// Create a hasher with the default chunk size
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Create a hasher with a custom chunk size
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self { chunk_size }
    }

    /// Hash the full content of the file at `path`.
    ///
    /// Returns the digest as lowercase hex, or the underlying I/O error if
    /// the file cannot be opened or a read fails mid-stream.
    pub fn hash(&self, path: &Path) -> io::Result<String> {
        let mut file = File::open(path)?;
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            let bytes_read = file.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_known_digest() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "abc.bin", b"abc");
        let hash = ContentHasher::new().hash(&path).unwrap();
        // SHA-256 of "abc"
        assert_eq!(
            hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_empty_file_digest() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.bin", b"");
        let hash = ContentHasher::new().hash(&path).unwrap();
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_identical_content_same_hash() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.mp4", b"same bytes");
        let b = write_file(&dir, "b.mp4", b"same bytes");
        let hasher = ContentHasher::new();
        assert_eq!(hasher.hash(&a).unwrap(), hasher.hash(&b).unwrap());
    }

    #[test]
    fn test_differing_content_different_hash() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.mp4", b"bytes one");
        let b = write_file(&dir, "b.mp4", b"bytes two");
        let hasher = ContentHasher::new();
        assert_ne!(hasher.hash(&a).unwrap(), hasher.hash(&b).unwrap());
    }

    #[test]
    fn test_chunked_read_matches_single_read() {
        let dir = TempDir::new().unwrap();
        let content: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let path = write_file(&dir, "large.bin", &content);

        let small_chunks = ContentHasher::with_chunk_size(7).hash(&path).unwrap();
        let one_chunk = ContentHasher::with_chunk_size(1 << 20).hash(&path).unwrap();
        assert_eq!(small_chunks, one_chunk);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = ContentHasher::new()
            .hash(&dir.path().join("nope.mp4"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
