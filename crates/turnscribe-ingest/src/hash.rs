//! File content hashing

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::IngestError;

/// Compute the SHA-256 hash of a file's content
///
/// Reads in 4096-byte chunks so large audio files are never held in
/// memory whole. The hash identifies re-uploads of the same recording
/// under a different path.
pub async fn file_sha256(path: &Path) -> Result<String, IngestError> {
    let path = path.to_owned();

    tokio::task::spawn_blocking(move || {
        let file = File::open(&path)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Sha256::new();
        let mut chunk = [0u8; 4096];

        loop {
            let read = reader.read(&mut chunk)?;
            if read == 0 {
                break;
            }
            hasher.update(&chunk[..read]);
        }

        Ok(hex::encode(hasher.finalize()))
    })
    .await
    .map_err(|e| IngestError::HashFailed(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_hash_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.wav");
        std::fs::write(&path, b"hello").unwrap();

        let hash = file_sha256(&path).await.unwrap();
        // SHA-256 of "hello"
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn test_identical_content_hashes_equal() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.wav");
        let b = dir.path().join("b.wav");
        std::fs::write(&a, b"same bytes").unwrap();
        std::fs::write(&b, b"same bytes").unwrap();

        assert_eq!(
            file_sha256(&a).await.unwrap(),
            file_sha256(&b).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_content_larger_than_one_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.wav");
        let mut file = File::create(&path).unwrap();
        for _ in 0..3 {
            file.write_all(&[0xAB; 4096]).unwrap();
        }
        file.write_all(&[0xCD; 100]).unwrap();
        drop(file);

        let hash = file_sha256(&path).await.unwrap();
        assert_eq!(hash.len(), 64);
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let result = file_sha256(Path::new("/nonexistent/audio.wav")).await;
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
