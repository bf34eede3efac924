//! # Image Store
//!
//! Stand-in for the hosted binary-upload collaborator:
//! `upload(bucket, path, bytes) → public URL`.
//!
//! Product creation treats upload failure as a degradation, never a hard
//! error: the product is saved without an image and a warning is logged.
//! That decision lives in the inventory service; this module just stores
//! bytes and reports errors honestly.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::debug;

/// Stores uploaded binaries under a local root directory, one subdirectory
/// per bucket, and returns a `file://` URL to the stored object.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalImageStore { root: root.into() }
    }

    /// Writes `bytes` to `<root>/<bucket>/<file_name>` and returns the URL.
    pub fn upload(&self, bucket: &str, file_name: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.root.join(bucket);
        fs::create_dir_all(&dir)?;

        let path = dir.join(file_name);
        fs::write(&path, bytes)?;

        debug!(path = %path.display(), size = bytes.len(), "Stored uploaded binary");

        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalImageStore::new(dir.path());

        let url = store
            .upload("product-images", "midnight-rose.jpg", b"jpeg bytes")
            .unwrap();

        assert!(url.starts_with("file://"));
        assert!(url.ends_with("midnight-rose.jpg"));

        let stored = dir.path().join("product-images").join("midnight-rose.jpg");
        assert_eq!(fs::read(stored).unwrap(), b"jpeg bytes");
    }

    #[test]
    fn test_upload_to_unwritable_root_fails() {
        let store = LocalImageStore::new("/dev/null/not-a-dir");
        assert!(store.upload("bucket", "a.jpg", b"x").is_err());
    }
}
