//! File-backed cache store.

use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;

use super::store::CacheStore;
use crate::Result;

/// One-file-per-key [`CacheStore`] under a root directory.
///
/// File names are the SHA-256 of the key, so arbitrary key strings never
/// leak into the filesystem. Each file holds a small JSON envelope with the
/// expiry timestamp and the base64-encoded payload. Writes stage through a
/// temp file and rename into place; expired files are deleted when read.
pub struct FileStore {
    root: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    expires_at_secs: Option<u64>,
    payload: String,
}

impl FileStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let name: String = hasher
            .finalize()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        self.root.join(name)
    }

    async fn read_envelope(&self, key: &str) -> Result<Option<Envelope>> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let envelope: Envelope = serde_json::from_slice(&bytes)?;
        if let Some(expires_at) = envelope.expires_at_secs {
            if unix_now() >= expires_at {
                let _ = fs::remove_file(&path).await;
                return Ok(None);
            }
        }
        Ok(Some(envelope))
    }

    async fn write_envelope(&self, key: &str, envelope: &Envelope) -> Result<()> {
        let path = self.path_for(key);
        let bytes = serde_json::to_vec(envelope)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    #[cfg(test)]
    fn file_path(&self, key: &str) -> PathBuf {
        self.path_for(key)
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.read_envelope(key).await?.is_some())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.read_envelope(key).await? {
            Some(envelope) => {
                let payload = BASE64
                    .decode(&envelope.payload)
                    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let envelope = Envelope {
            expires_at_secs: Some(unix_now().saturating_add(ttl.as_secs())),
            payload: BASE64.encode(&value),
        };
        self.write_envelope(key, &envelope).await
    }

    async fn forever(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let envelope = Envelope {
            expires_at_secs: None,
            payload: BASE64.encode(&value),
        };
        self.write_envelope(key, &envelope).await
    }

    async fn remember_forever(&self, key: &str, default: Vec<u8>) -> Result<Vec<u8>> {
        if let Some(existing) = self.get(key).await? {
            return Ok(existing);
        }
        self.forever(key, default.clone()).await?;
        Ok(default)
    }

    async fn forget(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").field("root", &self.root).finish()
    }
}
