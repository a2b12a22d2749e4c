//! Disk-backed store: one JSON object file holding every key.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::{KeyValueStore, KvError, KvResult};

type Entries = BTreeMap<String, String>;

/// Key-value store persisted as a single JSON object on disk.
///
/// A missing file reads as an empty store. Every write is a read-modify-write
/// of the whole object done under an exclusive advisory lock on a sibling
/// `<file>.lock`, so several `FileStore` handles on one path (in one process or
/// several) never drop each other's keys. The new object goes to a uniquely
/// named temp file in the same directory and is renamed over the existing
/// one; a crash mid-write leaves the previous contents intact.
///
/// Readers take no lock and always see a complete file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Keeps this handle's writers off the blocking pool while another one holds the file lock.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) a store at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> KvResult<Entries> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_entries(&self.path, &content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Run `edit` against the current entries and write them back if it
    /// reports a change.
    async fn update<F>(&self, edit: F) -> KvResult<()>
    where
        F: FnOnce(&mut Entries) -> bool + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || update_locked(&path, edit))
            .await
            .map_err(|e| KvError::Store(format!("file store write task failed: {e}")))?
    }
}

fn parse_entries(path: &Path, content: &str) -> KvResult<Entries> {
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }

    serde_json::from_str(content).map_err(|e| KvError::Corrupt {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn read_entries(path: &Path) -> KvResult<Entries> {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_entries(path, &content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
        Err(e) => Err(e.into()),
    }
}

fn update_locked<F>(path: &Path, edit: F) -> KvResult<()>
where
    F: FnOnce(&mut Entries) -> bool,
{
    let dir = parent_dir(path);
    std::fs::create_dir_all(dir)?;

    let lock = open_lock_file(path)?;
    lock.lock_exclusive()?;
    let result = rewrite(path, dir, edit);
    // Closing the handle releases the lock too; unlocking first keeps it explicit.
    let _ = FileExt::unlock(&lock);
    result
}

fn rewrite<F>(path: &Path, dir: &Path, edit: F) -> KvResult<()>
where
    F: FnOnce(&mut Entries) -> bool,
{
    let mut entries = read_entries(path)?;
    if !edit(&mut entries) {
        return Ok(());
    }

    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, &entries)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| KvError::Io(e.error))?;

    tracing::debug!(path = %path.display(), keys = entries.len(), "store file written");
    Ok(())
}

fn open_lock_file(path: &Path) -> KvResult<File> {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".lock");
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path.with_file_name(name))?;
    Ok(file)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> KvResult<()> {
        let key = key.to_string();
        self.update(move |entries| {
            entries.insert(key, value);
            true
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> KvResult<()> {
        let key = key.to_string();
        self.update(move |entries| entries.remove(&key).is_some()).await
    }

    async fn keys(&self) -> KvResult<Vec<String>> {
        Ok(self.load().await?.into_keys().collect())
    }
}
