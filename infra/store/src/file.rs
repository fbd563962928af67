use crate::error::{StoreError, StoreErrorExt};
use crate::KeyValueStore;
use fxhash::FxHashMap;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};

const SNAPSHOT_FILE: &str = "settings.json";
const TMP_MARKER: &str = ".drilltmp.";

#[derive(Debug)]
struct FileStoreInner {
    snapshot: PathBuf,
    entries: RwLock<FxHashMap<String, String>>,
    // Held across stage, write and commit so concurrent writers never lose updates.
    write_lock: Mutex<()>,
    tmp_counter: AtomicU64,
}

/// A store persisted as one JSON object under its root directory.
///
/// The snapshot is read once at [`FileStoreBuilder::open`]; afterwards reads are served from
/// memory and every write rewrites the snapshot atomically. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct FileStore {
    inner: Arc<FileStoreInner>,
}

/// Builder for [`FileStore`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing unless you call .open()"]
pub struct FileStoreBuilder {
    root: Option<PathBuf>,
    create: bool,
}

impl FileStore {
    pub fn builder() -> FileStoreBuilder {
        FileStoreBuilder { root: None, create: true }
    }

    /// Location of the JSON snapshot.
    #[must_use]
    pub fn snapshot_path(&self) -> &Path {
        &self.inner.snapshot
    }

    /// Applies `change` to a copy of the entries, writes the copy, then swaps it in.
    ///
    /// `change` returns `false` when nothing changed; the snapshot is then left alone.
    fn update(
        &self,
        change: impl FnOnce(&mut FxHashMap<String, String>) -> bool,
    ) -> Result<(), StoreError> {
        let _guard = self.inner.write_lock.lock();

        let mut staged = self.inner.entries.read().clone();
        if !change(&mut staged) {
            return Ok(());
        }
        self.persist(&staged)?;
        *self.inner.entries.write() = staged;
        Ok(())
    }

    fn persist(&self, entries: &FxHashMap<String, String>) -> Result<(), StoreError> {
        let ordered: BTreeMap<&str, &str> =
            entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let bytes = serde_json::to_vec_pretty(&ordered).context("Encoding snapshot")?;

        let target = &self.inner.snapshot;
        let temp = unique_tmp_path(target, &self.inner.tmp_counter);

        {
            let mut file = fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&bytes).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = fs::rename(&temp, target) {
            let _ = fs::remove_file(&temp);
            return Err(StoreError::Io {
                source: err,
                context: Some(
                    format!("Atomic swap failed: {} -> {}", temp.display(), target.display())
                        .into(),
                ),
            });
        }

        debug!(path = %target.display(), "Settings snapshot saved");
        Ok(())
    }
}

impl FileStoreBuilder {
    /// Directory holding the snapshot.
    pub fn root(mut self, path: impl Into<PathBuf>) -> Self {
        self.root = Some(path.into());
        self
    }

    /// Whether a missing root directory is created (default `true`).
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }

    /// Opens the store, loading the existing snapshot if there is one.
    ///
    /// Leftover temp files from interrupted writes are removed first.
    ///
    /// # Errors
    /// * [`StoreError::Internal`] if no root was configured.
    /// * [`StoreError::Io`] if the root is missing (and `create(false)`) or unreadable.
    /// * [`StoreError::Serde`] if the snapshot exists but is not a JSON object of strings.
    pub fn open(self) -> Result<FileStore, StoreError> {
        let root = self.root.ok_or_else(|| StoreError::Internal {
            message: "Root directory is not set".into(),
            context: Some("FileStoreBuilder::open".into()),
        })?;

        if self.create {
            fs::create_dir_all(&root)
                .context(format!("Failed to create store root: {}", root.display()))?;
        }
        if !root.is_dir() {
            return Err(StoreError::Io {
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
                context: Some(format!("Store root is not a directory: {}", root.display()).into()),
            });
        }

        purge_tmp(&root);

        let snapshot = root.join(SNAPSHOT_FILE);
        let entries = match fs::read(&snapshot) {
            Ok(bytes) => serde_json::from_slice::<FxHashMap<String, String>>(&bytes)
                .context(format!("Corrupted snapshot: {}", snapshot.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FxHashMap::default(),
            Err(e) => {
                return Err(StoreError::Io {
                    source: e,
                    context: Some(format!("Reading {}", snapshot.display()).into()),
                });
            },
        };

        info!(path = %snapshot.display(), keys = entries.len(), "Settings store opened");

        Ok(FileStore {
            inner: Arc::new(FileStoreInner {
                snapshot,
                entries: RwLock::new(entries),
                write_lock: Mutex::new(()),
                tmp_counter: AtomicU64::new(0),
            }),
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| entries.remove(key).is_some())
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.entries.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let n = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|s| s.to_str()).unwrap_or(SNAPSHOT_FILE);
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{n}", std::process::id()))
}

fn purge_tmp(root: &Path) {
    let Ok(dir) = fs::read_dir(root) else { return };

    let mut removed = 0usize;
    for entry in dir.flatten() {
        let is_tmp = entry.file_name().to_str().is_some_and(|name| name.contains(TMP_MARKER));
        if !is_tmp {
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => warn!(path = %entry.path().display(), error = %e, "Stale temp file kept"),
        }
    }

    if removed > 0 {
        info!(removed, "Cleaned up temporary files");
    }
}
