// File: ./src/storage.rs
// Host-provided key-value persistence and the lenient task-file loader.
//
// The engine itself never touches storage. Hosts pass a `KeyValueStore` to the
// inbox and the reminder service, which serialize their state as JSON strings.
use crate::model::Task;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait KeyValueStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;

    /// Read-modify-write of one key under a single lock. `f` receives the
    /// current value and returns the replacement, or `None` to leave it as is.
    /// An error from `f` aborts without writing.
    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()>;
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = file_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on a sidecar `.lock` file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create directory: {:?}", self.dir))?;
        }
        Ok(())
    }

    /// Reads without locking. Callers hold `with_lock`.
    fn read_unlocked(path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?;
        Ok(Some(content))
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(&path, || Self::read_unlocked(&path))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        Self::with_lock(&path, || Self::atomic_write(&path, value))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        Self::with_lock(&path, || {
            fs::remove_file(&path)?;
            Ok(())
        })
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()> {
        self.ensure_dir()?;
        let path = self.path_for(key);
        Self::with_lock(&path, || {
            let current = Self::read_unlocked(&path)?;
            if let Some(next) = f(current)? {
                Self::atomic_write(&path, next)?;
            }
            Ok(())
        })
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let map = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        map.remove(key);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        f: &mut dyn FnMut(Option<String>) -> Result<Option<String>>,
    ) -> Result<()> {
        let mut map = self
            .entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        let current = map.get(key).cloned();
        if let Some(next) = f(current)? {
            map.insert(key.to_string(), next);
        }
        Ok(())
    }
}

/// Parses a JSON array of tasks, skipping entries that do not deserialize.
pub fn parse_tasks(json: &str) -> Result<Vec<Task>> {
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(json).context("Task file is not a JSON array")?;

    let mut tasks = Vec::with_capacity(raw.len());
    for (idx, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<Task>(value) {
            Ok(task) => tasks.push(task),
            Err(e) => log::warn!("Skipping malformed task entry #{}: {}", idx, e),
        }
    }
    Ok(tasks)
}

/// Loads the host's task list. A missing file is an empty list.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        return Ok(vec![]);
    }
    let json = FileStore::with_lock(path, || {
        fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
    })?;
    parse_tasks(&json)
}
