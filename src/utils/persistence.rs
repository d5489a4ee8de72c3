//! Key-value save stores and the shallow snapshot merge.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Value;

use crate::error::GameError;

/// An opaque string store holding one entry per key.
pub trait SaveStore {
    fn read(&self, key: &str) -> io::Result<Option<String>>;

    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;

    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// In-memory store for tests and simulation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as `<key>.json` in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Uses the platform config directory resolved by `directories`.
    pub fn new() -> Result<Self, GameError> {
        let project_dirs =
            ProjectDirs::from("", "", "alexandria").ok_or(GameError::NoSaveDirectory)?;
        Ok(Self::at(project_dirs.config_dir())?)
    }

    /// Uses `dir`, creating it if needed.
    pub fn at(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SaveStore for FileStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::write(self.path_for(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Overlays the top-level keys of `saved` onto `defaults`.
///
/// Nested objects are replaced wholesale, not merged. Returns `None` if
/// either side is not a JSON object.
pub fn merge_shallow(defaults: Value, saved: Value) -> Option<Value> {
    let (Value::Object(mut base), Value::Object(overrides)) = (defaults, saved) else {
        return None;
    };
    for (key, value) in overrides {
        base.insert(key, value);
    }
    Some(Value::Object(base))
}
