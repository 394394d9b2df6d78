// File-backed store backend.
// One JSON file per key under a caller-supplied directory; writes go
// through a temp file and rename so readers never see a partial entry.

use std::fs;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

use super::{CacheEntry, Store};

pub struct DiskStore {
    dir: PathBuf,
}

impl DiskStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // Keys are URLs, not filesystem-safe; hash them into a filename.
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        self.dir.join(format!("{:016x}.json", hasher.finish()))
    }

    fn write_atomic(path: &Path, json: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

impl Store for DiskStore {
    fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let entry: CacheEntry = serde_json::from_str(&contents)?;
        Ok(Some(entry))
    }

    fn set(&self, key: &str, entry: CacheEntry) -> Result<()> {
        let json = serde_json::to_string_pretty(&entry)?;
        Self::write_atomic(&self.path_for(key), &json)
    }
}
