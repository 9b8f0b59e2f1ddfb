use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// String-keyed blob storage behind the stores. Keys carry a schema version
/// in their name; a schema change bumps the key and orphans the old blob.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
}

/// One JSON file per key under the data directory.
pub struct FileStorage {
    root: PathBuf,
}

fn data_base_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MEDICANTO_DATA_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(local) = std::env::var("LOCALAPPDATA") {
        return PathBuf::from(local).join("Medicanto");
    }
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("data")
}

impl FileStorage {
    pub fn new() -> Self {
        FileStorage {
            root: data_base_dir(),
        }
    }

    pub fn with_root(root: PathBuf) -> Self {
        FileStorage { root }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(s) => Some(s),
            Err(e) => {
                eprintln!("[storage] failed to read {}: {e}", path.display());
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        write_atomic(&self.path_for(key), value.as_bytes())
    }
}

/// In-memory storage for tests.
pub struct MemoryStorage {
    map: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage {
            map: RefCell::new(HashMap::new()),
        }
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    let tmp = tmp_path(path);

    if let Some(parent) = tmp.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    fs::write(&tmp, bytes).map_err(|e| e.to_string())?;

    if path.exists() {
        fs::remove_file(path).map_err(|e| e.to_string())?;
    }

    fs::rename(&tmp, path).map_err(|e| e.to_string())?;

    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.to_path_buf();
    let file_name = match path.file_name().and_then(|s| s.to_str()) {
        Some(n) => n.to_string(),
        None => "blob".to_string(),
    };
    p.set_file_name(format!("{file_name}.tmp"));
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("v"));
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("w"));
    }

    #[test]
    fn file_storage_round_trips_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_root(dir.path().join("nested"));

        assert_eq!(storage.get("medicanto_terms_v2"), None);

        storage.set("medicanto_terms_v2", "[]").unwrap();
        assert_eq!(storage.get("medicanto_terms_v2").as_deref(), Some("[]"));

        storage.set("medicanto_terms_v2", "[1]").unwrap();
        assert_eq!(storage.get("medicanto_terms_v2").as_deref(), Some("[1]"));

        // No stray tmp file left behind.
        assert!(!dir
            .path()
            .join("nested")
            .join("medicanto_terms_v2.json.tmp")
            .exists());
    }
}
