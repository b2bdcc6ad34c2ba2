// Persistent key-value store for cached API data.
// String keys map to JSON text, one file per key, with no expiry.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::Result;

use super::paths;

/// Storage key for the country list.
pub const COUNTRIES_KEY: &str = "countries";

/// File-backed key-value storage rooted at a cache directory.
///
/// Entries are written once and read back verbatim for the life of the
/// directory. Nothing here expires or revalidates an entry.
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    /// Open a store rooted at `root`. The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Read the raw value stored under `key`.
    pub fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(paths::entry_path(&self.root, key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store a raw value under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let stem = paths::entry_stem(key);

        // The key goes down first so `keys` never sees an entry without it
        if paths::is_hashed_stem(&stem) {
            write_atomic(&paths::key_path(&self.root, &stem), key)?;
        }
        write_atomic(&paths::entry_path_for_stem(&self.root, &stem), value)
    }

    /// All keys currently stored, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let dir = paths::storage_dir(&self.root);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let name = entry?.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            let key = if paths::is_hashed_stem(stem) {
                fs::read_to_string(paths::key_path(&self.root, stem)).ok()
            } else {
                paths::decode_key(stem)
            };
            if let Some(key) = key {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// Deserialize the JSON value stored under `key`.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key)? {
            Some(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            None => Ok(None),
        }
    }
}

/// Write `contents` to `path` via a temp file and rename.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut temp_path = path.as_os_str().to_owned();
    temp_path.push(".tmp");
    let temp_path = PathBuf::from(temp_path);

    let mut file = fs::File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_set_and_get_item() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store.set_item("countries", r#"[{"name":"USA"}]"#).unwrap();

        assert_eq!(
            store.get_item("countries").unwrap().as_deref(),
            Some(r#"[{"name":"USA"}]"#)
        );
    }

    #[test]
    fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path().join("not-yet-created"));

        assert!(store.get_item("countries").unwrap().is_none());
        let data: Option<Vec<TestData>> = store.get_json("countries").unwrap();
        assert!(data.is_none());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_json_read_and_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store
            .set_item("internships-eng--USA", r#"[{"name":"a","value":1}]"#)
            .unwrap();
        store
            .set_item("internships-eng--USA", r#"[{"value":2,"name":"b"}]"#)
            .unwrap();

        let read: Option<Vec<TestData>> = store.get_json("internships-eng--USA").unwrap();
        assert_eq!(
            read,
            Some(vec![TestData {
                name: "b".to_string(),
                value: 2,
            }])
        );
    }

    #[test]
    fn test_corrupt_entry_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store.set_item("countries", "{not json").unwrap();

        let read: Result<Option<Vec<TestData>>> = store.get_json("countries");
        assert!(read.is_err());
    }

    #[test]
    fn test_keys_are_decoded() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());

        store.set_item("internships-a/b--", "[]").unwrap();
        store.set_item("internships-a_b--", "[]").unwrap();
        store.set_item(COUNTRIES_KEY, "[]").unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["countries", "internships-a/b--", "internships-a_b--"]
        );
    }

    #[test]
    fn test_long_non_ascii_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = CacheStore::new(temp_dir.path());
        let key = format!("internships-{}--USA", "программист".repeat(4));
        let other = format!("internships-{}--Canada", "программист".repeat(4));

        store.set_item(&key, r#"[{"title":"A"}]"#).unwrap();
        store.set_item(&other, r#"[{"title":"B"}]"#).unwrap();

        assert_eq!(store.get_item(&key).unwrap().as_deref(), Some(r#"[{"title":"A"}]"#));
        assert_eq!(store.get_item(&other).unwrap().as_deref(), Some(r#"[{"title":"B"}]"#));

        let mut expected = vec![key, other];
        expected.sort();
        assert_eq!(store.keys().unwrap(), expected);
    }
}
