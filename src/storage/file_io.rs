//! File I/O utilities with atomic writes
//!
//! A failed write leaves the previous file untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::trace;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinboardError, FinboardResult};

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> FinboardError {
    FinboardError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

fn parse_file<T: DeserializeOwned>(path: &Path) -> FinboardResult<T> {
    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    trace!("reading {}", path.display());
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_err("parse", path, e))
}

/// Read JSON from a file, or `T::default()` when the file is absent
pub fn read_json<T, P>(path: P) -> FinboardResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(T::default());
    }
    parse_file(path)
}

/// Read JSON from a file that must exist
pub fn read_json_required<T, P>(path: P) -> FinboardResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(FinboardError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }
    parse_file(path)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write pretty JSON to a sibling temp file, sync it, then rename over `path`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> FinboardResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // The rename is only atomic within one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_err("serialize", path, e))?;
    writer
        .flush()
        .map_err(|e| storage_err("flush", &temp_path, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_err("sync", &temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        storage_err("replace", path, e)
    })?;

    trace!("wrote {}", path.display());
    Ok(())
}

/// Whether `path` exists and holds well-formed JSON
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    parse_file::<serde_json::Value>(path.as_ref()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Prefs {
        theme: String,
        offset: i32,
    }

    fn prefs() -> Prefs {
        Prefs {
            theme: "dark".to_string(),
            offset: -180,
        }
    }

    #[test]
    fn test_read_missing_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Prefs = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, Prefs::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        write_json_atomic(&path, &prefs()).unwrap();
        let loaded: Prefs = read_json(&path).unwrap();
        assert_eq!(loaded, prefs());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        write_json_atomic(&path, &prefs()).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("prefs.json.tmp").exists());
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a").join("b").join("prefs.json");
        write_json_atomic(&path, &prefs()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_json_file_valid() {
        let temp_dir = TempDir::new().unwrap();
        let good = temp_dir.path().join("good.json");
        let bad = temp_dir.path().join("bad.json");

        fs::write(&good, "[]").unwrap();
        fs::write(&bad, "{ not json").unwrap();

        assert!(json_file_valid(&good));
        assert!(!json_file_valid(&bad));
        assert!(!json_file_valid(temp_dir.path().join("missing.json")));
    }

    #[test]
    fn test_read_json_required() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prefs.json");

        let err = read_json_required::<Prefs, _>(&path).unwrap_err();
        assert!(err.to_string().contains("File not found"));

        write_json_atomic(&path, &prefs()).unwrap();
        let loaded: Prefs = read_json_required(&path).unwrap();
        assert_eq!(loaded, prefs());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "nope").unwrap();

        let err = read_json::<Prefs, _>(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
