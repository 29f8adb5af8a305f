//! File I/O utilities with atomic writes
//!
//! Data files are replaced whole: written to a sibling temp file, synced,
//! then renamed over the original.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::SharedBudgetError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, SharedBudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        SharedBudgetError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        SharedBudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), SharedBudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            SharedBudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| SharedBudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| SharedBudgetError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| SharedBudgetError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| SharedBudgetError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        SharedBudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Ledger {
        owner: String,
        entries: Vec<f64>,
    }

    fn ledger() -> Ledger {
        Ledger {
            owner: "alice".to_string(),
            entries: vec![1600.0, 12.5],
        }
    }

    #[test]
    fn test_missing_file_reads_as_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded: Ledger = read_json(temp_dir.path().join("missing.json")).unwrap();
        assert_eq!(loaded, Ledger::default());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("ledger.json");

        write_json_atomic(&path, &ledger()).unwrap();

        let loaded: Ledger = read_json(&path).unwrap();
        assert_eq!(loaded, ledger());
        assert!(!temp_dir.path().join("nested").join("ledger.json.tmp").exists());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");
        fs::write(&path, "{ not json").unwrap();

        let result: Result<Ledger, _> = read_json(&path);
        assert!(matches!(result, Err(SharedBudgetError::Storage(_))));
    }
}
