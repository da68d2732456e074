//! # File I/O Module
//!
//! Study file operations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## File Format
//!
//! Studies are saved as `.tew.json` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tew_core::file_io::{load_study, save_study};
//! use tew_core::study::Study;
//! use std::path::Path;
//!
//! let study = Study::new("Analyst", "Pevzner, Abramovich, Weller (2008)");
//! save_study(&study, Path::new("panels.tew.json"))?;
//!
//! let loaded = load_study(Path::new("panels.tew.json"))?;
//! assert_eq!(loaded.meta.analyst, "Analyst");
//! # Ok::<(), tew_core::errors::TewError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::errors::{TewError, TewResult};
use crate::study::{Study, SCHEMA_VERSION};

/// Save a study to a file using an atomic write.
///
/// The JSON is written to a temporary sibling file, synced to disk and then
/// renamed over the target.
pub fn save_study(study: &Study, path: &Path) -> TewResult<()> {
    let json = serde_json::to_string_pretty(study).map_err(|e| TewError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| TewError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| TewError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| TewError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        TewError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    log::debug!("saved study with {} cases to {}", study.case_count(), path.display());
    Ok(())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded study
/// * `Err(TewError::VersionMismatch)` - File version is incompatible
/// * `Err(TewError::SerializationError)` - Invalid JSON or invalid laminate in the file
/// * `Err(TewError::FileError)` - I/O error
pub fn load_study(path: &Path) -> TewResult<Study> {
    let mut file =
        File::open(path).map_err(|e| TewError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TewError::file_error("read", path.display().to_string(), e.to_string()))?;

    let study: Study = serde_json::from_str(&contents).map_err(|e| TewError::SerializationError {
        reason: format!("Invalid study in {}: {}", path.display(), e),
    })?;

    validate_version(&study.meta.version)?;

    Ok(study)
}

/// Temporary sibling used during an atomic save
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> TewResult<()> {
    let mismatch = || TewError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version.split('.').filter_map(|p| p.parse().ok()).collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION.split('.').filter_map(|p| p.parse().ok()).collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // For 0.x versions a newer minor may contain breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::fixtures::case_one;
    use crate::study::StudyCase;
    use std::env::temp_dir;

    fn temp_study_path(name: &str) -> PathBuf {
        temp_dir().join(format!("tew_test_{}_{}.tew.json", name, std::process::id()))
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/panels.tew.json"));
        assert_eq!(tmp, Path::new("/path/to/panels.tew.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_study_path("roundtrip");

        let mut study = Study::new("Test Analyst", "Test reference");
        study.add_case(StudyCase::new(case_one()));
        save_study(&study, &path).unwrap();

        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded, study);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_study_path("atomic");

        save_study(&Study::new("Test", ""), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_study(&temp_study_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json() {
        let path = temp_study_path("invalid");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_study(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_laminate_in_file_rejected() {
        let path = temp_study_path("empty_laminate");
        let mut study = Study::new("Test", "");
        study.add_case(StudyCase::new(case_one()));
        let json = serde_json::to_string(&study).unwrap();
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["cases"][0]["config"]["skin"] = serde_json::json!([]);
        fs::write(&path, value.to_string()).unwrap();

        let err = load_study(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("at least one ply"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_file_rejected_on_load() {
        let path = temp_study_path("newer");
        let mut study = Study::new("Test", "");
        study.meta.version = "0.9.0".to_string();
        save_study(&study, &path).unwrap();

        match load_study(&path).unwrap_err() {
            TewError::VersionMismatch { file_version, .. } => assert_eq!(file_version, "0.9.0"),
            other => panic!("unexpected error: {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }
}
