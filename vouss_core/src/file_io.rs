//! # File I/O Module
//!
//! Handles project files and table exports:
//! - **Atomic writes**: write to a `.tmp` sibling, fsync, rename
//! - **Version validation**: refuse project files from an incompatible schema
//! - **Table export**: sweep tables as CSV or JSON
//!
//! ## File Format
//!
//! Projects are saved as `.vsp` files containing pretty JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vouss_core::calculations::{sweep, VoussoirConfig, VoussoirInput};
//! use vouss_core::file_io::{export_table_csv, save_project};
//! use vouss_core::project::Project;
//! use std::path::Path;
//!
//! let mut project = Project::new("Engineer", "26-001", "Site");
//! project.add_item(VoussoirInput::reference());
//! save_project(&project, Path::new("roof.vsp"))?;
//!
//! let config = VoussoirConfig::from_input(&VoussoirInput::reference())?;
//! let table = sweep(&config)?;
//! export_table_csv(&table, Path::new("roof.csv"))?;
//! # Ok::<(), vouss_core::errors::VoussoirError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::calculations::sensitivity::{SweepRow, SweepTable, COLUMNS};
use crate::errors::{VoussoirError, VoussoirResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Temp path used while writing `path`: `roof.vsp` → `roof.vsp.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Write bytes with atomic semantics.
///
/// 1. Write to a temporary sibling (`.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
fn write_atomic(path: &Path, bytes: &[u8]) -> VoussoirResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        VoussoirError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        VoussoirError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        VoussoirError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        VoussoirError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a project to a `.vsp` file with atomic write semantics.
pub fn save_project(project: &Project, path: &Path) -> VoussoirResult<()> {
    let json = serde_json::to_string_pretty(project)
        .map_err(|e| VoussoirError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), items = project.item_count(), "saved project");
    Ok(())
}

/// Load a project from a `.vsp` file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(VoussoirError::VersionMismatch)` - File version is incompatible
/// * `Err(VoussoirError::SerializationError)` - Invalid JSON
/// * `Err(VoussoirError::FileError)` - I/O error
pub fn load_project(path: &Path) -> VoussoirResult<Project> {
    let mut file = File::open(path).map_err(|e| {
        VoussoirError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        VoussoirError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| {
        VoussoirError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&project.meta.version)?;

    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> VoussoirResult<()> {
    let mismatch = || VoussoirError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // In 0.x a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

/// Render a sweep table as CSV: a header row with [`COLUMNS`], then one line
/// per thickness. Non-finite values are written as `inf`/`NaN`.
pub fn table_to_csv(table: &SweepTable) -> String {
    let mut csv = String::with_capacity(64 * (table.len() + 1));
    csv.push_str(&COLUMNS.join(","));
    csv.push('\n');

    for row in &table.rows {
        let fields: Vec<String> = row
            .values()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                if COLUMNS[i] == "buck_limit" {
                    row.buck_limit.to_string()
                } else {
                    v.to_string()
                }
            })
            .collect();
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }
    csv
}

/// Export a sweep table as CSV.
pub fn export_table_csv(table: &SweepTable, path: &Path) -> VoussoirResult<()> {
    write_atomic(path, table_to_csv(table).as_bytes())?;
    info!(path = %path.display(), rows = table.len(), "exported CSV table");
    Ok(())
}

#[derive(Serialize)]
struct TableDocument<'a> {
    label: &'a str,
    generated_at: DateTime<Utc>,
    columns: &'a [&'static str],
    rows: &'a [SweepRow],
}

/// Export a sweep table as JSON.
///
/// Infinite values (no admissible arch) are written as `null`.
pub fn export_table_json(table: &SweepTable, path: &Path) -> VoussoirResult<()> {
    let doc = TableDocument {
        label: &table.label,
        generated_at: Utc::now(),
        columns: &COLUMNS,
        rows: &table.rows,
    };
    let json = serde_json::to_string_pretty(&doc)
        .map_err(|e| VoussoirError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())?;
    info!(path = %path.display(), rows = table.len(), "exported JSON table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{sweep, VoussoirConfig, VoussoirInput};
    use std::env::temp_dir;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        temp_dir().join(format!("vouss_test_{}_{}.{}", name, std::process::id(), ext))
    }

    fn reference_table() -> SweepTable {
        sweep(&VoussoirConfig::from_input(&VoussoirInput::reference()).unwrap()).unwrap()
    }

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/roof.vsp"));
        assert_eq!(tmp, Path::new("/path/to/roof.vsp.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_path("roundtrip", "vsp");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Mine");
        project.add_item(VoussoirInput::reference());
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.site, "Test Mine");
        assert_eq!(loaded.item_count(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_path("atomic", "vsp");

        save_project(&Project::new("Test", "TEST", "Site"), &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(Path::new("/nonexistent/dir/roof.vsp")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_path("newer", "vsp");
        let mut project = Project::new("Test", "TEST", "Site");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert!(matches!(err, VoussoirError::VersionMismatch { .. }));

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
    fn test_csv_layout() {
        let csv = table_to_csv(&reference_table());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 51);
        assert_eq!(
            lines[0],
            "thickness,n,zo,z_chk,z,fm,fav,buck_limit,fs_crush,fs_sliding,deflection"
        );
        assert!(lines[1].starts_with("0.5,"));
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields.len(), 11);
        assert_eq!(fields[7], "41");
        assert!(lines[50].starts_with("0.75,"));
    }

    #[test]
    fn test_csv_writes_inf() {
        let input = VoussoirInput { young_modulus_mpa: 50.0, ..VoussoirInput::reference() };
        let table = sweep(&VoussoirConfig::from_input(&input).unwrap()).unwrap();
        let csv = table_to_csv(&table);
        let fields: Vec<&str> = csv.lines().nth(1).unwrap().split(',').collect();
        assert_eq!(fields[5], "inf");
        assert_eq!(fields[9], "inf");
        assert_eq!(fields[8], "0");
    }

    #[test]
    fn test_export_csv_and_json() {
        let table = reference_table();
        let csv_path = temp_path("export", "csv");
        let json_path = temp_path("export", "json");

        export_table_csv(&table, &csv_path).unwrap();
        export_table_json(&table, &json_path).unwrap();

        assert!(!tmp_path_for(&csv_path).exists());
        assert!(fs::read_to_string(&csv_path).unwrap().starts_with("thickness,"));

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(doc["label"], "Reference");
        assert_eq!(doc["columns"].as_array().unwrap().len(), 11);
        assert_eq!(doc["rows"].as_array().unwrap().len(), 50);
        assert_eq!(doc["rows"][0]["buck_limit"], 41);

        let _ = fs::remove_file(&csv_path);
        let _ = fs::remove_file(&json_path);
    }

    #[test]
    fn test_json_writes_null_for_inf() {
        let input = VoussoirInput { young_modulus_mpa: 50.0, ..VoussoirInput::reference() };
        let table = sweep(&VoussoirConfig::from_input(&input).unwrap()).unwrap();
        let path = temp_path("inf", "json");

        export_table_json(&table, &path).unwrap();
        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(doc["rows"][0]["fm"].is_null());
        assert_eq!(doc["rows"][0]["fs_crush"], 0.0);

        let _ = fs::remove_file(&path);
    }
}
