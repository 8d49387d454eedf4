//! # File I/O Module
//!
//! Worksheet and settings persistence:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **File locking**: one writer per worksheet, visible to other users
//! - **Version validation**: reject worksheets from an incompatible schema
//!
//! ## File Format
//!
//! Worksheets are saved as `.cws` files containing pretty-printed JSON.
//! Lock files use the `.cws.lock` extension and record who holds the lock.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{save_worksheet, load_worksheet, FileLock};
//! use calc_core::worksheet::Worksheet;
//! use std::path::Path;
//!
//! let sheet = Worksheet::new("Ana", "Budget");
//! let path = Path::new("budget.cws");
//!
//! let lock = FileLock::acquire(path, "ana")?;
//! save_worksheet(&sheet, path)?;
//! drop(lock);
//!
//! let loaded = load_worksheet(path)?;
//! assert_eq!(loaded.meta.title, "Budget");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::settings::CalcSettings;
use crate::worksheet::{Worksheet, SCHEMA_VERSION, WORKSHEET_EXTENSION};

/// Locks older than this are taken over regardless of owner.
const STALE_LOCK_HOURS: i64 = 24;

/// Lock file metadata stored in .cws.lock files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: machine_name(),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// The holder died on this machine, or the lock has simply been around too long.
    pub fn is_stale(&self) -> bool {
        if self.machine == machine_name() && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

/// Host name recorded in lock files, `"unknown"` when it cannot be found.
fn machine_name() -> String {
    hostname()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        // Shells set HOSTNAME without exporting it
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
            .or_else(|| fs::read_to_string("/etc/hostname").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    fs::metadata(format!("/proc/{}", pid)).is_ok()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    match Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()),
        Err(_) => true,
    }
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a worksheet, released when dropped.
///
/// Combines an OS-level lock (fs2) on the lock file with JSON metadata in
/// that file, so other users can see who holds it.
pub struct FileLock {
    worksheet_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a worksheet file.
    ///
    /// # Errors
    ///
    /// `FileLocked` when another live process holds the lock, `FileError`
    /// when the lock file cannot be written.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = Self::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info)?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "worksheet lock acquired");

        Ok(FileLock {
            worksheet_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current holder of the lock, if any. Stale and unreadable locks count as free.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let lock_path = lock_path_for(path);
        if !lock_path.exists() {
            return None;
        }
        read_lock_info(&lock_path).ok().filter(|info| !info.is_stale())
    }

    pub fn worksheet_path(&self) -> &Path {
        &self.worksheet_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `budget.cws` → `budget.cws.lock`
fn lock_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    path.with_extension(extension)
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_to_string(lock_path, "read lock")?;
    Ok(serde_json::from_str(&contents)?)
}

fn read_to_string(path: &Path, operation: &str) -> CalcResult<String> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Write `contents` to `<path>.tmp`, fsync, then rename over `path`.
fn write_atomic(path: &Path, contents: &str) -> CalcResult<()> {
    let tmp_extension = match path.extension() {
        Some(ext) => format!("{}.tmp", ext.to_string_lossy()),
        None => "tmp".to_string(),
    };
    let tmp_path = path.with_extension(tmp_extension);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(contents.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })
}

/// Save a worksheet with atomic write semantics.
///
/// An interrupted save leaves the previous file untouched.
pub fn save_worksheet(worksheet: &Worksheet, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(worksheet)?;
    write_atomic(path, &json)?;
    info!(path = %path.display(), items = worksheet.item_count(), "worksheet saved");
    Ok(())
}

/// Load a worksheet from a file.
///
/// # Errors
///
/// * `FileError` - the file cannot be read
/// * `SerializationError` - invalid JSON or unknown request type
/// * `VersionMismatch` - written by an incompatible schema
/// * `InvalidInput` - the embedded settings are invalid
pub fn load_worksheet(path: &Path) -> CalcResult<Worksheet> {
    let contents = read_to_string(path, "open")?;

    let worksheet: Worksheet = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid worksheet {}: {}", path.display(), e))
    })?;

    validate_version(&worksheet.meta.version)?;
    worksheet.settings.validate()?;

    info!(path = %path.display(), items = worksheet.item_count(), "worksheet loaded");
    Ok(worksheet)
}

/// Load a worksheet and report who holds its lock, if anyone.
///
/// A held lock means the caller should treat the worksheet as read-only.
pub fn load_worksheet_with_lock_check(path: &Path) -> CalcResult<(Worksheet, Option<LockInfo>)> {
    let worksheet = load_worksheet(path)?;
    let lock_info = FileLock::check(path);
    Ok((worksheet, lock_info))
}

/// Load settings from a JSON file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> CalcResult<CalcSettings> {
    let contents = read_to_string(path, "open settings")?;
    let settings: CalcSettings = serde_json::from_str(&contents).map_err(|e| {
        CalcError::serialization(format!("Invalid settings {}: {}", path.display(), e))
    })?;
    settings.validate()?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

pub fn save_settings(settings: &CalcSettings, path: &Path) -> CalcResult<()> {
    settings.validate()?;
    let json = serde_json::to_string_pretty(settings)?;
    write_atomic(path, &json)
}

/// Major version must match; on 0.x a newer minor is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file_parts.as_slice(), current_parts.as_slice()) {
        ([file_major, ..], [current_major, ..]) if file_major != current_major => Err(mismatch()),
        ([0, file_minor, ..], [0, current_minor, ..]) if file_minor > current_minor => Err(mismatch()),
        ([_, ..], [_, ..]) => Ok(()),
        _ => Err(mismatch()),
    }
}

/// Append the worksheet extension when the path has none.
pub fn with_worksheet_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(WORKSHEET_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::CalculationRequest;
    use tempfile::tempdir;

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/path/to/budget.cws"));
        assert_eq!(lock_path, Path::new("/path/to/budget.cws.lock"));
    }

    #[test]
    fn test_lock_info_creation() {
        let info = LockInfo::new("ana@example.com");
        assert_eq!(info.user_id, "ana@example.com");
        assert!(info.pid > 0);
        assert!(!info.is_stale());
    }

    #[test]
    fn test_lock_records_machine_name() {
        let info = LockInfo::new("ana");
        assert!(!info.machine.is_empty());
        assert_eq!(info.machine, machine_name());
    }

    #[cfg(unix)]
    #[test]
    fn test_dead_process_lock_is_stale() {
        let mut info = LockInfo::new("ana");
        info.pid = u32::MAX;
        assert!(info.is_stale());
    }

    #[cfg(unix)]
    #[test]
    fn test_lock_from_dead_process_is_taken_over() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crashed.cws");

        let mut holder = LockInfo::new("bruno");
        holder.pid = u32::MAX;
        fs::write(lock_path_for(&path), serde_json::to_string(&holder).unwrap()).unwrap();

        let lock = FileLock::acquire(&path, "ana").unwrap();
        assert_eq!(lock.info.user_id, "ana");
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("ana");
        info.machine = "some-other-host".to_string();
        info.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        assert!(info.is_stale());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("budget.cws");

        let mut sheet = Worksheet::new("Ana", "Budget");
        sheet.settings.words_per_minute = 250;
        sheet.add_item("Tip", CalculationRequest::PercentageOfNumber { percentage: 15.0, base: 80.0 });
        save_worksheet(&sheet, &path).unwrap();

        let loaded = load_worksheet(&path).unwrap();
        assert_eq!(loaded.meta.author, "Ana");
        assert_eq!(loaded.meta.title, "Budget");
        assert_eq!(loaded.settings.words_per_minute, 250);
        assert_eq!(loaded.item_count(), 1);
        assert_eq!(loaded.items[0].id, sheet.items[0].id);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("atomic.cws");

        save_worksheet(&Worksheet::new("Ana", "Atomic"), &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("atomic.cws.tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_worksheet(&dir.path().join("missing.cws")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.cws");

        let mut sheet = Worksheet::new("Ana", "Future");
        sheet.meta.version = "0.9.0".to_string();
        save_worksheet(&sheet, &path).unwrap();

        let err = load_worksheet(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.cws");

        let mut sheet = Worksheet::new("Ana", "Bad");
        sheet.settings.integration_intervals = 0;
        save_worksheet(&sheet, &path).unwrap();

        assert!(load_worksheet(&path).unwrap_err().is_input_error());
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.cws");
        fs::write(&path, "not json").unwrap();

        assert_eq!(load_worksheet(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("locked.cws");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "ana@example.com").unwrap();
        assert_eq!(lock.info.user_id, "ana@example.com");
        assert_eq!(lock.worksheet_path(), path.as_path());

        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
    }

    #[test]
    fn test_foreign_lock_blocks_acquire() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shared.cws");

        let mut holder = LockInfo::new("bruno");
        holder.machine = "another-host".to_string();
        fs::write(lock_path_for(&path), serde_json::to_string(&holder).unwrap()).unwrap();

        assert!(FileLock::check(&path).is_some());
        let err = FileLock::acquire(&path, "ana").err().unwrap();
        assert_eq!(err.error_code(), "FILE_LOCKED");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stale.cws");

        let mut holder = LockInfo::new("bruno");
        holder.machine = "another-host".to_string();
        holder.locked_at = Utc::now() - chrono::Duration::hours(48);
        fs::write(lock_path_for(&path), serde_json::to_string(&holder).unwrap()).unwrap();

        assert!(FileLock::check(&path).is_none());
        let lock = FileLock::acquire(&path, "ana").unwrap();
        assert_eq!(lock.info.user_id, "ana");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_load_with_lock_check() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("check.cws");
        save_worksheet(&Worksheet::new("Ana", "Check"), &path).unwrap();

        let (loaded, lock_info) = load_worksheet_with_lock_check(&path).unwrap();
        assert_eq!(loaded.meta.title, "Check");
        assert!(lock_info.is_none());

        let _lock = FileLock::acquire(&path, "ana").unwrap();
        let (_, lock_info) = load_worksheet_with_lock_check(&path).unwrap();
        assert_eq!(lock_info.unwrap().user_id, "ana");
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = CalcSettings {
            amortization_rows: 24,
            ..CalcSettings::default()
        };
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "words_per_minute": 300 }"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.words_per_minute, 300);
        assert_eq!(settings.integration_intervals, CalcSettings::default().integration_intervals);
    }

    #[test]
    fn test_with_worksheet_extension() {
        assert_eq!(with_worksheet_extension(Path::new("budget")), Path::new("budget.cws"));
        assert_eq!(with_worksheet_extension(Path::new("budget.json")), Path::new("budget.json"));
    }
}
