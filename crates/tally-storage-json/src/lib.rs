//! tally-storage-json
//!
//! Whole-document JSON persistence for a ledger, with timestamped backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use serde::Serialize;
use tally_core::{
    storage::{LedgerBackupInfo, LedgerStorage},
    CoreError,
};
use tally_domain::Ledger;

const LEDGER_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const JSON_INDENT: &[u8] = b"    ";
pub const DEFAULT_RETENTION: usize = 5;

/// Locations used by [`JsonLedgerStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub ledger_file: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    /// Places backups in a `backups` directory next to the ledger file.
    pub fn beside(ledger_file: impl Into<PathBuf>) -> Self {
        let ledger_file = ledger_file.into();
        let backup_root = ledger_file
            .parent()
            .map(|parent| parent.join("backups"))
            .unwrap_or_else(|| PathBuf::from("backups"));
        Self {
            ledger_file,
            backup_root,
        }
    }
}

/// Filesystem-backed JSON persistence for one ledger document and its backups.
#[derive(Debug, Clone)]
pub struct JsonLedgerStorage {
    ledger_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonLedgerStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        if let Some(parent) = paths.ledger_file.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            ledger_file: paths.ledger_file,
            backups_dir: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_file
    }

    /// Finds a backup by file name.
    pub fn find_backup(&self, backup_id: &str) -> Result<LedgerBackupInfo, CoreError> {
        self.list_backups()?
            .into_iter()
            .find(|info| info.id == backup_id)
            .ok_or_else(|| CoreError::BackupNotFound(backup_id.to_string()))
    }

    fn stem(&self) -> String {
        let stem = self
            .ledger_file
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        canonical_name(stem)
    }

    fn next_backup_path(&self, note: Option<&str>) -> Result<(PathBuf, String, String), CoreError> {
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", self.stem(), timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let mut file_name = format!("{}.{}", stem, LEDGER_EXTENSION);
        let mut attempt = 2;
        while self.backups_dir.join(&file_name).exists() {
            file_name = format!("{}-{}.{}", stem, attempt, LEDGER_EXTENSION);
            attempt += 1;
        }
        Ok((self.backups_dir.join(&file_name), file_name, timestamp))
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            let _ = fs::remove_file(entry.path);
        }
        Ok(())
    }
}

impl LedgerStorage for JsonLedgerStorage {
    fn load_ledger(&self) -> Result<Option<Ledger>, CoreError> {
        if !self.ledger_file.exists() {
            return Ok(None);
        }
        load_ledger_from_path(&self.ledger_file).map(Some)
    }

    fn save_ledger(&self, ledger: &Ledger) -> Result<(), CoreError> {
        save_ledger_to_path(ledger, &self.ledger_file)
    }

    fn backup_ledger(
        &self,
        ledger: &Ledger,
        note: Option<&str>,
    ) -> Result<LedgerBackupInfo, CoreError> {
        let (path, id, created_at) = self.next_backup_path(note)?;
        write_atomic(&path, &serialize_ledger(ledger)?)?;
        self.prune_backups()?;
        Ok(LedgerBackupInfo {
            id,
            created_at,
            path,
        })
    }

    fn backup_stored(&self, note: Option<&str>) -> Result<Option<LedgerBackupInfo>, CoreError> {
        if !self.ledger_file.exists() {
            return Ok(None);
        }
        let (path, id, created_at) = self.next_backup_path(note)?;
        fs::copy(&self.ledger_file, &path)?;
        self.prune_backups()?;
        Ok(Some(LedgerBackupInfo {
            id,
            created_at,
            path,
        }))
    }

    fn list_backups(&self) -> Result<Vec<LedgerBackupInfo>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                let created_at = parse_backup_timestamp(file_name)
                    .map(|stamp| stamp.format(BACKUP_TIMESTAMP_FORMAT).to_string())
                    .unwrap_or_default();
                entries.push(LedgerBackupInfo {
                    id: file_name.to_string(),
                    created_at,
                    path: path.clone(),
                });
            }
        }
        entries.sort_by(|a, b| {
            Reverse(parse_backup_timestamp(&a.id))
                .cmp(&Reverse(parse_backup_timestamp(&b.id)))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    fn restore_backup(&self, backup: &LedgerBackupInfo) -> Result<Ledger, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::BackupNotFound(backup.id.clone()));
        }
        let ledger = load_ledger_from_path(&backup.path)?;
        save_ledger_to_path(&ledger, &self.ledger_file)?;
        Ok(ledger)
    }

    fn location(&self) -> String {
        self.ledger_file.display().to_string()
    }
}

/// Saves a ledger to an arbitrary path on disk, replacing it atomically.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<(), CoreError> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize_ledger(ledger)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a ledger from the provided filesystem path.
pub fn load_ledger_from_path(path: &Path) -> Result<Ledger, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "ledger".into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Extracts the `YYYYMMDD_HHMMSS` stamp from a backup file name.
fn parse_backup_timestamp(name: &str) -> Option<NaiveDateTime> {
    let trimmed = name.strip_suffix(&format!(".{}", LEDGER_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    segments.windows(2).rev().find_map(|pair| {
        let time = pair[1].split('-').next().unwrap_or_default();
        if !is_digits(pair[0], 8) || !is_digits(time, 6) {
            return None;
        }
        NaiveDateTime::parse_from_str(&format!("{}{}", pair[0], time), "%Y%m%d%H%M%S").ok()
    })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn serialize_ledger(ledger: &Ledger) -> Result<String, CoreError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    ledger
        .serialize(&mut serializer)
        .map_err(|err| CoreError::Serde(err.to_string()))?;
    String::from_utf8(buffer).map_err(|err| CoreError::Serde(err.to_string()))
}
