use chrono::Utc;
use serde_json::{Map, Value};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{Result, TrackerError},
};

use super::KeyValueStore;

const BACKUP_PREFIX: &str = "store_";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const BACKUP_TIMESTAMP_LEN: usize = 18;
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// A backup file written by [`JsonFileStore::backup`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub name: String,
    pub path: PathBuf,
}

/// Key-value store persisted as a single JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a failed write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    entries: Map<String, Value>,
}

impl JsonFileStore {
    pub fn open(
        path: impl Into<PathBuf>,
        backups_dir: impl Into<PathBuf>,
        retention: Option<usize>,
    ) -> Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        debug!(path = %path.display(), keys = entries.len(), "opened json store");
        Ok(Self {
            path,
            backups_dir: backups_dir.into(),
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
            entries,
        })
    }

    /// Opens the store at its standard location below `base`.
    pub fn open_in(base: &Path, retention: Option<usize>) -> Result<Self> {
        Self::open(
            PathResolver::store_file_in(base),
            PathResolver::backup_dir_in(base),
            retention,
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Re-reads the file, discarding in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        self.entries = read_entries(&self.path)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<BackupInfo> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{BACKUP_PREFIX}{timestamp}");
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let path = unique_path(&self.backups_dir, &stem);
        let json = serde_json::to_string_pretty(&self.entries)?;
        write_atomic(&path, &json)?;
        let name = file_name(&path).unwrap_or_default();
        info!(backup = %name, "store backup written");
        self.prune_backups()?;
        Ok(BackupInfo { name, path })
    }

    /// Backups newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let Some(name) = file_name(&path) else {
                continue;
            };
            if backup_timestamp(&name).is_none() {
                continue;
            }
            entries.push(BackupInfo { name, path });
        }
        entries.sort_by(|a, b| {
            backup_timestamp(&b.name)
                .cmp(&backup_timestamp(&a.name))
                .then_with(|| backup_sequence(&b.name).cmp(&backup_sequence(&a.name)))
                .then_with(|| b.name.cmp(&a.name))
        });
        Ok(entries)
    }

    /// Replaces the current contents with those of backup `name`.
    pub fn restore_backup(&mut self, name: &str) -> Result<()> {
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(TrackerError::InvalidArgument(format!(
                "`{name}` is not a backup name"
            )));
        }
        let path = self.backups_dir.join(name);
        if !path.exists() {
            return Err(TrackerError::NotFound(format!("backup `{name}`")));
        }
        self.entries = read_entries(&path)?;
        self.flush()?;
        info!(backup = %name, "store restored from backup");
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for stale in backups.iter().skip(self.retention) {
            debug!(backup = %stale.name, "pruning old backup");
            fs::remove_file(&stale.path)?;
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let previous = self.entries.insert(key.to_string(), value);
        if let Err(err) = self.flush() {
            match previous {
                Some(old) => self.entries.insert(key.to_string(), old),
                None => self.entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    fn set_many(&mut self, entries: Vec<(String, Value)>) -> Result<()> {
        let snapshot = self.entries.clone();
        self.entries.extend(entries);
        if let Err(err) = self.flush() {
            self.entries = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>> {
    if !path.exists() {
        return Ok(Map::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(&data)? {
        Value::Object(entries) => Ok(entries),
        _ => Err(TrackerError::Storage(format!(
            "`{}` does not hold a JSON object",
            path.display()
        ))),
    }
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

fn backup_timestamp(name: &str) -> Option<&str> {
    let rest = name.strip_prefix(BACKUP_PREFIX)?;
    let stamp = rest.get(..BACKUP_TIMESTAMP_LEN)?;
    let digits_ok = stamp
        .char_indices()
        .all(|(idx, ch)| if idx == 8 { ch == '_' } else { ch.is_ascii_digit() });
    digits_ok.then_some(stamp)
}

/// Collision counter of a backup name such as `store_<stamp>.2.json`; `0` when absent.
///
/// Sanitized notes never contain `.`, so the counter is unambiguous.
fn backup_sequence(name: &str) -> u32 {
    name.strip_suffix(BACKUP_EXTENSION)
        .and_then(|stem| stem.strip_suffix('.'))
        .and_then(|stem| stem.rsplit_once('.'))
        .and_then(|(_, counter)| counter.parse().ok())
        .unwrap_or(0)
}

fn unique_path(dir: &Path, stem: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{stem}.{BACKUP_EXTENSION}"));
    let mut counter = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{stem}.{counter}.{BACKUP_EXTENSION}"));
        counter += 1;
    }
    candidate
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.' | '_'))
            && !sanitized.is_empty()
            && !sanitized.ends_with('-')
        {
            sanitized.push('-');
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
