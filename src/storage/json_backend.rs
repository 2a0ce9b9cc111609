use chrono::NaiveDate;
use std::{
    collections::HashMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{LedgerError, Result},
    ledger::Snapshot,
};

use super::SnapshotSlot;

pub const DEFAULT_SLOT_KEY: &str = "moneyMagnetData";

const SLOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";
const EXPORT_PREFIX: &str = "money-magnet-data";

/// Stores each slot as `<root>/<key>.json`, replacing files atomically.
#[derive(Debug, Clone)]
pub struct JsonFileSlot {
    root: PathBuf,
}

impl JsonFileSlot {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    /// Slot directory under the application base directory.
    pub fn in_base(base: Option<PathBuf>) -> Result<Self> {
        let base = PathResolver::resolve_base(base);
        Self::new(PathResolver::slots_dir_in(&base))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", canonical_key(key), SLOT_EXTENSION))
    }
}

impl SnapshotSlot for JsonFileSlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        write_atomic(&self.slot_path(key), data)
    }
}

/// In-process slot. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, data: impl Into<String>) -> Self {
        let slot = Self::new();
        if let Ok(mut entries) = slot.entries.lock() {
            entries.insert(key.to_string(), data.into());
        }
        slot
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| LedgerError::Persistence("memory slot lock poisoned".into()))
    }
}

impl SnapshotSlot for MemorySlot {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, data: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), data.to_string());
        Ok(())
    }
}

/// Parses a stored snapshot. Missing collections default to empty.
pub fn load_snapshot(raw: &str) -> Result<Snapshot> {
    Ok(serde_json::from_str(raw)?)
}

/// Serializes the snapshot in the compact storage form.
pub fn persist_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string(snapshot)?)
}

/// Human-readable serialization used for downloads.
pub fn export_snapshot(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}-{}.json", EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_SLOT_KEY.into()
    } else {
        sanitized
    }
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

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
    }

    #[test]
    fn file_slot_round_trips_and_leaves_no_tmp() {
        let dir = tempdir().unwrap();
        let slot = JsonFileSlot::new(dir.path()).unwrap();
        assert!(slot.read(DEFAULT_SLOT_KEY).unwrap().is_none());

        slot.write(DEFAULT_SLOT_KEY, "{\"budgets\":[]}").unwrap();
        assert_eq!(
            slot.read(DEFAULT_SLOT_KEY).unwrap().as_deref(),
            Some("{\"budgets\":[]}")
        );
        let path = slot.slot_path(DEFAULT_SLOT_KEY);
        assert!(path.ends_with("moneyMagnetData.json"));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn keys_are_sanitized() {
        let slot = JsonFileSlot::new(tempdir().unwrap().path()).unwrap();
        assert!(slot.slot_path("../escape").ends_with("___escape.json"));
        assert!(slot.slot_path("  ").ends_with("moneyMagnetData.json"));
    }

    #[test]
    fn memory_slot_clones_share_state() {
        let slot = MemorySlot::new();
        let handle = slot.clone();
        slot.write("k", "v").unwrap();
        assert_eq!(handle.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn persisted_snapshot_loads_back_equal() {
        let snapshot = Snapshot::with_defaults(date());
        let raw = persist_snapshot(&snapshot).unwrap();
        assert_eq!(load_snapshot(&raw).unwrap(), snapshot);
        let pretty = export_snapshot(&snapshot).unwrap();
        assert!(pretty.contains('\n'));
        assert_eq!(load_snapshot(&pretty).unwrap(), snapshot);
    }

    #[test]
    fn partial_documents_fill_missing_collections() {
        let snapshot = load_snapshot("{\"settings\":{\"darkMode\":false,\"notifications\":true,\"currency\":\"EUR\"}}").unwrap();
        assert!(snapshot.transactions.is_empty());
        assert!(!snapshot.settings.dark_mode);
        assert!(load_snapshot("not json").is_err());
    }

    #[test]
    fn export_name_uses_iso_date() {
        assert_eq!(export_file_name(date()), "money-magnet-data-2025-09-03.json");
    }
}
