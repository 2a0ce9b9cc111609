#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use money_magnet::{
    core::{FixedClock, LedgerStore},
    storage::{JsonFileSlot, MemorySlot, DEFAULT_SLOT_KEY},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
}

/// Creates a unique base directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Store seeded with defaults, backed by a shared in-memory slot.
pub fn memory_store() -> (LedgerStore, MemorySlot) {
    let slot = MemorySlot::new();
    let store = LedgerStore::open_with(
        Box::new(slot.clone()),
        DEFAULT_SLOT_KEY,
        Box::new(FixedClock::new(today())),
    );
    (store, slot)
}

/// Store backed by JSON files under `base`.
pub fn file_store(base: &Path) -> LedgerStore {
    let slot = JsonFileSlot::in_base(Some(base.to_path_buf())).expect("create file slot");
    LedgerStore::open_with(
        Box::new(slot),
        DEFAULT_SLOT_KEY,
        Box::new(FixedClock::new(today())),
    )
}
