pub mod json_backend;

use crate::errors::Result;

/// A named key/value slot holding one serialized snapshot per key.
pub trait SnapshotSlot: Send + Sync {
    /// Returns `None` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, data: &str) -> Result<()>;
}

pub use json_backend::{
    export_file_name, export_snapshot, load_snapshot, persist_snapshot, JsonFileSlot, MemorySlot,
    DEFAULT_SLOT_KEY,
};
