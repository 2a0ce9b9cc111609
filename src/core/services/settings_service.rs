use crate::ledger::{Settings, Snapshot};

use super::{require_text, ServiceResult};

pub struct SettingsService;

impl SettingsService {
    pub fn set_dark_mode(snapshot: &mut Snapshot, enabled: bool) {
        snapshot.settings.dark_mode = enabled;
    }

    pub fn set_notifications(snapshot: &mut Snapshot, enabled: bool) {
        snapshot.settings.notifications = enabled;
    }

    /// Stores an upper-cased currency code.
    pub fn set_currency(snapshot: &mut Snapshot, code: &str) -> ServiceResult<()> {
        require_text("currency", code)?;
        snapshot.settings.currency = code.trim().to_uppercase();
        Ok(())
    }

    pub fn current(snapshot: &Snapshot) -> &Settings {
        &snapshot.settings
    }
}
