use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Display preferences. No other record depends on these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dark_mode: bool,
    pub notifications: bool,
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dark_mode: true,
            notifications: true,
            currency: DEFAULT_CURRENCY.into(),
        }
    }
}
