//! Category icons for list views. Icons are never stored with records.

const DEFAULT_ICON: &str = "🛒";

const CATEGORY_ICONS: &[(&str, &str)] = &[
    ("salary", "💵"),
    ("rent", "🏠"),
    ("housing", "🏠"),
    ("groceries", "🛒"),
    ("food", "🍴"),
    ("transportation", "🚗"),
    ("entertainment", "🎮"),
    ("shopping", "🛒"),
    ("bills", "💳"),
    ("coffee", "☕"),
    ("utilities", "⚡"),
    ("insurance", "🛡"),
    ("investment", "📈"),
    ("savings", "👛"),
];

/// Case-insensitive lookup; unknown categories get the shopping cart.
pub fn category_icon(category: &str) -> &'static str {
    let key = category.trim().to_lowercase();
    CATEGORY_ICONS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_ICON)
}
