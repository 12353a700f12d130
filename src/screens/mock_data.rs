//! Fallback content shown when the platform inventory yields nothing.

use crate::inventory::IconSource;

use super::detail::SettingEntry;
use super::home::{AppEntry, Provenance};

const MOCK_APPS: [(&str, &str, &str, bool); 21] = [
    ("1", "Calendar", "📅", true),
    ("2", "Camera", "📷", true),
    ("3", "Clock", "⏰", false),
    ("4", "Contacts", "👥", true),
    ("5", "Email", "✉️", true),
    ("6", "Facebook", "📘", false),
    ("7", "Instagram", "📸", true),
    ("8", "Maps", "🗺️", true),
    ("9", "Messages", "💬", true),
    ("10", "Music", "🎵", false),
    ("11", "News", "📰", true),
    ("12", "Notes", "📝", true),
    ("13", "Phone", "📞", true),
    ("14", "Photos", "🖼️", true),
    ("15", "Settings", "⚙️", false),
    ("16", "Slack", "💼", true),
    ("17", "TikTok", "🎬", true),
    ("18", "Twitter", "🐦", false),
    ("19", "Weather", "🌤️", true),
    ("20", "WhatsApp", "💚", true),
    ("21", "YouTube", "📺", false),
];

const MOCK_SETTINGS: [(&str, &str, &str, bool); 15] = [
    ("1", "Allow Notifications", "Enable all notifications from this app", true),
    ("2", "Sounds", "Play sound when notifications arrive", true),
    ("3", "Badges", "Show badge on app icon", true),
    ("4", "Lock Screen", "Show notifications on lock screen", true),
    ("5", "Notification Center", "Show in notification center", true),
    ("6", "Banners", "Show banner notifications", false),
    ("7", "Alerts", "Show alert-style notifications", true),
    ("8", "Previews", "Show notification previews", true),
    ("9", "Critical Alerts", "Allow critical alerts that bypass Do Not Disturb", false),
    ("10", "Time Sensitive", "Allow time-sensitive notifications", true),
    ("11", "Grouping", "Group notifications from this app", true),
    ("12", "Direct Messages", "Notifications for direct messages", true),
    ("13", "Mentions", "Notifications when you are mentioned", true),
    ("14", "Comments", "Notifications for comments", false),
    ("15", "Likes", "Notifications for likes", false),
];

/// Mock home list, sorted by name.
pub fn mock_apps() -> Vec<AppEntry> {
    let mut apps: Vec<AppEntry> = MOCK_APPS
        .iter()
        .map(|&(id, name, glyph, enabled)| AppEntry {
            id: id.to_string(),
            name: name.to_string(),
            icon: IconSource::classify(Some(glyph)),
            notifications_enabled: enabled,
            provenance: Provenance::Mock,
        })
        .collect();
    apps.sort_by_cached_key(|app| app.name.to_lowercase());
    apps
}

pub fn mock_settings() -> Vec<SettingEntry> {
    MOCK_SETTINGS
        .iter()
        .map(|&(id, title, description, enabled)| SettingEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            enabled,
            importance: None,
        })
        .collect()
}
