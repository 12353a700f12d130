use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::icon::IconSource;

/// Installed application as exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstalledAppRecord {
    pub package_identifier: String,
    pub display_name: String,
    pub icon: IconSource,
    /// OS-reported state at query time. Never written back.
    pub notifications_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationChannelRecord {
    pub channel_id: String,
    pub name: String,
    pub description: Option<String>,
    pub importance: i32,
    pub enabled: bool,
}

impl NotificationChannelRecord {
    pub fn importance_level(&self) -> ChannelImportance {
        ChannelImportance::from_ordinal(self.importance)
    }
}

/// Android `NotificationManager` importance ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChannelImportance {
    Unspecified,
    None,
    Min,
    Low,
    Default,
    High,
    Max,
    Unknown,
}

impl ChannelImportance {
    pub fn from_ordinal(value: i32) -> Self {
        match value {
            -1000 => Self::Unspecified,
            0 => Self::None,
            1 => Self::Min,
            2 => Self::Low,
            3 => Self::Default,
            4 => Self::High,
            5 => Self::Max,
            _ => Self::Unknown,
        }
    }

    /// Platform ordinal; higher is more intrusive. `None` for unrecognised
    /// values, which have no place on that scale.
    pub fn ordinal(self) -> Option<i32> {
        match self {
            Self::Unspecified => Some(-1000),
            Self::None => Some(0),
            Self::Min => Some(1),
            Self::Low => Some(2),
            Self::Default => Some(3),
            Self::High => Some(4),
            Self::Max => Some(5),
            Self::Unknown => None,
        }
    }
}

/// Point-in-time read of the installed applications.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySnapshot {
    pub apps: Vec<InstalledAppRecord>,
    pub fetched_at: DateTime<Utc>,
}

// Shapes returned by the native plugin. Field names follow the plugin's JSON.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeInstalledApp {
    pub package_name: String,
    pub app_name: String,
    pub icon: Option<String>,
    pub notifications_enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NativeNotificationChannel {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub importance: i32,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstalledAppsResponse {
    pub apps: Vec<NativeInstalledApp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelsResponse {
    pub channels: Vec<NativeNotificationChannel>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageArgs<'a> {
    pub package_name: &'a str,
}

impl From<NativeNotificationChannel> for NotificationChannelRecord {
    fn from(native: NativeNotificationChannel) -> Self {
        Self {
            channel_id: native.id,
            name: native.name,
            description: native.description.filter(|d| !d.trim().is_empty()),
            importance: native.importance,
            enabled: native.enabled,
        }
    }
}
