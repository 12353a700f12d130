use serde::Serialize;
use tauri::State;

use super::{
    IconSource, InstalledAppRecord, InventoryBridge, InventorySnapshot, NotificationChannelRecord,
    Platform, SettingsLinkOutcome,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryStatus {
    pub platform: Platform,
    pub available: bool,
}

#[tauri::command]
pub fn get_inventory_status(bridge: State<'_, InventoryBridge>) -> InventoryStatus {
    InventoryStatus {
        platform: bridge.platform(),
        available: bridge.is_available(),
    }
}

#[tauri::command]
pub async fn list_installed_apps(
    bridge: State<'_, InventoryBridge>,
) -> Result<Vec<InstalledAppRecord>, String> {
    Ok(bridge.list_installed_apps().await)
}

#[tauri::command]
pub async fn get_inventory_snapshot(
    bridge: State<'_, InventoryBridge>,
) -> Result<InventorySnapshot, String> {
    Ok(bridge.snapshot().await)
}

#[tauri::command]
pub async fn list_notification_channels(
    bridge: State<'_, InventoryBridge>,
    package_name: String,
) -> Result<Vec<NotificationChannelRecord>, String> {
    Ok(bridge.list_notification_channels(&package_name).await)
}

#[tauri::command]
pub async fn open_notification_settings(
    bridge: State<'_, InventoryBridge>,
    package_name: String,
) -> Result<SettingsLinkOutcome, String> {
    Ok(bridge.open_notification_settings(&package_name).await)
}

/// Re-encodes an image icon as a `data:` URL with a sniffed mime type.
#[tauri::command]
pub fn icon_data_url(icon: IconSource) -> Result<String, String> {
    icon.decode()
        .map(|decoded| decoded.to_data_url())
        .map_err(|e| e.to_string())
}
