use tauri::State;

use crate::{inventory::InventoryBridge, AppState};

use super::{detail::DetailView, home::AppListStore, ToggleOutcome};

#[tauri::command]
pub async fn load_home(
    state: State<'_, AppState>,
    bridge: State<'_, InventoryBridge>,
) -> Result<AppListStore, String> {
    Ok(state.screens.load_home(&bridge).await)
}

#[tauri::command]
pub async fn get_home_state(state: State<'_, AppState>) -> Result<AppListStore, String> {
    Ok(state.screens.home().await)
}

#[tauri::command]
pub async fn toggle_all_notifications(
    state: State<'_, AppState>,
    enabled: bool,
) -> Result<AppListStore, String> {
    Ok(state.screens.toggle_all(enabled).await)
}

#[tauri::command]
pub async fn toggle_app_notification(
    state: State<'_, AppState>,
    bridge: State<'_, InventoryBridge>,
    app_id: String,
    enabled: bool,
) -> Result<ToggleOutcome, String> {
    Ok(state.screens.toggle_app(&bridge, &app_id, enabled).await)
}

#[tauri::command]
pub async fn open_app_detail(
    state: State<'_, AppState>,
    bridge: State<'_, InventoryBridge>,
    app_id: String,
) -> Result<DetailView, String> {
    state
        .screens
        .open_detail(&bridge, &app_id)
        .await
        .ok_or_else(|| format!("unknown app: {}", app_id))
}

#[tauri::command]
pub async fn close_app_detail(state: State<'_, AppState>) -> Result<(), String> {
    state.screens.close_detail().await;
    Ok(())
}

#[tauri::command]
pub async fn get_detail_state(state: State<'_, AppState>) -> Result<Option<DetailView>, String> {
    Ok(state.screens.detail().await)
}

#[tauri::command]
pub async fn toggle_detail_setting(
    state: State<'_, AppState>,
    bridge: State<'_, InventoryBridge>,
    setting_id: String,
    enabled: bool,
) -> Result<ToggleOutcome, String> {
    Ok(state
        .screens
        .toggle_detail_setting(&bridge, &setting_id, enabled)
        .await)
}
