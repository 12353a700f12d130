mod inventory;
mod screens;
mod settings;
mod utils;

use inventory::commands::{
    get_inventory_snapshot, get_inventory_status, icon_data_url, list_installed_apps,
    list_notification_channels, open_notification_settings,
};
use screens::{
    commands::{
        close_app_detail, get_detail_state, get_home_state, load_home, open_app_detail,
        toggle_all_notifications, toggle_app_notification, toggle_detail_setting,
    },
    ScreenController,
};
use settings::{SettingsStore, ThemeMode};
use tauri::{Manager, State};

pub(crate) struct AppState {
    pub(crate) screens: ScreenController,
    pub(crate) settings: SettingsStore,
}

#[tauri::command]
fn get_theme_mode(state: State<AppState>) -> ThemeMode {
    state.settings.theme_mode()
}

#[tauri::command]
fn set_theme_mode(mode: ThemeMode, state: State<AppState>) -> Result<ThemeMode, String> {
    log::info!("Setting theme mode to {:?}", mode);
    state
        .settings
        .set_theme_mode(mode)
        .map_err(|e| e.to_string())?;
    Ok(mode)
}

#[tauri::command]
fn toggle_theme_mode(state: State<AppState>) -> Result<ThemeMode, String> {
    let next = state.settings.theme_mode().toggled();
    log::info!("User toggled theme to {:?}", next);
    state
        .settings
        .set_theme_mode(next)
        .map_err(|e| e.to_string())?;
    Ok(next)
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("HUSH starting up...");

    tauri::Builder::default()
        .plugin(inventory::plugin::init())
        .setup(|app| {
            let result = (|| -> anyhow::Result<()> {
                let app_data_dir = app
                    .path()
                    .app_data_dir()
                    .map_err(|err| anyhow::anyhow!(err))?;
                std::fs::create_dir_all(&app_data_dir)?;

                let settings_path = app_data_dir.join("settings.json");
                let settings_store = SettingsStore::new(settings_path)?;
                log::info!("Loaded theme mode {:?}", settings_store.theme_mode());

                app.manage(AppState {
                    screens: ScreenController::from_env(),
                    settings: settings_store,
                });

                Ok(())
            })();

            result.map_err(|err| err.into())
        })
        .invoke_handler(tauri::generate_handler![
            get_inventory_status,
            list_installed_apps,
            get_inventory_snapshot,
            list_notification_channels,
            open_notification_settings,
            icon_data_url,
            load_home,
            get_home_state,
            toggle_all_notifications,
            toggle_app_notification,
            open_app_detail,
            close_app_detail,
            get_detail_state,
            toggle_detail_setting,
            get_theme_mode,
            set_theme_mode,
            toggle_theme_mode,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
