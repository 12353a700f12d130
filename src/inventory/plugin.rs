//! Tauri plugin that owns the [`InventoryBridge`].
//!
//! On Android the setup hook registers the native `InstalledAppsPlugin` class
//! and wraps its handle in a provider. Everywhere else, or when registration
//! fails, the bridge is managed without a provider and every call returns
//! empty / no-op.

use tauri::{
    plugin::{Builder, PluginApi, TauriPlugin},
    Manager, Runtime,
};

use super::bridge::{InventoryBridge, Platform};

pub const PLUGIN_NAME: &str = "installed-apps";

#[cfg(target_os = "android")]
const ANDROID_PLUGIN_PACKAGE: &str = "com.hush.installedapps";
#[cfg(target_os = "android")]
const ANDROID_PLUGIN_CLASS: &str = "InstalledAppsPlugin";

pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new(PLUGIN_NAME)
        .setup(|app, api| {
            let bridge = build_bridge(&api);
            app.manage(bridge);
            Ok(())
        })
        .build()
}

#[cfg(target_os = "android")]
fn build_bridge<R: Runtime>(api: &PluginApi<R, ()>) -> InventoryBridge {
    use std::sync::Arc;

    use super::provider::{InventoryProvider, MobilePluginProvider};

    match api.register_android_plugin(ANDROID_PLUGIN_PACKAGE, ANDROID_PLUGIN_CLASS) {
        Ok(handle) => {
            let provider: Arc<dyn InventoryProvider> = Arc::new(MobilePluginProvider::new(handle));
            InventoryBridge::new(Platform::Android, Some(provider))
        }
        Err(e) => {
            log::error!(
                "Failed to register {}.{}: {}",
                ANDROID_PLUGIN_PACKAGE,
                ANDROID_PLUGIN_CLASS,
                e
            );
            InventoryBridge::unavailable(Platform::Android)
        }
    }
}

#[cfg(not(target_os = "android"))]
fn build_bridge<R: Runtime>(_api: &PluginApi<R, ()>) -> InventoryBridge {
    InventoryBridge::unavailable(Platform::current())
}
