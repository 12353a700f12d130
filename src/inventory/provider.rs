use thiserror::Error;

use super::records::{NativeInstalledApp, NativeNotificationChannel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// OS-level capability that can enumerate installed applications and their
/// notification channels. Calls may block on the platform; the bridge runs
/// them off the async executor.
pub trait InventoryProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;
    fn installed_apps(&self) -> Result<Vec<NativeInstalledApp>, ProviderError>;
    fn notification_channels(
        &self,
        package_name: &str,
    ) -> Result<Vec<NativeNotificationChannel>, ProviderError>;
    fn open_notification_settings(&self, package_name: &str) -> Result<(), ProviderError>;
}

#[cfg(target_os = "android")]
pub use android::MobilePluginProvider;

#[cfg(target_os = "android")]
mod android {
    use tauri::{plugin::PluginHandle, Runtime};

    use super::{InventoryProvider, ProviderError};
    use crate::inventory::records::{
        ChannelsResponse, InstalledAppsResponse, NativeInstalledApp, NativeNotificationChannel,
        PackageArgs,
    };

    /// Forwards to the `InstalledAppsPlugin` class registered by the Android project.
    pub struct MobilePluginProvider<R: Runtime> {
        handle: PluginHandle<R>,
    }

    impl<R: Runtime> MobilePluginProvider<R> {
        pub fn new(handle: PluginHandle<R>) -> Self {
            Self { handle }
        }
    }

    impl<R: Runtime> InventoryProvider for MobilePluginProvider<R> {
        fn provider_name(&self) -> &'static str {
            "android"
        }

        fn installed_apps(&self) -> Result<Vec<NativeInstalledApp>, ProviderError> {
            self.handle
                .run_mobile_plugin::<InstalledAppsResponse>("getInstalledApps", ())
                .map(|response| response.apps)
                .map_err(|e| ProviderError::new(e.to_string()))
        }

        fn notification_channels(
            &self,
            package_name: &str,
        ) -> Result<Vec<NativeNotificationChannel>, ProviderError> {
            self.handle
                .run_mobile_plugin::<ChannelsResponse>(
                    "getAppNotificationChannels",
                    PackageArgs { package_name },
                )
                .map(|response| response.channels)
                .map_err(|e| ProviderError::new(e.to_string()))
        }

        fn open_notification_settings(&self, package_name: &str) -> Result<(), ProviderError> {
            self.handle
                .run_mobile_plugin::<serde_json::Value>(
                    "openAppNotificationSettings",
                    PackageArgs { package_name },
                )
                .map(|_| ())
                .map_err(|e| ProviderError::new(e.to_string()))
        }
    }
}
