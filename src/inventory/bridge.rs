use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use super::icon::IconSource;
use super::provider::{InventoryProvider, ProviderError};
use super::records::{
    InstalledAppRecord, InventorySnapshot, NativeInstalledApp, NativeNotificationChannel,
    NotificationChannelRecord,
};
use crate::{log_debug, log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Android,
    Ios,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Desktop
        }
    }

    /// Only Android exposes installed-app and channel enumeration.
    pub fn supports_inventory(self) -> bool {
        self == Self::Android
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Android => "android",
            Self::Ios => "ios",
            Self::Desktop => "desktop",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{operation} is only supported on Android (running on {platform})")]
    PlatformUnavailable {
        operation: &'static str,
        platform: Platform,
    },
    #[error("{operation} failed: {source}")]
    ProviderFailure {
        operation: &'static str,
        #[source]
        source: ProviderError,
    },
    #[error("package {0} was never returned by the inventory")]
    UnknownPackage(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingsLinkOutcome {
    Opened,
    Skipped,
}

/// Adapter between the presentation layer and the platform inventory.
///
/// Availability is decided once, at construction: a provider handed in on a
/// platform that cannot enumerate apps is dropped, and every call checks for
/// its presence before dispatching. The plain operations are fail-soft; the
/// `try_` variants expose the reason a call produced nothing.
#[derive(Clone)]
pub struct InventoryBridge {
    platform: Platform,
    provider: Option<Arc<dyn InventoryProvider>>,
    observed: Arc<Mutex<HashSet<String>>>,
}

impl InventoryBridge {
    pub fn new(platform: Platform, provider: Option<Arc<dyn InventoryProvider>>) -> Self {
        let provider = provider.filter(|_| platform.supports_inventory());
        match &provider {
            Some(p) => log_info!(
                "Inventory bridge ready on {} using {} provider",
                platform,
                p.provider_name()
            ),
            None => log_info!("Inventory bridge unavailable on {}", platform),
        }

        Self {
            platform,
            provider,
            observed: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn unavailable(platform: Platform) -> Self {
        Self::new(platform, None)
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn has_observed(&self, package_identifier: &str) -> bool {
        self.observed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(package_identifier)
    }

    pub async fn list_installed_apps(&self) -> Vec<InstalledAppRecord> {
        self.try_list_installed_apps().await.unwrap_or_else(|err| {
            log_soft_failure(&err);
            Vec::new()
        })
    }

    pub async fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            apps: self.list_installed_apps().await,
            fetched_at: Utc::now(),
        }
    }

    pub async fn try_list_installed_apps(&self) -> Result<Vec<InstalledAppRecord>, BridgeError> {
        let native = self
            .dispatch("getInstalledApps", |provider| provider.installed_apps())
            .await?;
        let raw_count = native.len();
        let apps = normalize_inventory(native);

        // Replaced, not extended: uninstalled packages drop out.
        *self.observed.lock().unwrap_or_else(PoisonError::into_inner) = apps
            .iter()
            .map(|app| app.package_identifier.clone())
            .collect();

        log_info!(
            "Retrieved installed apps: {} ({} raw records)",
            apps.len(),
            raw_count
        );
        Ok(apps)
    }

    pub async fn list_notification_channels(
        &self,
        package_identifier: &str,
    ) -> Vec<NotificationChannelRecord> {
        self.try_list_notification_channels(package_identifier)
            .await
            .unwrap_or_else(|err| {
                log_soft_failure(&err);
                Vec::new()
            })
    }

    pub async fn try_list_notification_channels(
        &self,
        package_identifier: &str,
    ) -> Result<Vec<NotificationChannelRecord>, BridgeError> {
        let operation = "getAppNotificationChannels";
        self.ensure_available(operation)?;
        self.ensure_observed(package_identifier)?;

        let package = package_identifier.to_string();
        let native = self
            .dispatch(operation, move |provider| {
                provider.notification_channels(&package)
            })
            .await?;
        let channels = normalize_channels(native);

        log_info!(
            "Retrieved notification channels for {}: {}",
            package_identifier,
            channels.len()
        );
        Ok(channels)
    }

    pub async fn open_notification_settings(&self, package_identifier: &str) -> SettingsLinkOutcome {
        match self.try_open_notification_settings(package_identifier).await {
            Ok(()) => SettingsLinkOutcome::Opened,
            Err(err) => {
                log_soft_failure(&err);
                SettingsLinkOutcome::Skipped
            }
        }
    }

    pub async fn try_open_notification_settings(
        &self,
        package_identifier: &str,
    ) -> Result<(), BridgeError> {
        let operation = "openAppNotificationSettings";
        self.ensure_available(operation)?;
        self.ensure_observed(package_identifier)?;

        let package = package_identifier.to_string();
        self.dispatch(operation, move |provider| {
            provider.open_notification_settings(&package)
        })
        .await?;

        log_info!("Opened notification settings for {}", package_identifier);
        Ok(())
    }

    fn ensure_available(&self, operation: &'static str) -> Result<(), BridgeError> {
        if self.provider.is_some() {
            Ok(())
        } else {
            Err(BridgeError::PlatformUnavailable {
                operation,
                platform: self.platform,
            })
        }
    }

    fn ensure_observed(&self, package_identifier: &str) -> Result<(), BridgeError> {
        if self.has_observed(package_identifier) {
            Ok(())
        } else {
            Err(BridgeError::UnknownPackage(package_identifier.to_string()))
        }
    }

    /// Runs one provider call on the blocking pool.
    async fn dispatch<T, F>(&self, operation: &'static str, call: F) -> Result<T, BridgeError>
    where
        T: Send + 'static,
        F: FnOnce(&dyn InventoryProvider) -> Result<T, ProviderError> + Send + 'static,
    {
        let Some(provider) = self.provider.clone() else {
            return Err(BridgeError::PlatformUnavailable {
                operation,
                platform: self.platform,
            });
        };

        log_debug!("Dispatching {} to {} provider", operation, provider.provider_name());
        let joined = tokio::task::spawn_blocking(move || call(provider.as_ref())).await;

        match joined {
            Ok(result) => result.map_err(|source| BridgeError::ProviderFailure { operation, source }),
            Err(join_err) => Err(BridgeError::ProviderFailure {
                operation,
                source: ProviderError::new(join_err.to_string()),
            }),
        }
    }
}

fn log_soft_failure(err: &BridgeError) {
    match err {
        BridgeError::PlatformUnavailable { .. } => log_debug!("{}", err),
        BridgeError::UnknownPackage(_) => log_warn!("{}", err),
        BridgeError::ProviderFailure { .. } => log_error!("Inventory provider error: {}", err),
    }
}

/// Drops records without an identifier, keeps the first record per
/// identifier and orders by display name, case-insensitive.
pub fn normalize_inventory(native: Vec<NativeInstalledApp>) -> Vec<InstalledAppRecord> {
    let mut seen = HashSet::new();
    let mut apps: Vec<InstalledAppRecord> = native
        .into_iter()
        .filter(|app| !app.package_name.trim().is_empty())
        .filter(|app| seen.insert(app.package_name.clone()))
        .map(|app| {
            let display_name = if app.app_name.trim().is_empty() {
                app.package_name.clone()
            } else {
                app.app_name
            };
            InstalledAppRecord {
                icon: IconSource::classify(app.icon.as_deref()),
                package_identifier: app.package_name,
                display_name,
                notifications_enabled: app.notifications_enabled,
            }
        })
        .collect();

    apps.sort_by_cached_key(|app| {
        (
            app.display_name.to_lowercase(),
            app.package_identifier.clone(),
        )
    });
    apps
}

pub fn normalize_channels(native: Vec<NativeNotificationChannel>) -> Vec<NotificationChannelRecord> {
    let mut seen = HashSet::new();
    native
        .into_iter()
        .filter(|channel| !channel.id.is_empty())
        .filter(|channel| seen.insert(channel.id.clone()))
        .map(NotificationChannelRecord::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::provider::fixture::{native_app, native_channel, FixtureProvider};
    use pretty_assertions::assert_eq;

    fn android_bridge(provider: Arc<FixtureProvider>) -> InventoryBridge {
        InventoryBridge::new(
            Platform::Android,
            Some(provider as Arc<dyn InventoryProvider>),
        )
    }

    fn names(apps: &[InstalledAppRecord]) -> Vec<&str> {
        apps.iter().map(|app| app.display_name.as_str()).collect()
    }

    #[tokio::test]
    async fn unsupported_platforms_return_empty_without_calling_provider() {
        for platform in [Platform::Desktop, Platform::Ios] {
            let provider = Arc::new(FixtureProvider::with_apps(vec![native_app(
                "com.slack",
                "Slack",
                true,
            )]));
            let bridge = InventoryBridge::new(
                platform,
                Some(provider.clone() as Arc<dyn InventoryProvider>),
            );

            assert!(!bridge.is_available());
            assert!(bridge.list_installed_apps().await.is_empty());
            assert!(bridge.list_notification_channels("com.slack").await.is_empty());
            assert_eq!(
                bridge.open_notification_settings("com.slack").await,
                SettingsLinkOutcome::Skipped
            );
            assert_eq!(provider.installed_call_count(), 0);
            assert_eq!(provider.channel_call_count(), 0);
            assert!(provider.opened_packages().is_empty());
        }
    }

    #[tokio::test]
    async fn inventory_is_sorted_case_insensitively_and_unique() {
        let provider = Arc::new(FixtureProvider::with_apps(vec![
            native_app("com.zoom", "zoom", true),
            native_app("com.whatsapp", "WhatsApp", true),
            native_app("com.android.camera", "camera", false),
            native_app("com.whatsapp", "WhatsApp (clone)", false),
            native_app("com.apple.maps", "Maps", true),
            native_app("", "Ghost", true),
        ]));
        let bridge = android_bridge(provider.clone());

        let apps = bridge.list_installed_apps().await;

        assert_eq!(names(&apps), vec!["camera", "Maps", "WhatsApp", "zoom"]);
        let ids: HashSet<_> = apps.iter().map(|a| a.package_identifier.as_str()).collect();
        assert_eq!(ids.len(), apps.len());
        assert!(apps.iter().any(|a| a.display_name == "WhatsApp" && a.notifications_enabled));
        assert_eq!(provider.installed_call_count(), 1);
    }

    #[tokio::test]
    async fn provider_failure_is_fail_soft() {
        let provider = Arc::new(FixtureProvider::failing());
        let bridge = android_bridge(provider.clone());

        assert!(bridge.list_installed_apps().await.is_empty());
        assert!(matches!(
            bridge.try_list_installed_apps().await,
            Err(BridgeError::ProviderFailure { .. })
        ));
        assert_eq!(provider.installed_call_count(), 2);
    }

    #[tokio::test]
    async fn unknown_package_channels_are_empty_without_provider_call() {
        let provider = Arc::new(
            FixtureProvider::with_apps(vec![native_app("com.slack", "Slack", true)])
                .channels_for("com.secret", vec![native_channel("dm", "Direct", true)]),
        );
        let bridge = android_bridge(provider.clone());
        bridge.list_installed_apps().await;

        assert!(bridge.list_notification_channels("com.secret").await.is_empty());
        assert!(matches!(
            bridge.try_list_notification_channels("com.secret").await,
            Err(BridgeError::UnknownPackage(id)) if id == "com.secret"
        ));
        assert_eq!(provider.channel_call_count(), 0);
    }

    #[tokio::test]
    async fn channels_for_observed_package_are_deduplicated() {
        let provider = Arc::new(
            FixtureProvider::with_apps(vec![native_app("com.slack", "Slack", true)]).channels_for(
                "com.slack",
                vec![
                    native_channel("dm", "Direct messages", true),
                    native_channel("mentions", "Mentions", false),
                    native_channel("dm", "Direct messages (dup)", false),
                ],
            ),
        );
        let bridge = android_bridge(provider.clone());
        bridge.list_installed_apps().await;

        let channels = bridge.list_notification_channels("com.slack").await;

        let ids: Vec<_> = channels.iter().map(|c| c.channel_id.as_str()).collect();
        assert_eq!(ids, vec!["dm", "mentions"]);
        assert_eq!(channels[0].name, "Direct messages");
        assert_eq!(provider.channel_call_count(), 1);
    }

    #[tokio::test]
    async fn open_settings_forwards_observed_package() {
        let provider = Arc::new(FixtureProvider::with_apps(vec![native_app(
            "com.slack", "Slack", true,
        )]));
        let bridge = android_bridge(provider.clone());

        assert_eq!(
            bridge.open_notification_settings("com.slack").await,
            SettingsLinkOutcome::Skipped
        );

        bridge.list_installed_apps().await;
        assert_eq!(
            bridge.open_notification_settings("com.slack").await,
            SettingsLinkOutcome::Opened
        );
        assert_eq!(provider.opened_packages(), vec!["com.slack".to_string()]);
    }

    #[tokio::test]
    async fn channel_query_failure_is_fail_soft() {
        let provider = Arc::new(
            FixtureProvider::with_apps(vec![native_app("com.slack", "Slack", true)])
                .channels_for("com.slack", vec![native_channel("dm", "Direct", true)])
                .failing_channels(),
        );
        let bridge = android_bridge(provider.clone());
        assert_eq!(bridge.list_installed_apps().await.len(), 1);

        assert!(bridge.list_notification_channels("com.slack").await.is_empty());
        assert!(matches!(
            bridge.try_list_notification_channels("com.slack").await,
            Err(BridgeError::ProviderFailure { operation: "getAppNotificationChannels", .. })
        ));
        assert_eq!(provider.channel_call_count(), 2);
    }

    #[tokio::test]
    async fn settings_link_failure_is_skipped() {
        let provider = Arc::new(
            FixtureProvider::with_apps(vec![native_app("com.slack", "Slack", true)])
                .failing_open(),
        );
        let bridge = android_bridge(provider.clone());
        bridge.list_installed_apps().await;

        assert_eq!(
            bridge.open_notification_settings("com.slack").await,
            SettingsLinkOutcome::Skipped
        );
        assert!(matches!(
            bridge.try_open_notification_settings("com.slack").await,
            Err(BridgeError::ProviderFailure { operation: "openAppNotificationSettings", .. })
        ));
        assert!(provider.opened_packages().is_empty());
    }

    #[tokio::test]
    async fn uninstalled_package_is_forgotten_after_next_listing() {
        let provider = Arc::new(FixtureProvider::with_apps(vec![
            native_app("com.slack", "Slack", true),
            native_app("com.zoom", "Zoom", true),
        ]));
        let bridge = android_bridge(provider.clone());
        bridge.list_installed_apps().await;
        assert!(bridge.has_observed("com.zoom"));

        provider.replace_apps(vec![native_app("com.slack", "Slack", true)]);
        bridge.list_installed_apps().await;

        assert!(bridge.has_observed("com.slack"));
        assert!(!bridge.has_observed("com.zoom"));
        assert!(bridge.list_notification_channels("com.zoom").await.is_empty());
        assert_eq!(provider.channel_call_count(), 0);
    }

    #[tokio::test]
    async fn failed_listing_keeps_previous_observations() {
        let provider = Arc::new(FixtureProvider::with_apps(vec![native_app(
            "com.slack", "Slack", true,
        )]));
        let bridge = android_bridge(provider.clone());
        bridge.list_installed_apps().await;

        let failing = InventoryBridge {
            provider: Some(Arc::new(FixtureProvider::failing()) as Arc<dyn InventoryProvider>),
            ..bridge.clone()
        };
        assert!(failing.list_installed_apps().await.is_empty());

        assert!(bridge.has_observed("com.slack"));
    }

    #[test]
    fn blank_app_name_falls_back_to_package() {
        let apps = normalize_inventory(vec![native_app("com.example.tool", "  ", true)]);
        assert_eq!(apps[0].display_name, "com.example.tool");
        assert_eq!(apps[0].icon, IconSource::placeholder());
    }

    #[test]
    fn equal_names_are_ordered_by_identifier() {
        let apps = normalize_inventory(vec![
            native_app("com.b", "Notes", true),
            native_app("com.a", "notes", true),
        ]);
        let ids: Vec<_> = apps.iter().map(|a| a.package_identifier.as_str()).collect();
        assert_eq!(ids, vec!["com.a", "com.b"]);
    }

    #[test]
    fn current_platform_matches_target() {
        let platform = Platform::current();
        assert_eq!(platform.supports_inventory(), cfg!(target_os = "android"));
    }
}
