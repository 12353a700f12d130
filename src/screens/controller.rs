use std::sync::Arc;

use log::{debug, info};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::inventory::{InventoryBridge, NotificationChannelRecord};

use super::detail::{DetailScreen, DetailView};
use super::home::AppListStore;
use super::ToggleOutcome;

/// Set to `1`/`true` to keep the home screen on mock data.
pub const FORCE_MOCK_ENV: &str = "HUSH_FORCE_MOCK";

/// Handle for one in-flight channel fetch.
#[derive(Debug, Clone)]
pub struct DetailTicket {
    pub app_id: String,
    token: CancellationToken,
}

impl DetailTicket {
    pub fn is_stale(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Owns the home list and the mounted detail screen.
///
/// Locks are never held across a bridge call. Fetch results for a detail
/// screen are applied only while the screen that requested them is still
/// mounted.
#[derive(Clone)]
pub struct ScreenController {
    home: Arc<Mutex<AppListStore>>,
    detail: Arc<Mutex<Option<DetailScreen>>>,
    force_mock: bool,
}

impl ScreenController {
    pub fn new(force_mock: bool) -> Self {
        Self {
            home: Arc::new(Mutex::new(AppListStore::mock())),
            detail: Arc::new(Mutex::new(None)),
            force_mock,
        }
    }

    pub fn from_env() -> Self {
        let force_mock = std::env::var(FORCE_MOCK_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if force_mock {
            info!("{} set; home screen will show mock data", FORCE_MOCK_ENV);
        }
        Self::new(force_mock)
    }

    pub async fn load_home(&self, bridge: &InventoryBridge) -> AppListStore {
        let store = if self.force_mock {
            AppListStore::mock()
        } else {
            AppListStore::from_snapshot(bridge.snapshot().await)
        };
        info!(
            "Home list loaded: {} apps ({})",
            store.apps().len(),
            if store.is_mock() { "mock" } else { "platform" }
        );

        let mut home = self.home.lock().await;
        *home = store;
        home.clone()
    }

    pub async fn home(&self) -> AppListStore {
        self.home.lock().await.clone()
    }

    pub async fn toggle_all(&self, value: bool) -> AppListStore {
        info!("User toggled all notifications: {}", value);
        let mut home = self.home.lock().await;
        home.toggle_all(value);
        home.clone()
    }

    pub async fn toggle_app(
        &self,
        bridge: &InventoryBridge,
        app_id: &str,
        value: bool,
    ) -> ToggleOutcome {
        let outcome = self.home.lock().await.toggle_one(app_id, value);
        debug!("Toggle for app {} -> {}: {:?}", app_id, value, outcome);

        if outcome == ToggleOutcome::RedirectedToSettings {
            bridge.open_notification_settings(app_id).await;
        }
        outcome
    }

    /// Mounts the detail screen for a home entry and fetches its channels.
    /// Returns `None` if the id is not on the home list.
    pub async fn open_detail(&self, bridge: &InventoryBridge, app_id: &str) -> Option<DetailView> {
        let ticket = self.mount_detail(app_id).await?;
        let channels = bridge.list_notification_channels(&ticket.app_id).await;
        self.complete_detail_fetch(&ticket, channels).await;
        self.detail().await
    }

    /// Replaces any mounted detail screen with a fresh one in mock mode.
    pub async fn mount_detail(&self, app_id: &str) -> Option<DetailTicket> {
        let entry = self.home.lock().await.entry(app_id).cloned()?;

        let screen = DetailScreen::mount(entry.id, entry.name, entry.icon);
        let ticket = DetailTicket {
            app_id: screen.app_id().to_string(),
            token: screen.mount_token(),
        };

        let mut detail = self.detail.lock().await;
        if let Some(previous) = detail.replace(screen) {
            previous.unmount();
        }
        info!("Detail screen mounted for {}", app_id);
        Some(ticket)
    }

    /// Returns whether the fetch result was applied.
    pub async fn complete_detail_fetch(
        &self,
        ticket: &DetailTicket,
        channels: Vec<NotificationChannelRecord>,
    ) -> bool {
        // Tokens are only cancelled while this lock is held.
        let mut detail = self.detail.lock().await;
        if ticket.is_stale() {
            debug!("Discarding channel fetch for unmounted screen {}", ticket.app_id);
            return false;
        }
        match detail.as_mut() {
            Some(screen) if screen.app_id() == ticket.app_id && screen.is_mounted() => {
                screen.apply_channels(channels)
            }
            _ => false,
        }
    }

    pub async fn close_detail(&self) {
        if let Some(screen) = self.detail.lock().await.take() {
            screen.unmount();
            info!("Detail screen closed for {}", screen.app_id());
        }
    }

    pub async fn detail(&self) -> Option<DetailView> {
        self.detail.lock().await.as_ref().map(DetailScreen::view)
    }

    pub async fn toggle_detail_setting(
        &self,
        bridge: &InventoryBridge,
        setting_id: &str,
        value: bool,
    ) -> ToggleOutcome {
        let (app_id, outcome) = {
            let mut detail = self.detail.lock().await;
            let Some(screen) = detail.as_mut() else {
                return ToggleOutcome::NotFound;
            };
            (screen.app_id().to_string(), screen.toggle(setting_id, value))
        };
        debug!(
            "Toggle for setting {} of {} -> {}: {:?}",
            setting_id, app_id, value, outcome
        );

        if outcome == ToggleOutcome::RedirectedToSettings {
            bridge.open_notification_settings(&app_id).await;
        }
        outcome
    }
}
