use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::inventory::{ChannelImportance, IconSource, NotificationChannelRecord};

use super::mock_data::mock_settings;
use super::ToggleOutcome;

/// Shown for channels the platform reports without a description.
pub const CHANNEL_DESCRIPTION_PLACEHOLDER: &str = "No description available";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailMode {
    /// No real channel data; toggles are local.
    Mock,
    /// Channel data loaded; toggles open the OS settings surface.
    Real,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub enabled: bool,
    pub importance: Option<ChannelImportance>,
}

impl From<NotificationChannelRecord> for SettingEntry {
    fn from(channel: NotificationChannelRecord) -> Self {
        let importance = channel.importance_level();
        Self {
            id: channel.channel_id,
            title: channel.name,
            description: channel
                .description
                .unwrap_or_else(|| CHANNEL_DESCRIPTION_PLACEHOLDER.to_string()),
            enabled: channel.enabled,
            importance: Some(importance),
        }
    }
}

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailView {
    pub app_id: String,
    pub app_name: String,
    pub app_icon: IconSource,
    pub mode: DetailMode,
    pub read_only: bool,
    pub offer_settings_link: bool,
    pub settings: Vec<SettingEntry>,
}

/// State of one mounted detail screen.
#[derive(Debug)]
pub struct DetailScreen {
    app_id: String,
    app_name: String,
    app_icon: IconSource,
    mode: DetailMode,
    settings: Vec<SettingEntry>,
    mounted: CancellationToken,
}

impl DetailScreen {
    pub fn mount(app_id: String, app_name: String, app_icon: IconSource) -> Self {
        Self {
            app_id,
            app_name,
            app_icon,
            mode: DetailMode::Mock,
            settings: mock_settings(),
            mounted: CancellationToken::new(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn mode(&self) -> DetailMode {
        self.mode
    }

    pub fn settings(&self) -> &[SettingEntry] {
        &self.settings
    }

    /// Token cancelled when this screen goes away; in-flight fetches hold a clone.
    pub fn mount_token(&self) -> CancellationToken {
        self.mounted.clone()
    }

    pub fn unmount(&self) {
        self.mounted.cancel();
    }

    pub fn is_mounted(&self) -> bool {
        !self.mounted.is_cancelled()
    }

    /// Applies a channel fetch. A non-empty result moves the screen to
    /// `Real` (once; there is no way back). Empty results change nothing.
    /// Returns whether anything was applied.
    pub fn apply_channels(&mut self, channels: Vec<NotificationChannelRecord>) -> bool {
        if !self.is_mounted() || channels.is_empty() {
            return false;
        }

        self.settings = channels.into_iter().map(SettingEntry::from).collect();
        self.mode = DetailMode::Real;
        true
    }

    pub fn toggle(&mut self, setting_id: &str, value: bool) -> ToggleOutcome {
        let Some(setting) = self.settings.iter_mut().find(|s| s.id == setting_id) else {
            return ToggleOutcome::NotFound;
        };

        match self.mode {
            DetailMode::Real => ToggleOutcome::RedirectedToSettings,
            DetailMode::Mock => {
                setting.enabled = value;
                ToggleOutcome::Applied
            }
        }
    }

    pub fn view(&self) -> DetailView {
        DetailView {
            app_id: self.app_id.clone(),
            app_name: self.app_name.clone(),
            app_icon: self.app_icon.clone(),
            mode: self.mode,
            read_only: self.mode == DetailMode::Real,
            // Without channel data the user can still reach the OS screen.
            offer_settings_link: self.mode == DetailMode::Mock,
            settings: self.settings.clone(),
        }
    }
}
