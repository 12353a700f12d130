use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::inventory::{IconSource, InstalledAppRecord, InventorySnapshot};

use super::mock_data::mock_apps;
use super::ToggleOutcome;

/// Where an entry's data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Provenance {
    Mock,
    Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    pub id: String,
    pub name: String,
    pub icon: IconSource,
    /// Local display state; for platform entries it starts as the OS snapshot.
    pub notifications_enabled: bool,
    pub provenance: Provenance,
}

impl From<InstalledAppRecord> for AppEntry {
    fn from(record: InstalledAppRecord) -> Self {
        Self {
            id: record.package_identifier,
            name: record.display_name,
            icon: record.icon,
            notifications_enabled: record.notifications_enabled,
            provenance: Provenance::Platform,
        }
    }
}

/// In-memory home list with optimistic toggles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppListStore {
    apps: Vec<AppEntry>,
    all_notifications_enabled: bool,
    fetched_at: Option<DateTime<Utc>>,
}

impl Default for AppListStore {
    fn default() -> Self {
        Self::mock()
    }
}

impl AppListStore {
    pub fn mock() -> Self {
        Self {
            apps: mock_apps(),
            all_notifications_enabled: true,
            fetched_at: None,
        }
    }

    /// Builds the list from an inventory read, falling back to mock data when
    /// the read came back empty.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Self {
        if snapshot.apps.is_empty() {
            return Self::mock();
        }

        Self {
            apps: snapshot.apps.into_iter().map(AppEntry::from).collect(),
            all_notifications_enabled: true,
            fetched_at: Some(snapshot.fetched_at),
        }
    }

    pub fn apps(&self) -> &[AppEntry] {
        &self.apps
    }

    pub fn entry(&self, id: &str) -> Option<&AppEntry> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn is_mock(&self) -> bool {
        self.fetched_at.is_none()
    }

    pub fn all_notifications_enabled(&self) -> bool {
        self.all_notifications_enabled
    }

    /// Local only: there is no platform API for bulk permission changes.
    pub fn toggle_all(&mut self, value: bool) {
        self.all_notifications_enabled = value;
        for app in &mut self.apps {
            app.notifications_enabled = value;
        }
    }

    /// Flips one mock entry. Platform entries are left alone and reported as
    /// a redirect, since only the OS settings surface can change them.
    pub fn toggle_one(&mut self, id: &str, value: bool) -> ToggleOutcome {
        let Some(app) = self.apps.iter_mut().find(|app| app.id == id) else {
            return ToggleOutcome::NotFound;
        };

        match app.provenance {
            Provenance::Platform => ToggleOutcome::RedirectedToSettings,
            Provenance::Mock => {
                app.notifications_enabled = value;
                ToggleOutcome::Applied
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str, name: &str, enabled: bool) -> InstalledAppRecord {
        InstalledAppRecord {
            package_identifier: id.to_string(),
            display_name: name.to_string(),
            icon: IconSource::placeholder(),
            notifications_enabled: enabled,
        }
    }

    #[test]
    fn mock_list_has_21_sorted_entries() {
        let store = AppListStore::mock();
        let names: Vec<_> = store.apps().iter().map(|a| a.name.as_str()).collect();

        assert_eq!(names.len(), 21);
        assert_eq!(names.first(), Some(&"Calendar"));
        assert_eq!(names.last(), Some(&"YouTube"));
        let mut sorted = names.clone();
        sorted.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names, sorted);
        assert!(store.is_mock());
        assert!(store.apps().iter().all(|a| !a.icon.is_image()));
    }

    #[test]
    fn toggle_all_then_toggle_one_on_mock_list() {
        let mut store = AppListStore::mock();

        store.toggle_all(false);
        assert!(!store.all_notifications_enabled());
        assert_eq!(
            store.apps().iter().filter(|a| !a.notifications_enabled).count(),
            21
        );

        assert_eq!(store.toggle_one("3", true), ToggleOutcome::Applied);
        let enabled: Vec<_> = store
            .apps()
            .iter()
            .filter(|a| a.notifications_enabled)
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(enabled, vec!["3"]);
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let mut store = AppListStore::mock();
        let before = store.apps().to_vec();

        assert_eq!(store.toggle_one("missing", false), ToggleOutcome::NotFound);
        assert_eq!(store.apps(), before.as_slice());
    }

    #[test]
    fn empty_snapshot_falls_back_to_mock() {
        let store = AppListStore::from_snapshot(InventorySnapshot {
            apps: Vec::new(),
            fetched_at: Utc::now(),
        });
        assert!(store.is_mock());
        assert_eq!(store.apps().len(), 21);
    }

    #[test]
    fn platform_entries_redirect_instead_of_flipping() {
        let mut store = AppListStore::from_snapshot(InventorySnapshot {
            apps: vec![record("com.slack", "Slack", true), record("com.zoom", "Zoom", false)],
            fetched_at: Utc::now(),
        });
        assert!(!store.is_mock());

        assert_eq!(
            store.toggle_one("com.slack", false),
            ToggleOutcome::RedirectedToSettings
        );
        assert!(store.entry("com.slack").unwrap().notifications_enabled);

        store.toggle_all(true);
        assert!(store.entry("com.zoom").unwrap().notifications_enabled);
    }
}
