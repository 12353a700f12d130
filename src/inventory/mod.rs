pub mod bridge;
pub mod commands;
pub mod icon;
pub mod plugin;
pub mod provider;
pub mod records;

pub use bridge::{InventoryBridge, Platform, SettingsLinkOutcome};
pub use icon::IconSource;
pub use records::{ChannelImportance, InstalledAppRecord, InventorySnapshot, NotificationChannelRecord};
