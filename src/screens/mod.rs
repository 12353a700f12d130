pub mod commands;
pub mod controller;
pub mod detail;
pub mod home;
pub mod mock_data;

use serde::Serialize;

pub use controller::ScreenController;

/// Result of a user toggle on either screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleOutcome {
    /// Local display state changed.
    Applied,
    /// Local state untouched; the OS settings surface was requested instead.
    RedirectedToSettings,
    NotFound,
}
