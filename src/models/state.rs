use serde::Serialize;

use super::preference::{SortKey, Theme};

// ---------------------------------------------------------------------------
// LoadStatus
// ---------------------------------------------------------------------------

/// Where the manager is in its dataset lifecycle.
///
/// `Refreshing` keeps serving the previous dataset until the new one lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Uninitialized,
    Loading,
    Ready,
    Refreshing,
}

impl LoadStatus {
    /// True while at least one fetch is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(self, LoadStatus::Loading | LoadStatus::Refreshing)
    }
}

// ---------------------------------------------------------------------------
// SelectOutcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Added,
    AlreadySelected,
}

// ---------------------------------------------------------------------------
// StateEvent — Notifications for the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    StatusChanged(LoadStatus),
    DatasetReplaced { count: usize },
    SelectionChanged,
    FavoritesChanged,
    SortChanged(SortKey),
    ThemeChanged(Theme),
    FetchFailed(String),
    /// A user-facing message, e.g. a rejected selection.
    Notice(String),
}
