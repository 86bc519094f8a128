//! Selection and preference state.
//!
//! [`PreferenceManager`] owns the latest dataset together with the user's
//! comparison selection, favorites, sort key and theme. Preferences are
//! written through to a [`Store`] on every change and restored from it at
//! startup. Presentation code reads the derived views and subscribes to
//! [`StateEvent`]s instead of reaching into the manager's fields.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::{self, MAX_SELECTION};
use crate::error::{CoinwatchError, Result};
use crate::models::{
    AssetRecord, LoadStatus, SelectOutcome, SelectedAsset, SortKey, StateEvent, Theme,
};
use crate::store::Store;
use crate::views::{self, ChartSeries};

/// Callback invoked for every state change.
pub type Listener = Box<dyn FnMut(&StateEvent) + Send>;

/// Handle returned by [`PreferenceManager::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct PreferenceManager {
    store: Box<dyn Store>,
    dataset: Arc<[AssetRecord]>,
    loaded: bool,
    in_flight: usize,
    selection: Vec<SelectedAsset>,
    favorites: Vec<String>,
    sort_key: SortKey,
    theme: Theme,
    last_error: Option<String>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl PreferenceManager {
    /// Build a manager from whatever `store` holds.
    ///
    /// Absent keys take their defaults. A stored value that cannot be parsed
    /// is logged and replaced by the default for that key; restoring never
    /// fails.
    pub fn restore(store: Box<dyn Store>) -> Self {
        let selection = restore_value(store.as_ref(), config::SELECTION_KEY, |raw| {
            Ok(serde_json::from_str::<Vec<SelectedAsset>>(raw)?)
        })
        .map(normalize_selection)
        .unwrap_or_default();

        let favorites = restore_value(store.as_ref(), config::FAVORITES_KEY, |raw| {
            Ok(serde_json::from_str::<Vec<String>>(raw)?)
        })
        .map(dedup_ids)
        .unwrap_or_default();

        let sort_key: SortKey =
            restore_value(store.as_ref(), config::SORT_KEY, |raw| raw.trim().parse())
                .unwrap_or_default();

        let theme: Theme =
            restore_value(store.as_ref(), config::THEME_KEY, |raw| raw.trim().parse())
                .unwrap_or_default();

        debug!(
            selected = selection.len(),
            favorites = favorites.len(),
            sort = %sort_key,
            theme = %theme,
            "Restored preferences"
        );

        Self {
            store,
            dataset: Arc::from(Vec::new()),
            loaded: false,
            in_flight: 0,
            selection,
            favorites,
            sort_key,
            theme,
            last_error: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    // -- Dataset lifecycle -------------------------------------------------

    /// Mark a dataset fetch as started.
    ///
    /// Commands stay available while the fetch is outstanding and apply to
    /// the dataset currently held.
    pub fn begin_fetch(&mut self) {
        self.in_flight += 1;
        self.emit(StateEvent::StatusChanged(self.status()));
    }

    /// Apply the outcome of a fetch started with [`begin_fetch`](Self::begin_fetch).
    ///
    /// A successful result replaces the dataset unconditionally, even if a
    /// later fetch already landed. A failure keeps the previous dataset,
    /// records the message in [`last_error`](Self::last_error) and is
    /// returned to the caller.
    pub fn finish_fetch(&mut self, result: Result<Vec<AssetRecord>>) -> Result<Arc<[AssetRecord]>> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(records) => {
                let count = records.len();
                self.dataset = Arc::from(records);
                self.loaded = true;
                self.last_error = None;
                info!(count, "Dataset replaced");
                self.emit(StateEvent::DatasetReplaced { count });
                self.emit(StateEvent::StatusChanged(self.status()));
                Ok(Arc::clone(&self.dataset))
            }
            Err(e) => {
                warn!(error = %e, "Market data fetch failed; keeping previous dataset");
                self.record_fetch_failure(&e);
                self.emit(StateEvent::StatusChanged(self.status()));
                Err(e)
            }
        }
    }

    /// Apply the result of an `ids`-filtered fetch for the selected assets.
    ///
    /// Stored names and symbols of selected entries are brought up to date,
    /// and the fresh records are returned in selection order. The main
    /// dataset is left alone.
    pub fn apply_comparison_refresh(
        &mut self,
        result: Result<Vec<AssetRecord>>,
    ) -> Result<Vec<AssetRecord>> {
        let mut records = match result {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Comparison refresh failed");
                self.record_fetch_failure(&e);
                return Err(e);
            }
        };

        let mut renamed = false;
        for entry in &mut self.selection {
            if let Some(fresh) = records.iter().find(|r| r.id == entry.id) {
                if entry.name != fresh.name || entry.symbol != fresh.symbol {
                    entry.name = fresh.name.clone();
                    entry.symbol = fresh.symbol.clone();
                    renamed = true;
                }
            }
        }

        let ordered: Vec<AssetRecord> = self
            .selection
            .iter()
            .filter_map(|s| {
                records
                    .iter()
                    .position(|r| r.id == s.id)
                    .map(|i| records.swap_remove(i))
            })
            .collect();

        self.last_error = None;
        if renamed {
            self.persist_selection();
            self.emit(StateEvent::SelectionChanged);
        }
        Ok(ordered)
    }

    fn record_fetch_failure(&mut self, e: &CoinwatchError) {
        let message = e.to_string();
        self.last_error = Some(message.clone());
        self.emit(StateEvent::FetchFailed(message));
    }

    // -- Commands ----------------------------------------------------------

    /// Add `id` to the comparison selection.
    ///
    /// Selecting an id twice is a no-op. Once [`MAX_SELECTION`] assets are
    /// selected, further ids are rejected with
    /// [`CoinwatchError::SelectionLimitExceeded`] and a [`StateEvent::Notice`]
    /// is emitted; the selection is left unchanged.
    pub fn select_for_comparison(&mut self, id: &str) -> Result<SelectOutcome> {
        if self.is_selected(id) {
            return Ok(SelectOutcome::AlreadySelected);
        }
        if self.selection.len() >= MAX_SELECTION {
            let err = CoinwatchError::SelectionLimitExceeded {
                limit: MAX_SELECTION,
            };
            self.emit(StateEvent::Notice(err.to_string()));
            return Err(err);
        }

        let entry = self
            .dataset
            .iter()
            .find(|r| r.id == id)
            .map(SelectedAsset::from)
            .unwrap_or_else(|| SelectedAsset {
                id: id.to_string(),
                name: String::new(),
                symbol: String::new(),
            });
        self.selection.push(entry);
        self.persist_selection();
        self.emit(StateEvent::SelectionChanged);
        Ok(SelectOutcome::Added)
    }

    /// Remove `id` from the comparison selection. Returns whether it was
    /// selected.
    pub fn deselect(&mut self, id: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|s| s.id != id);
        let removed = self.selection.len() < before;
        self.persist_selection();
        if removed {
            self.emit(StateEvent::SelectionChanged);
        }
        removed
    }

    /// Flip favorite membership of `id`. Returns the new membership.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = match self.favorites.iter().position(|f| f == id) {
            Some(pos) => {
                self.favorites.remove(pos);
                false
            }
            None => {
                self.favorites.push(id.to_string());
                true
            }
        };
        self.persist_favorites();
        self.emit(StateEvent::FavoritesChanged);
        now_favorite
    }

    /// Set the sort key from its string form (`name`, `price`,
    /// `24h_change`, `market_cap`).
    pub fn set_sort_preference(&mut self, key: &str) -> Result<()> {
        let key: SortKey = key.parse()?;
        self.set_sort_key(key);
        Ok(())
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.write(config::SORT_KEY, key.as_str());
        self.emit(StateEvent::SortChanged(key));
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.write(config::THEME_KEY, theme.as_str());
        self.emit(StateEvent::ThemeChanged(theme));
    }

    /// Switch between light and dark. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.theme.toggled();
        self.set_theme(theme);
        theme
    }

    // -- Views -------------------------------------------------------------

    /// The dataset ordered by the current sort key.
    pub fn sorted_view(&self) -> Vec<&AssetRecord> {
        views::sorted(&self.dataset, self.sort_key)
    }

    /// Selected records, in the order they were selected.
    pub fn comparison_view(&self) -> Vec<&AssetRecord> {
        views::comparison(&self.dataset, &self.selection)
    }

    /// Favorite records present in the current dataset.
    pub fn favorites_view(&self) -> Vec<&AssetRecord> {
        views::favorites(&self.dataset, &self.favorites)
    }

    /// Price chart for the comparison selection.
    pub fn comparison_chart(&self) -> ChartSeries {
        ChartSeries::prices(&self.comparison_view())
    }

    // -- Accessors ---------------------------------------------------------

    pub fn dataset(&self) -> Arc<[AssetRecord]> {
        Arc::clone(&self.dataset)
    }

    pub fn selection(&self) -> &[SelectedAsset] {
        &self.selection
    }

    pub fn selection_ids(&self) -> Vec<String> {
        self.selection.iter().map(|s| s.id.clone()).collect()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.iter().any(|s| s.id == id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|f| f == id)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> LoadStatus {
        match (self.loaded, self.in_flight > 0) {
            (false, false) => LoadStatus::Uninitialized,
            (false, true) => LoadStatus::Loading,
            (true, false) => LoadStatus::Ready,
            (true, true) => LoadStatus::Refreshing,
        }
    }

    /// Message from the most recent failed fetch, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    // -- Notifications -----------------------------------------------------

    /// Register a callback for every subsequent [`StateEvent`].
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StateEvent) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a callback. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() < before
    }

    fn emit(&mut self, event: StateEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    // -- Persistence -------------------------------------------------------

    fn persist_selection(&mut self) {
        match serde_json::to_string(&self.selection) {
            Ok(json) => self.write(config::SELECTION_KEY, &json),
            Err(e) => warn!(error = %e, "Could not encode selection"),
        }
    }

    fn persist_favorites(&mut self) {
        match serde_json::to_string(&self.favorites) {
            Ok(json) => self.write(config::FAVORITES_KEY, &json),
            Err(e) => warn!(error = %e, "Could not encode favorites"),
        }
    }

    /// Best-effort write: failures are logged, never surfaced.
    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "Failed to persist preference");
        }
    }
}

/// Read and parse one stored value, falling back to `None` on any problem.
fn restore_value<T>(
    store: &dyn Store,
    key: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Option<T> {
    let parsed = match store.get(key) {
        Ok(None) => return None,
        Ok(Some(raw)) => parse(&raw),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            let err = CoinwatchError::PersistenceRead {
                key: key.to_string(),
                message: e.to_string(),
            };
            warn!(error = %err, "Using default instead");
            None
        }
    }
}

fn normalize_selection(entries: Vec<SelectedAsset>) -> Vec<SelectedAsset> {
    let mut selection: Vec<SelectedAsset> = Vec::with_capacity(MAX_SELECTION);
    for entry in entries {
        if selection.iter().any(|s| s.id == entry.id) {
            continue;
        }
        if selection.len() == MAX_SELECTION {
            warn!(limit = MAX_SELECTION, "Stored selection too long; truncating");
            break;
        }
        selection.push(entry);
    }
    selection
}

fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
