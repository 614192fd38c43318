//! Mutable holder of the user's current selection.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use chrono_tz::Tz;
use signalscope_core::{FilterSelection, Granularity, ScopeError, day_bounds};

/// Current filter choices, exposed to the orchestrator as immutable snapshots.
///
/// Every setter replaces the snapshot wholesale; a snapshot already handed out
/// via [`snapshot`](Self::snapshot) never changes. Setters never trigger a fetch.
/// Fallible setters leave the state untouched on error.
#[derive(Debug, Clone)]
pub struct FilterState {
    available: BTreeSet<String>,
    start: NaiveDate,
    end: NaiveDate,
    tz: Tz,
    current: Arc<FilterSelection>,
}

impl FilterState {
    /// Start with no symbols, all models, daily buckets, and `[start, end]` in UTC.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ScopeError> {
        let tz = Tz::UTC;
        let current = FilterSelection::from_local_dates(
            std::iter::empty::<&str>(),
            None,
            start,
            end,
            tz,
            Granularity::default(),
        )?;
        Ok(Self {
            available: BTreeSet::new(),
            start,
            end,
            tz,
            current: Arc::new(current),
        })
    }

    /// Shared handle to the current selection.
    #[must_use]
    pub fn snapshot(&self) -> Arc<FilterSelection> {
        Arc::clone(&self.current)
    }

    /// Borrow the current selection.
    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.current
    }

    /// True when the current selection can be fetched.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.current.is_empty()
    }

    /// Symbols that `select_all` selects.
    #[must_use]
    pub const fn available_symbols(&self) -> &BTreeSet<String> {
        &self.available
    }

    /// Selected local dates, inclusive.
    #[must_use]
    pub const fn date_range(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    /// Time zone the dates are expanded in.
    #[must_use]
    pub const fn time_zone(&self) -> Tz {
        self.tz
    }

    /// Replace the symbol universe, usually with the result of `Scope::list_symbols`.
    ///
    /// Already selected symbols stay selected even if absent from the new universe.
    pub fn set_available_symbols<I, S>(&mut self, symbols: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.available = symbols
            .into_iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    /// Select every symbol of the universe.
    pub fn select_all(&mut self) {
        let all = self.available.clone();
        self.replace_symbols(all);
    }

    /// Deselect every symbol.
    pub fn clear_all(&mut self) {
        self.replace_symbols(BTreeSet::new());
    }

    /// Add one symbol. Returns `false` if it was already selected.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a blank symbol.
    pub fn add_symbol(&mut self, symbol: &str) -> Result<bool, ScopeError> {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(ScopeError::InvalidArg("symbol must not be blank".into()));
        }
        let mut symbols = self.current.symbols().clone();
        let added = symbols.insert(symbol.to_string());
        if added {
            self.replace_symbols(symbols);
        }
        Ok(added)
    }

    /// Remove one symbol. Returns `false` if it was not selected.
    pub fn remove_symbol(&mut self, symbol: &str) -> bool {
        let mut symbols = self.current.symbols().clone();
        let removed = symbols.remove(symbol.trim());
        if removed {
            self.replace_symbols(symbols);
        }
        removed
    }

    /// Flip one symbol's selection. Returns whether it is selected afterwards.
    ///
    /// # Errors
    /// Returns `InvalidArg` for a blank symbol.
    pub fn toggle_symbol(&mut self, symbol: &str) -> Result<bool, ScopeError> {
        if self.remove_symbol(symbol) {
            Ok(false)
        } else {
            self.add_symbol(symbol)
        }
    }

    /// Choose a model; `None` or a blank name means all models.
    pub fn set_model(&mut self, model: Option<&str>) {
        let next = self.selection().clone().with_model(model);
        self.current = Arc::new(next);
    }

    /// Set the inclusive local date range.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start > end`.
    pub fn set_date_range(&mut self, start: NaiveDate, end: NaiveDate) -> Result<(), ScopeError> {
        self.expand(start, end, self.tz)
    }

    /// Change the time zone used for day boundaries and re-expand the dates.
    ///
    /// # Errors
    /// Returns `InvalidArg` if a day boundary cannot be represented in `tz`.
    pub fn set_time_zone(&mut self, tz: Tz) -> Result<(), ScopeError> {
        self.expand(self.start, self.end, tz)
    }

    /// Choose the volume bucket width.
    pub fn set_granularity(&mut self, granularity: Granularity) {
        let next = self.selection().clone().with_granularity(granularity);
        self.current = Arc::new(next);
    }

    fn expand(&mut self, start: NaiveDate, end: NaiveDate, tz: Tz) -> Result<(), ScopeError> {
        let (from, to) = day_bounds(start, end, tz)?;
        let next = self.selection().clone().with_range(from, to)?;
        self.start = start;
        self.end = end;
        self.tz = tz;
        self.current = Arc::new(next);
        Ok(())
    }

    fn replace_symbols(&mut self, symbols: BTreeSet<String>) {
        let current = self.selection().clone();
        // Symbols here are already trimmed and non-blank.
        if let Ok(next) = current.with_symbols(&symbols) {
            self.current = Arc::new(next);
        }
    }
}
