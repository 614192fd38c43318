//! Immutable filter snapshot consumed by the orchestrator.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ScopeError;
use crate::model::Granularity;

/// What the user selected: symbols, optional model, inclusive time range, and
/// bucket granularity.
///
/// Values are immutable; every `with_*` method returns a new snapshot and the
/// fallible ones re-check the invariants (`from <= to`, no blank symbols).
/// An empty symbol set is representable but cannot be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    symbols: BTreeSet<String>,
    model: Option<String>,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    granularity: Granularity,
}

impl FilterSelection {
    /// Build a validated selection.
    ///
    /// Symbols and the model are trimmed; a blank model means "all models".
    ///
    /// # Errors
    /// Returns `InvalidArg` if `from > to` or any symbol is blank.
    pub fn try_new<I, S>(
        symbols: I,
        model: Option<&str>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        granularity: Granularity,
    ) -> Result<Self, ScopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_range(from, to)?;
        Ok(Self {
            symbols: collect_symbols(symbols)?,
            model: clean_model(model),
            from,
            to,
            granularity,
        })
    }

    /// Build a selection from local calendar dates, expanded to whole days in `tz`.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `start > end`, a symbol is blank, or the dates
    /// fall outside the representable range.
    pub fn from_local_dates<I, S>(
        symbols: I,
        model: Option<&str>,
        start: NaiveDate,
        end: NaiveDate,
        tz: Tz,
        granularity: Granularity,
    ) -> Result<Self, ScopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (from, to) = day_bounds(start, end, tz)?;
        Self::try_new(symbols, model, from, to, granularity)
    }

    /// Selected symbols in ascending order.
    #[must_use]
    pub const fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    /// Selected model, or `None` for all models.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Inclusive start instant.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Inclusive end instant.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Bucket granularity for volume summaries.
    #[must_use]
    pub const fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// True when no symbol is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Replace the symbol set.
    ///
    /// # Errors
    /// Returns `InvalidArg` if any symbol is blank.
    pub fn with_symbols<I, S>(self, symbols: I) -> Result<Self, ScopeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            symbols: collect_symbols(symbols)?,
            ..self
        })
    }

    /// Replace the model filter.
    #[must_use]
    pub fn with_model(self, model: Option<&str>) -> Self {
        Self {
            model: clean_model(model),
            ..self
        }
    }

    /// Replace the time range.
    ///
    /// # Errors
    /// Returns `InvalidArg` if `from > to`.
    pub fn with_range(self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, ScopeError> {
        check_range(from, to)?;
        Ok(Self { from, to, ..self })
    }

    /// Replace the granularity.
    #[must_use]
    pub fn with_granularity(self, granularity: Granularity) -> Self {
        Self {
            granularity,
            ..self
        }
    }
}

/// Expand local dates `[start, end]` in `tz` to UTC instants covering both days fully.
///
/// The start is the first instant of `start` in `tz`; the end is one millisecond
/// before the first instant of the day after `end`.
///
/// # Errors
/// Returns `InvalidArg` if `start > end` or a boundary cannot be represented.
pub fn day_bounds(
    start: NaiveDate,
    end: NaiveDate,
    tz: Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>), ScopeError> {
    if start > end {
        return Err(ScopeError::InvalidArg(format!(
            "start date {start} is after end date {end}"
        )));
    }
    let next = end
        .succ_opt()
        .ok_or_else(|| ScopeError::InvalidArg(format!("end date out of range: {end}")))?;
    let from = start_of_day(start, tz)?;
    let to = start_of_day(next, tz)? - Duration::milliseconds(1);
    Ok((from, to))
}

/// First existing local instant of `date` in `tz`, converted to UTC.
///
/// Midnight may not exist on DST transition days; in that case the earliest
/// valid hour of the day is used.
fn start_of_day(date: NaiveDate, tz: Tz) -> Result<DateTime<Utc>, ScopeError> {
    for hour in 0..24 {
        let Some(naive) = date.and_hms_opt(hour, 0, 0) else {
            break;
        };
        if let Some(local) = tz.from_local_datetime(&naive).earliest() {
            return Ok(local.with_timezone(&Utc));
        }
    }
    Err(ScopeError::InvalidArg(format!(
        "no valid local start of day for {date} in {tz}"
    )))
}

fn check_range(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<(), ScopeError> {
    if from > to {
        return Err(ScopeError::InvalidArg(format!(
            "range start {from} is after end {to}"
        )));
    }
    Ok(())
}

fn collect_symbols<I, S>(symbols: I) -> Result<BTreeSet<String>, ScopeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = BTreeSet::new();
    for s in symbols {
        let trimmed = s.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ScopeError::InvalidArg("blank symbol in selection".into()));
        }
        out.insert(trimmed.to_string());
    }
    Ok(out)
}

fn clean_model(model: Option<&str>) -> Option<String> {
    model
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
