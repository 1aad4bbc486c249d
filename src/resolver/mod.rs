//! Date-gated content resolution
//!
//! [`DailyContentResolver`] decides whether a requested day may be shown
//! today and, if so, fetches its payload from a [`ContentStore`]. Every
//! failure is recovered here and reported as a [`ResolutionResult`].
//! [`ArticleSession`] adds last-request-wins ordering on top of it for
//! callers that navigate between days.

mod session;
mod state;

pub use session::ArticleSession;
pub use state::{reduce, Event, Phase, ResolutionState};

use std::sync::Arc;
use thiserror::Error;

use crate::calendar::{self, Clock, Day, DayParam};
use crate::content::{ContentPayload, ContentStore, StoreError};

/// Why a day could not be shown
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("invalid day {0}")]
    InvalidDay(DayParam),
    #[error("day {day} is still locked (today is day {today})")]
    NotYetUnlocked { day: Day, today: u32 },
    #[error("no content for day {day}: {source}")]
    PayloadMissing {
        day: Day,
        #[source]
        source: StoreError,
    },
}

/// Outcome of resolving one day
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionResult {
    Available(Arc<ContentPayload>),
    /// Invalid, or not unlocked yet
    Unavailable,
    /// Unlocked, but nothing could be loaded for it
    NotFound,
}

impl ResolutionResult {
    pub fn is_available(&self) -> bool {
        matches!(self, ResolutionResult::Available(_))
    }

    pub fn payload(&self) -> Option<&Arc<ContentPayload>> {
        match self {
            ResolutionResult::Available(payload) => Some(payload),
            _ => None,
        }
    }
}

impl From<Result<Arc<ContentPayload>, ResolveError>> for ResolutionResult {
    fn from(result: Result<Arc<ContentPayload>, ResolveError>) -> Self {
        match result {
            Ok(payload) => ResolutionResult::Available(payload),
            Err(ResolveError::InvalidDay(_)) | Err(ResolveError::NotYetUnlocked { .. }) => {
                ResolutionResult::Unavailable
            }
            Err(ResolveError::PayloadMissing { .. }) => ResolutionResult::NotFound,
        }
    }
}

/// Resolves day identifiers against a clock and a content store
pub struct DailyContentResolver<S, C> {
    store: S,
    clock: C,
    bypass: bool,
}

impl<S: ContentStore, C: Clock> DailyContentResolver<S, C> {
    /// `bypass` lifts the future-day lock (preview mode)
    pub fn new(store: S, clock: C, bypass: bool) -> Self {
        Self {
            store,
            clock,
            bypass,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn bypass(&self) -> bool {
        self.bypass
    }

    /// Today's day-of-month according to the clock
    pub fn current_day(&self) -> u32 {
        self.clock.current_day()
    }

    /// Whether a day may be shown right now
    pub fn validate(&self, day: i64) -> bool {
        calendar::validate(day, self.current_day(), self.bypass)
    }

    /// Apply the calendar rules to a parsed segment without touching the store
    pub fn classify(&self, param: &DayParam) -> Result<Day, ResolveError> {
        let today = self.current_day();
        if calendar::validate_param(param, today, self.bypass) {
            return param
                .to_day()
                .map_err(|_| ResolveError::InvalidDay(param.clone()));
        }
        match param.to_day() {
            Ok(day) => Err(ResolveError::NotYetUnlocked { day, today }),
            Err(_) => Err(ResolveError::InvalidDay(param.clone())),
        }
    }

    /// Resolve a parsed segment, keeping the reason for any failure
    pub async fn try_resolve(&self, param: &DayParam) -> Result<Arc<ContentPayload>, ResolveError> {
        let day = self.classify(param)?;
        self.store
            .get(day)
            .await
            .map_err(|source| ResolveError::PayloadMissing { day, source })
    }

    /// Resolve a parsed segment
    pub async fn resolve_param(&self, param: &DayParam) -> ResolutionResult {
        let result = self.try_resolve(param).await;
        match &result {
            Ok(_) => tracing::debug!("Resolved day {}", param),
            Err(e @ ResolveError::PayloadMissing { .. }) => tracing::warn!("{}", e),
            Err(e) => tracing::debug!("{}", e),
        }
        result.into()
    }

    /// Resolve a numeric day
    pub async fn resolve(&self, day: i64) -> ResolutionResult {
        self.resolve_param(&DayParam::Number(day)).await
    }

    /// Resolve a raw routed path segment
    pub async fn resolve_segment(&self, segment: &str) -> ResolutionResult {
        self.resolve_param(&DayParam::parse(segment)).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::content::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub fn payload(title: &str) -> ContentPayload {
        ContentPayload::new(title, format!("{} lead", title), "<p>body</p>", Vec::new())
    }

    /// Memory store that counts lookups
    #[derive(Default)]
    pub struct CountingStore {
        pub inner: MemoryStore,
        pub lookups: AtomicUsize,
    }

    impl CountingStore {
        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }
    }

    impl ContentStore for CountingStore {
        async fn get(&self, day: Day) -> Result<Arc<ContentPayload>, StoreError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get(day).await
        }
    }
}
