//! A navigating caller's view of resolution

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use super::{reduce, DailyContentResolver, Event, ResolutionState};
use crate::calendar::{Clock, DayParam};
use crate::content::ContentStore;
use crate::view::RenderMode;

/// Tracks the day a caller is looking at and commits only the newest outcome.
///
/// Each resolution issued through [`navigate`](Self::navigate) is tagged with
/// a sequence number. A superseded lookup still runs to completion, but its
/// result never reaches the slot.
pub struct ArticleSession<S, C> {
    resolver: Arc<DailyContentResolver<S, C>>,
    next_seq: AtomicU64,
    state: Mutex<ResolutionState>,
}

impl<S: ContentStore, C: Clock> ArticleSession<S, C> {
    pub fn new(resolver: Arc<DailyContentResolver<S, C>>) -> Self {
        Self {
            resolver,
            next_seq: AtomicU64::new(0),
            state: Mutex::new(ResolutionState::default()),
        }
    }

    pub fn resolver(&self) -> &DailyContentResolver<S, C> {
        &self.resolver
    }

    /// Snapshot of the current slot
    pub fn current(&self) -> ResolutionState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// What a renderer should show for the current slot
    pub fn render_mode(&self, home: &str) -> RenderMode {
        RenderMode::from_state(&self.current(), self.resolver.current_day(), home)
    }

    /// Point the session at a day.
    ///
    /// A segment naming the day already requested does not trigger a new
    /// lookup; anything else starts one and returns the slot as it stands
    /// once that lookup is done (which may already reflect a newer request).
    pub async fn navigate(&self, segment: &str) -> ResolutionState {
        let param = DayParam::parse(segment);

        let seq = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.param.as_ref() == Some(&param) {
                return state.clone();
            }
            let seq = self.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
            *state = reduce(
                std::mem::take(&mut *state),
                Event::Requested {
                    seq,
                    param: param.clone(),
                },
            );
            seq
        };

        tracing::debug!("Request #{} for day {}", seq, param);
        let result = self.resolver.resolve_param(&param).await;

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if seq != state.seq {
            tracing::debug!("Discarding stale result of request #{}", seq);
        }
        *state = reduce(std::mem::take(&mut *state), Event::Settled { seq, result });
        state.clone()
    }
}
