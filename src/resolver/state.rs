//! Resolution state machine
//!
//! `Idle -> Loading -> {Available | Unavailable | NotFound}`, with any new
//! request going straight back to `Loading`. Transitions are a pure function
//! of (state, event) so they can be exercised without a runtime.

use std::sync::Arc;

use super::ResolutionResult;
use crate::calendar::DayParam;
use crate::content::ContentPayload;

/// Where the current request stands
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Loading,
    Available(Arc<ContentPayload>),
    Unavailable,
    NotFound,
}

impl Phase {
    /// Settled phases never change until the next request
    pub fn is_settled(&self) -> bool {
        !matches!(self, Phase::Idle | Phase::Loading)
    }
}

impl From<ResolutionResult> for Phase {
    fn from(result: ResolutionResult) -> Self {
        match result {
            ResolutionResult::Available(payload) => Phase::Available(payload),
            ResolutionResult::Unavailable => Phase::Unavailable,
            ResolutionResult::NotFound => Phase::NotFound,
        }
    }
}

/// The single "current result" slot
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionState {
    /// Sequence number of the latest issued request, 0 before any
    pub seq: u64,
    /// Day of the latest issued request
    pub param: Option<DayParam>,
    pub phase: Phase,
}

impl Default for ResolutionState {
    fn default() -> Self {
        Self {
            seq: 0,
            param: None,
            phase: Phase::Idle,
        }
    }
}

/// Inputs to the state machine
#[derive(Debug, Clone)]
pub enum Event {
    /// A resolution was issued
    Requested { seq: u64, param: DayParam },
    /// A resolution finished
    Settled { seq: u64, result: ResolutionResult },
}

/// Compute the next state.
///
/// Requests only move forward: one whose sequence number is not newer than
/// the current one is ignored. Outcomes are committed only when they carry
/// the latest sequence number and the slot is still loading.
pub fn reduce(state: ResolutionState, event: Event) -> ResolutionState {
    match event {
        Event::Requested { seq, param } if seq > state.seq => ResolutionState {
            seq,
            param: Some(param),
            phase: Phase::Loading,
        },
        Event::Settled { seq, result } if seq == state.seq && state.phase == Phase::Loading => {
            ResolutionState {
                phase: result.into(),
                ..state
            }
        }
        _ => state,
    }
}
