use serde::Serialize;
use std::{cell::RefCell, collections::BTreeMap};

///
/// EventState
/// Ephemeral, in-memory conversion counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub schemas: BTreeMap<String, SchemaCounters>,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Schema resolution
    pub schemas_created: u64,
    pub schemas_reused: u64,

    // Entity conversions
    pub entities_written: u64,
    pub entities_read: u64,
    pub failures: u64,

    // Field slots
    pub fields_written: u64,
    pub fields_omitted: u64,
    pub fields_read: u64,
    pub fields_skipped: u64,
    pub sub_schema_skips: u64,
}

///
/// SchemaCounters
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SchemaCounters {
    pub resolves: u64,
    pub writes: u64,
    pub reads: u64,
    pub omissions: u64,
}

/// Point-in-time copy of the event state.
pub type EventReport = EventState;

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn report() -> EventReport {
    with_state(Clone::clone)
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}
