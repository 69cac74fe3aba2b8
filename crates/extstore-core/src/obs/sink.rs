//! Metrics sink boundary.
//!
//! Conversion code never touches `obs::metrics` directly; every event goes
//! through `record`, which dispatches to a scoped override when one is
//! installed and to the global thread-local state otherwise.

use crate::{error::ErrorClass, obs::metrics};
use derive_more::Display;
use std::{cell::RefCell, rc::Rc};

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn MetricsSink>>> = RefCell::new(None);
}

///
/// OmitReason
///
/// Why a field slot was left unwritten (or unread).
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum OmitReason {
    #[display("absent")]
    Absent,
    #[display("empty_sequence")]
    EmptySequence,
    #[display("empty_map")]
    EmptyMap,
    #[display("sub_schema_unloaded")]
    SubSchemaUnloaded,
}

///
/// ConvertEvent
///

#[derive(Clone, Copy, Debug)]
pub enum ConvertEvent<'a> {
    SchemaResolved {
        schema: &'a str,
        created: bool,
    },
    EntityWritten {
        schema: &'a str,
        written: u64,
        omitted: u64,
    },
    EntityRead {
        schema: &'a str,
        read: u64,
        skipped: u64,
    },
    FieldOmitted {
        schema: &'a str,
        field: &'a str,
        reason: OmitReason,
    },
    Failed {
        record: &'a str,
        class: ErrorClass,
    },
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: ConvertEvent<'_>);
}

///
/// GlobalMetricsSink
///
/// Default sink; aggregates into the thread-local event state.
///

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: ConvertEvent<'_>) {
        match event {
            ConvertEvent::SchemaResolved { schema, created } => {
                metrics::with_state_mut(|m| {
                    if created {
                        m.ops.schemas_created = m.ops.schemas_created.saturating_add(1);
                    } else {
                        m.ops.schemas_reused = m.ops.schemas_reused.saturating_add(1);
                    }
                    let entry = m.schemas.entry(schema.to_string()).or_default();
                    entry.resolves = entry.resolves.saturating_add(1);
                });
            }

            ConvertEvent::EntityWritten {
                schema,
                written,
                omitted,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.entities_written = m.ops.entities_written.saturating_add(1);
                    m.ops.fields_written = m.ops.fields_written.saturating_add(written);
                    m.ops.fields_omitted = m.ops.fields_omitted.saturating_add(omitted);

                    let entry = m.schemas.entry(schema.to_string()).or_default();
                    entry.writes = entry.writes.saturating_add(1);
                });
            }

            ConvertEvent::EntityRead {
                schema,
                read,
                skipped,
            } => {
                metrics::with_state_mut(|m| {
                    m.ops.entities_read = m.ops.entities_read.saturating_add(1);
                    m.ops.fields_read = m.ops.fields_read.saturating_add(read);
                    m.ops.fields_skipped = m.ops.fields_skipped.saturating_add(skipped);

                    let entry = m.schemas.entry(schema.to_string()).or_default();
                    entry.reads = entry.reads.saturating_add(1);
                });
            }

            ConvertEvent::FieldOmitted { schema, reason, .. } => {
                metrics::with_state_mut(|m| {
                    if reason == OmitReason::SubSchemaUnloaded {
                        m.ops.sub_schema_skips = m.ops.sub_schema_skips.saturating_add(1);
                    }
                    let entry = m.schemas.entry(schema.to_string()).or_default();
                    entry.omissions = entry.omissions.saturating_add(1);
                });
            }

            ConvertEvent::Failed { .. } => {
                metrics::with_state_mut(|m| {
                    m.ops.failures = m.ops.failures.saturating_add(1);
                });
            }
        }
    }
}

pub(crate) fn record(event: ConvertEvent<'_>) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GlobalMetricsSink.record(event),
    }
}

/// Snapshot the current thread's metrics state.
#[must_use]
pub fn metrics_report() -> metrics::EventReport {
    metrics::report()
}

/// Reset all metrics state for the current thread.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with `sink` receiving every event recorded on this thread.
/// The previous sink is restored afterwards, including on unwind.
pub fn with_metrics_sink<T>(sink: Rc<dyn MetricsSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn MetricsSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            let prev = self.0.take();
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = prev;
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
