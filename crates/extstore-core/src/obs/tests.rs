use super::*;
use crate::error::ErrorClass;
use std::{cell::RefCell, rc::Rc};

#[derive(Default)]
struct Capture(RefCell<Vec<String>>);

impl MetricsSink for Capture {
    fn record(&self, event: ConvertEvent<'_>) {
        self.0.borrow_mut().push(format!("{event:?}"));
    }
}

#[test]
fn global_sink_aggregates_per_schema() {
    metrics_reset_all();

    sink::record(ConvertEvent::SchemaResolved {
        schema: "Foo",
        created: true,
    });
    sink::record(ConvertEvent::SchemaResolved {
        schema: "Foo",
        created: false,
    });
    sink::record(ConvertEvent::EntityWritten {
        schema: "Foo",
        written: 3,
        omitted: 2,
    });
    sink::record(ConvertEvent::FieldOmitted {
        schema: "Foo",
        field: "inner",
        reason: OmitReason::SubSchemaUnloaded,
    });

    let report = metrics_report();
    assert_eq!(report.ops.schemas_created, 1);
    assert_eq!(report.ops.schemas_reused, 1);
    assert_eq!(report.ops.fields_written, 3);
    assert_eq!(report.ops.fields_omitted, 2);
    assert_eq!(report.ops.sub_schema_skips, 1);

    let foo = &report.schemas["Foo"];
    assert_eq!(foo.resolves, 2);
    assert_eq!(foo.writes, 1);
    assert_eq!(foo.omissions, 1);

    metrics_reset_all();
    assert_eq!(metrics_report(), EventReport::default());
}

#[test]
fn override_sink_captures_and_restores() {
    metrics_reset_all();
    let capture = Rc::new(Capture::default());

    with_metrics_sink(capture.clone(), || {
        sink::record(ConvertEvent::Failed {
            record: "Bar",
            class: ErrorClass::Unsupported,
        });
    });

    assert_eq!(capture.0.borrow().len(), 1);
    assert_eq!(metrics_report().ops.failures, 0);

    sink::record(ConvertEvent::Failed {
        record: "Bar",
        class: ErrorClass::Unsupported,
    });
    assert_eq!(metrics_report().ops.failures, 1);
    assert_eq!(capture.0.borrow().len(), 1);
}

#[test]
fn override_is_restored_after_panic() {
    let capture = Rc::new(Capture::default());

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        with_metrics_sink(capture.clone(), || -> u32 { panic!("boom") });
    }));
    assert!(result.is_err());

    metrics_reset_all();
    sink::record(ConvertEvent::EntityRead {
        schema: "Baz",
        read: 1,
        skipped: 0,
    });
    assert_eq!(metrics_report().ops.entities_read, 1);
    assert!(capture.0.borrow().is_empty());
}
