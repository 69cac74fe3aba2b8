//! Observability: conversion telemetry and sink abstractions.

pub(crate) mod metrics;
pub(crate) mod sink;

#[cfg(test)]
mod tests;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, SchemaCounters};
pub use sink::{
    ConvertEvent, MetricsSink, OmitReason, metrics_report, metrics_reset_all, with_metrics_sink,
};
