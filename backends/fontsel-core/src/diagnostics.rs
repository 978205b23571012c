// this_file: backends/fontsel-core/src/diagnostics.rs

//! Propagation diagnostics used for structured debug logging.

use crate::sync::PropagationReport;
use crate::types::Selection;
use log::{debug, log_enabled, Level};

/// Lightweight snapshot of a finished propagation pass.
#[derive(Debug)]
pub struct PropagationDiagnostics<'a> {
    resource: &'a str,
    family: &'a str,
    variant: &'a str,
    kind: &'static str,
    updated: usize,
    skipped: usize,
    evicted: usize,
}

impl<'a> PropagationDiagnostics<'a> {
    /// Capture the diagnostic snapshot for the provided propagation.
    pub fn new(resource: &'a str, selection: &'a Selection, report: &PropagationReport) -> Self {
        Self {
            resource,
            family: selection.family_name.as_str(),
            variant: selection.variant.as_str(),
            kind: report.kind.as_str(),
            updated: report.updated,
            skipped: report.skipped,
            evicted: report.evicted,
        }
    }

    /// Emit the diagnostic snapshot at debug level when logging is enabled.
    pub fn log(&self) {
        if log_enabled!(Level::Debug) {
            debug!(
                target: "fontsel::sync",
                "kind={kind} family={family} variant={variant} resource={resource} updated={updated} skipped={skipped} evicted={evicted}",
                kind = self.kind,
                family = self.family,
                variant = self.variant,
                resource = self.resource,
                updated = self.updated,
                skipped = self.skipped,
                evicted = self.evicted,
            );
        }
    }
}
