//! Tracing extensions for stitching operations.
//!
//! The library never installs a subscriber. Enable output in your application:
//!
//! ```rust,ignore
//! use tracing_subscriber::{fmt, prelude::*, EnvFilter};
//!
//! tracing_subscriber::registry()
//!     .with(fmt::layer())
//!     .with(EnvFilter::from_default_env())
//!     .init();
//!
//! // RUST_LOG=mesh_stitch=debug for per-phase output,
//! // RUST_LOG=mesh_stitch=trace for every generated face.
//! ```
//!
//! # Log Levels
//!
//! - **WARN**: Loops left open, suspicious input
//! - **INFO**: Stitch summaries, timing
//! - **DEBUG**: Phase boundaries (registration, front exhaustion, quad merge)
//! - **TRACE**: Per-face emission and abandoned front edges

use std::time::Instant;
use tracing::{Span, debug, info, warn};

use crate::stitcher::{StitchReport, StitchStrategy};

/// Times one stitch request and logs its size and outcome on drop.
///
/// ```rust,ignore
/// use mesh_stitch::tracing_ext::OperationTimer;
///
/// let mut timer = OperationTimer::with_context("hole_stitch", loops.len(), vertex_count);
/// // ... stitch ...
/// timer.record_report(&report);
/// // Completion event carries loops, vertices, strategy and faces.
/// ```
pub struct OperationTimer {
    name: &'static str,
    loops: usize,
    vertices: usize,
    outcome: Option<(StitchStrategy, usize)>,
    start: Instant,
    span: Span,
}

impl OperationTimer {
    /// Create a timer for an operation of unknown size.
    pub fn new(name: &'static str) -> Self {
        Self::with_context(name, 0, 0)
    }

    /// Create a timer with the request size as context.
    pub fn with_context(name: &'static str, loop_count: usize, vertex_count: usize) -> Self {
        let span = tracing::info_span!(
            "stitch_operation",
            operation = name,
            loops = loop_count,
            vertices = vertex_count,
            strategy = tracing::field::Empty
        );
        debug!(
            target: "mesh_stitch::timing",
            operation = name,
            loops = loop_count,
            vertices = vertex_count,
            "Starting stitch"
        );
        Self {
            name,
            loops: loop_count,
            vertices: vertex_count,
            outcome: None,
            start: Instant::now(),
            span,
        }
    }

    /// Attach the strategy and face count of a finished stitch.
    pub fn record_report(&mut self, report: &StitchReport) {
        self.span.record("strategy", tracing::field::debug(report.strategy));
        self.outcome = Some((report.strategy, report.faces.len()));
    }

    /// Strategy recorded by [`record_report`](Self::record_report), if any.
    pub fn strategy(&self) -> Option<StitchStrategy> {
        self.outcome.map(|(strategy, _)| strategy)
    }

    /// Get the elapsed time.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Get the span for this timer.
    pub fn span(&self) -> &Span {
        &self.span
    }
}

impl Drop for OperationTimer {
    fn drop(&mut self) {
        let elapsed_ms = format!("{:.2}", self.elapsed_ms());
        match self.outcome {
            Some((strategy, faces)) => info!(
                target: "mesh_stitch::timing",
                operation = self.name,
                loops = self.loops,
                vertices = self.vertices,
                ?strategy,
                faces,
                elapsed_ms,
                "Stitch completed"
            ),
            None => info!(
                target: "mesh_stitch::timing",
                operation = self.name,
                loops = self.loops,
                vertices = self.vertices,
                elapsed_ms,
                "Stitch ended without a report"
            ),
        }
    }
}

/// Log the outcome of a stitch.
pub fn log_stitch_result(report: &StitchReport) {
    if report.is_closed() {
        info!(
            target: "mesh_stitch::result",
            strategy = ?report.strategy,
            faces = report.faces.len(),
            triangles_generated = report.triangles_generated,
            "Stitch closed all loops"
        );
    } else {
        warn!(
            target: "mesh_stitch::result",
            strategy = ?report.strategy,
            faces = report.faces.len(),
            failed_loops = ?report.failed_loops,
            "Stitch left loops open"
        );
    }
}
