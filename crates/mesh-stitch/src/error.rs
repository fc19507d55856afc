//! Error types for stitching with rich diagnostics.
//!
//! Failing to close a loop is not an error: it is reported through
//! [`HoleWrapper::failed_edge_loops`](crate::HoleWrapper::failed_edge_loops).
//! The errors here cover broken preconditions (caught by
//! [`validate_loops`](crate::validate_loops)) and misconfiguration.
//!
//! # Error Codes
//!
//! Each error has a unique code in the format `STITCH-XXXX`:
//! - `STITCH-1xxx`: Input errors (loops, positions, parameters)
//! - `STITCH-2xxx`: Stitching errors (a strategy could not be applied)
//!
//! # Example
//!
//! ```
//! use mesh_stitch::{EdgeLoop, ErrorCode, validate_loops};
//! use nalgebra::{Point3, Vector3};
//!
//! let positions = vec![Point3::origin(); 2];
//! let loops = vec![EdgeLoop::new(vec![0, 1], Vector3::z())];
//!
//! let err = validate_loops(&positions, &loops).unwrap_err();
//! assert_eq!(err.code(), ErrorCode::LoopTooShort);
//! assert_eq!(err.code().as_str(), "STITCH-1001");
//! ```

use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for stitching operations.
pub type StitchResult<T> = Result<T, StitchError>;

/// Machine-readable error codes for stitching operations.
///
/// Codes follow the pattern `STITCH-XXXX` where:
/// - 1xxx = Input errors
/// - 2xxx = Stitching errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input errors (1xxx)
    /// STITCH-1001: Loop has fewer than three vertices
    LoopTooShort = 1001,
    /// STITCH-1002: Loop references a vertex outside the position buffer
    VertexOutOfRange = 1002,
    /// STITCH-1003: Position has NaN or Infinity coordinate
    InvalidCoordinate = 1003,
    /// STITCH-1004: Loop normal is zero or not finite
    DegenerateNormal = 1004,
    /// STITCH-1005: Request contains no loops
    NoLoops = 1005,
    /// STITCH-1006: Parameters are out of range
    InvalidParams = 1006,

    // Stitching errors (2xxx)
    /// STITCH-2001: Loops cannot be bridged because their lengths differ
    LoopLengthMismatch = 2001,
    /// STITCH-2002: Both loops of a bridge have fewer than three vertices
    BridgeLoopsTooShort = 2002,
}

impl ErrorCode {
    /// Returns the error code as a string in the format `STITCH-XXXX`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::LoopTooShort => "STITCH-1001",
            ErrorCode::VertexOutOfRange => "STITCH-1002",
            ErrorCode::InvalidCoordinate => "STITCH-1003",
            ErrorCode::DegenerateNormal => "STITCH-1004",
            ErrorCode::NoLoops => "STITCH-1005",
            ErrorCode::InvalidParams => "STITCH-1006",
            ErrorCode::LoopLengthMismatch => "STITCH-2001",
            ErrorCode::BridgeLoopsTooShort => "STITCH-2002",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recovery suggestions for stitching errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoverySuggestion {
    /// Fix the boundary loop extraction upstream.
    CheckBoundaryLoops { checks: Vec<String> },
    /// Adjust parameters for the operation.
    AdjustParameters { parameters: Vec<(String, String)> },
    /// Use a different strategy for the hole.
    UseDifferentStrategy { suggested: String },
}

impl std::fmt::Display for RecoverySuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecoverySuggestion::CheckBoundaryLoops { checks } => {
                write!(f, "Check the boundary loops for: {}", checks.join(", "))
            }
            RecoverySuggestion::AdjustParameters { parameters } => {
                let params: Vec<String> = parameters
                    .iter()
                    .map(|(k, v)| format!("{} = {}", k, v))
                    .collect();
                write!(f, "Try adjusting: {}", params.join(", "))
            }
            RecoverySuggestion::UseDifferentStrategy { suggested } => {
                write!(f, "Try {}", suggested)
            }
        }
    }
}

/// Errors that can occur while preparing or running a stitch.
#[derive(Debug, Error, Diagnostic)]
pub enum StitchError {
    /// A loop has fewer than three vertices.
    #[error("loop {loop_index} has {len} vertices, at least 3 are required")]
    #[diagnostic(
        code(stitch::input::loop_too_short),
        help("Boundary loops must be closed rings of at least three vertices.")
    )]
    LoopTooShort { loop_index: usize, len: usize },

    /// A loop references a vertex outside the position buffer.
    #[error(
        "loop {loop_index} references vertex {vertex}, but only {vertex_count} positions were supplied"
    )]
    #[diagnostic(
        code(stitch::input::vertex_range),
        help("Loop vertices must index into the shared position buffer.")
    )]
    VertexOutOfRange {
        loop_index: usize,
        vertex: usize,
        vertex_count: usize,
    },

    /// A referenced position has a NaN or infinite coordinate.
    #[error("invalid coordinate at vertex {vertex}: {coordinate} is {value}")]
    #[diagnostic(
        code(stitch::input::coordinate),
        help("Check for numerical issues in the source mesh before stitching.")
    )]
    InvalidCoordinate {
        vertex: usize,
        coordinate: &'static str,
        value: f64,
    },

    /// A loop normal is zero or not finite.
    #[error("loop {loop_index} has a degenerate reference normal")]
    #[diagnostic(
        code(stitch::input::normal),
        help("Supply the unit normal of the plane the loop was cut from.")
    )]
    DegenerateNormal { loop_index: usize },

    /// The request has no loops at all.
    #[error("no boundary loops to stitch")]
    #[diagnostic(code(stitch::input::empty))]
    NoLoops,

    /// Parameters are out of range.
    #[error("invalid stitch parameters: {details}")]
    #[diagnostic(code(stitch::input::params))]
    InvalidParams { details: String },

    /// Two loops of different length cannot be bridged by quads.
    #[error("cannot bridge loops of {first} and {second} vertices with quads")]
    #[diagnostic(
        code(stitch::bridge::length_mismatch),
        help("Quad bridging pairs boundary edges one to one; use the advancing-front stitcher instead.")
    )]
    LoopLengthMismatch { first: usize, second: usize },

    /// Two equal-length loops are both too short to bridge.
    #[error("cannot bridge two loops of {len} vertices, each needs at least 3")]
    #[diagnostic(code(stitch::bridge::too_short))]
    BridgeLoopsTooShort { len: usize },
}

impl StitchError {
    /// Returns the machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        match self {
            StitchError::LoopTooShort { .. } => ErrorCode::LoopTooShort,
            StitchError::VertexOutOfRange { .. } => ErrorCode::VertexOutOfRange,
            StitchError::InvalidCoordinate { .. } => ErrorCode::InvalidCoordinate,
            StitchError::DegenerateNormal { .. } => ErrorCode::DegenerateNormal,
            StitchError::NoLoops => ErrorCode::NoLoops,
            StitchError::InvalidParams { .. } => ErrorCode::InvalidParams,
            StitchError::LoopLengthMismatch { .. } => ErrorCode::LoopLengthMismatch,
            StitchError::BridgeLoopsTooShort { .. } => ErrorCode::BridgeLoopsTooShort,
        }
    }

    /// Returns a recovery suggestion for this error, if one applies.
    pub fn recovery_suggestion(&self) -> Option<RecoverySuggestion> {
        match self {
            StitchError::LoopTooShort { .. }
            | StitchError::VertexOutOfRange { .. }
            | StitchError::BridgeLoopsTooShort { .. } => {
                Some(RecoverySuggestion::CheckBoundaryLoops {
                    checks: vec![
                        "open or truncated loops".to_string(),
                        "indices from a different vertex buffer".to_string(),
                    ],
                })
            }
            StitchError::InvalidCoordinate { .. } => Some(RecoverySuggestion::CheckBoundaryLoops {
                checks: vec!["NaN or infinite vertex positions".to_string()],
            }),
            StitchError::DegenerateNormal { .. } => Some(RecoverySuggestion::CheckBoundaryLoops {
                checks: vec!["zero-length loop normals".to_string()],
            }),
            StitchError::InvalidParams { .. } => Some(RecoverySuggestion::AdjustParameters {
                parameters: vec![("normal_tolerance".to_string(), "0.01".to_string())],
            }),
            StitchError::LoopLengthMismatch { .. } => {
                Some(RecoverySuggestion::UseDifferentStrategy {
                    suggested: "the advancing-front stitcher".to_string(),
                })
            }
            StitchError::NoLoops => None,
        }
    }

    /// Create a loop-too-short error.
    pub fn loop_too_short(loop_index: usize, len: usize) -> Self {
        StitchError::LoopTooShort { loop_index, len }
    }

    /// Create a vertex-out-of-range error.
    pub fn vertex_out_of_range(loop_index: usize, vertex: usize, vertex_count: usize) -> Self {
        StitchError::VertexOutOfRange {
            loop_index,
            vertex,
            vertex_count,
        }
    }

    /// Create an invalid-params error.
    pub fn invalid_params(details: impl Into<String>) -> Self {
        StitchError::InvalidParams {
            details: details.into(),
        }
    }
}
