//! Stitching configuration.

use crate::error::{StitchError, StitchResult};

/// Configuration parameters for hole stitching.
///
/// # Example
///
/// ```
/// use mesh_stitch::StitchParams;
///
/// // Defaults: merge coplanar pairs into quads, fall back to quad bridging.
/// let params = StitchParams::default();
/// assert!(params.merge_quads);
///
/// // Or customize
/// let params = StitchParams {
///     normal_tolerance: 0.05,
///     ..Default::default()
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "pipeline-config",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "pipeline-config", serde(default))]
pub struct StitchParams {
    /// Per-component tolerance when comparing triangle normals for quad merging.
    ///
    /// Two generated triangles sharing an edge merge into a quad when every
    /// component of their unit normals differs by at most this amount.
    ///
    /// Default: `0.01`
    pub normal_tolerance: f64,

    /// Whether to merge adjacent coplanar triangle pairs into quads.
    ///
    /// Default: `true`
    pub merge_quads: bool,

    /// Whether to bridge two equal-length loops with quads when the
    /// advancing front cannot close them.
    ///
    /// Default: `true`
    pub quad_fallback: bool,

    /// Whether [`HoleStitcher`](crate::HoleStitcher) validates loops and
    /// positions before stitching.
    ///
    /// The stitching core assumes valid input. Disable only when the caller
    /// has already validated.
    ///
    /// Default: `true`
    pub validate: bool,
}

impl Default for StitchParams {
    fn default() -> Self {
        Self {
            normal_tolerance: 0.01,
            merge_quads: true,
            quad_fallback: true,
            validate: true,
        }
    }
}

impl StitchParams {
    /// Emit triangles only; no coplanar pairs are merged.
    pub fn triangles_only() -> Self {
        Self {
            merge_quads: false,
            ..Default::default()
        }
    }

    /// Advancing front only, without the quad-bridge fallback.
    pub fn strict() -> Self {
        Self {
            quad_fallback: false,
            ..Default::default()
        }
    }

    /// Check that the parameters are usable.
    pub fn validate(&self) -> StitchResult<()> {
        if !self.normal_tolerance.is_finite() || self.normal_tolerance < 0.0 {
            return Err(StitchError::invalid_params(format!(
                "normal_tolerance must be finite and non-negative, got {}",
                self.normal_tolerance
            )));
        }
        Ok(())
    }
}
