//! Parallel stitching of independent requests.

use nalgebra::Point3;
use rayon::prelude::*;
use tracing::info;

use crate::error::StitchResult;
use crate::params::StitchParams;
use crate::stitcher::{HoleStitcher, StitchReport};
use crate::types::EdgeLoop;

/// Stitch unrelated requests over one shared position buffer in parallel.
///
/// Each request is a set of loops forming one stitching region and gets its
/// own [`HoleStitcher`]; nothing mutable is shared between workers. Results
/// are returned in request order.
pub fn stitch_requests(
    positions: &[Point3<f64>],
    requests: &[Vec<EdgeLoop>],
    params: &StitchParams,
) -> Vec<StitchResult<StitchReport>> {
    let results: Vec<StitchResult<StitchReport>> = requests
        .par_iter()
        .map(|loops| {
            let mut stitcher = HoleStitcher::with_params(params.clone());
            stitcher
                .stitch(positions, loops)
                .map(|_| stitcher.into_report())
        })
        .collect();

    let closed = results
        .iter()
        .filter(|r| r.as_ref().is_ok_and(|report| report.is_closed()))
        .count();
    info!(
        requests = requests.len(),
        closed,
        "Stitched {} of {} requests",
        closed,
        requests.len()
    );

    results
}
