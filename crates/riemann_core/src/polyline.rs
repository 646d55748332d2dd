//! Splitting sampled points into drawable runs
//!
//! A run is a maximal sequence of samples that may be joined by straight
//! segments. Runs break at the pole band around the origin, when the
//! samples cross `x = 0`, and at non-finite values.

use crate::Sample;

/// Half-width of the band around `x = 0` treated as a pole
pub const POLE_EPSILON: f64 = 1e-4;

/// Split samples into runs of at least two points
///
/// Samples inside the pole band or with non-finite `y` are dropped.
pub fn split_polyline(samples: &[Sample]) -> Vec<Vec<Sample>> {
    let mut runs = Vec::new();
    let mut current: Vec<Sample> = Vec::new();

    for &sample in samples {
        if !sample.is_finite() || sample.x.abs() <= POLE_EPSILON {
            flush(&mut runs, &mut current);
            continue;
        }

        if let Some(last) = current.last() {
            if (last.x < 0.0) != (sample.x < 0.0) {
                flush(&mut runs, &mut current);
            }
        }

        current.push(sample);
    }
    flush(&mut runs, &mut current);

    runs
}

fn flush(runs: &mut Vec<Vec<Sample>>, current: &mut Vec<Sample>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
