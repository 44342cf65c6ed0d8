use error_stack::{bail, Result};

use crate::errors::SimplifyError;
use crate::geodesy::{distance_to_segment, GeoPoint};

/// Index and distance of the interior point of `ring[start..=end]` farthest
/// from the line through `ring[start]` and `ring[end]`. The first index wins
/// on ties. Returns `(start, 0.0)` when no interior point lies off the line.
fn farthest_point(ring: &[GeoPoint], start: usize, end: usize) -> (usize, f64) {
    let mut max_distance = 0.0;
    let mut max_index = start;

    for i in start + 1..end {
        let distance = distance_to_segment(&ring[i], &ring[start], &ring[end]);
        if distance > max_distance {
            max_distance = distance;
            max_index = i;
        }
    }

    (max_index, max_distance)
}

fn check_input(ring: &[GeoPoint], epsilon: f64) -> Result<(), SimplifyError> {
    if ring.len() < 2 {
        bail!(SimplifyError::RingTooShort { len: ring.len() });
    }
    if epsilon.is_nan() || epsilon < 0.0 {
        bail!(SimplifyError::InvalidTolerance(epsilon));
    }
    Ok(())
}

/// Indices of the points of `ring` kept by Douglas-Peucker at tolerance
/// `epsilon` meters, in ascending order.
///
/// Ranges are processed from an explicit stack instead of recursion so
/// nearly straight rings cannot exhaust the call stack. A range is split at
/// its farthest interior point only when that distance is strictly greater
/// than `epsilon`.
pub fn simplify_indices(ring: &[GeoPoint], epsilon: f64) -> Result<Vec<usize>, SimplifyError> {
    check_input(ring, epsilon)?;

    let last = ring.len() - 1;
    let mut keep = vec![false; ring.len()];
    keep[0] = true;
    keep[last] = true;

    let mut ranges: Vec<(usize, usize)> = vec![(0, last)];
    while let Some((start, end)) = ranges.pop() {
        if end - start < 2 {
            continue;
        }

        let (split, max_distance) = farthest_point(ring, start, end);
        if max_distance > epsilon {
            keep[split] = true;
            ranges.push((split, end));
            ranges.push((start, split));
        }
    }

    Ok(keep
        .iter()
        .enumerate()
        .filter_map(|(i, &k)| if k { Some(i) } else { None })
        .collect())
}

/// Simplifies an open ring. The result is a subsequence of `ring` that keeps
/// both endpoints. Fails for rings shorter than 2 points and for negative or
/// NaN tolerances.
pub fn simplify(ring: &[GeoPoint], epsilon: f64) -> Result<Vec<GeoPoint>, SimplifyError> {
    let indices = simplify_indices(ring, epsilon)?;
    Ok(indices.into_iter().map(|i| ring[i]).collect())
}
