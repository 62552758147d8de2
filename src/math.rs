use nalgebra as na;

use crate::bbox::{Point, Rect};

/// Euclidean distance between two centers
#[inline]
pub fn distance(from: &Point, to: &Point) -> f32 {
    na::distance(from, to)
}

/// Center displacement per frame.
///
/// Computed the same way as [`distance`]; the two are recorded separately in
/// track history.
#[inline]
pub fn speed(from: &Point, to: &Point) -> f32 {
    let dx = from.x - to.x;
    let dy = from.y - to.y;

    (dx * dx + dy * dy).sqrt()
}

/// Ratio of the new area to the previous one, 1.0 when the previous box is empty
#[inline]
pub fn scale(prev: &Rect, curr: &Rect) -> f32 {
    let prev_area = prev.area();
    if prev_area > 0.0 {
        curr.area() / prev_area
    } else {
        1.0
    }
}

/// Angle of the displacement in radians
#[inline]
pub fn direction(from: &Point, to: &Point) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Mean of the `n` entries preceding the last one.
///
/// Returns `None` if the slice holds `n` entries or fewer.
pub fn trailing_mean(values: &[f32], n: usize) -> Option<f32> {
    if n == 0 || values.len() <= n {
        return None;
    }

    let end = values.len() - 1;
    let sum: f32 = values[end - n..end].iter().sum();

    Some(sum / n as f32)
}
