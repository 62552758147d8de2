use ndarray::prelude::*;

use crate::bbox::Rect;

/// IOU of every track box (rows) against every detection box (columns)
pub fn iou_matrix(tracks: &[Rect], detections: &[Rect]) -> Array2<f32> {
    Array2::from_shape_fn((tracks.len(), detections.len()), |(r, c)| {
        tracks[r].iou(&detections[c])
    })
}

/// Greedy one-to-one matching on an IOU matrix.
///
/// Takes the largest remaining cell (first one in row-major order on ties),
/// clears its row and column, and repeats until the largest cell drops below
/// `threshold`. Returns `(row, column, iou)` in the order pairs were taken.
pub fn greedy_assignment(mut mat: Array2<f32>, threshold: f32) -> Vec<(usize, usize, f32)> {
    let (rows, cols) = mat.dim();
    let mut assignments = Vec::with_capacity(rows.min(cols));
    let mut taken_rows = vec![false; rows];
    let mut taken_cols = vec![false; cols];

    for _ in 0..rows.min(cols) {
        let Some((r, c, value)) = argmax(mat.view(), &taken_rows, &taken_cols) else {
            break;
        };

        if value < threshold {
            break;
        }

        assignments.push((r, c, value));
        mat.row_mut(r).fill(0.0);
        mat.column_mut(c).fill(0.0);
        taken_rows[r] = true;
        taken_cols[c] = true;
    }

    assignments
}

// cleared rows and columns are skipped so a zero threshold cannot pick them twice
fn argmax(
    mat: ArrayView2<'_, f32>,
    taken_rows: &[bool],
    taken_cols: &[bool],
) -> Option<(usize, usize, f32)> {
    let mut best: Option<(usize, usize, f32)> = None;

    for ((r, c), &value) in mat.indexed_iter() {
        if taken_rows[r] || taken_cols[c] {
            continue;
        }

        match best {
            Some((_, _, b)) if value <= b => {}
            _ => best = Some((r, c, value)),
        }
    }

    best
}
