use crate::bbox::{Point, Rect};
use crate::detection::Detection;
use crate::math;
use crate::record::TrackRecord;

/// Per-frame step of a track, either observed from a detection or
/// compensated from the track's own history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionUpdate {
    pub bbox: Rect,
    pub center: Point,
    pub distance: f32,
    pub speed: f32,
    pub scale: f32,
    pub direction: f32,
    pub confidence: f32,
}

impl MotionUpdate {
    /// Motion from the track's last position to a matched detection, `iou`
    /// becomes the tracking confidence of the step
    pub fn observed(track: &TrackRecord, det: &Detection, iou: f32) -> Self {
        let prev_center = track.last_center();
        let prev_bbox = track.last_bbox();

        Self {
            bbox: det.bbox,
            center: det.center,
            distance: math::distance(&prev_center, &det.center),
            speed: math::speed(&prev_center, &det.center),
            scale: math::scale(&prev_bbox, &det.bbox),
            direction: math::direction(&prev_center, &det.center),
            confidence: iou,
        }
    }

    /// Motion for a frame where the track was not detected.
    ///
    /// Young tracks repeat their last step. Once more than `history` frames
    /// are known, the kinematics are the mean of the `history` steps before
    /// the last one. The box keeps its last size and stays anchored on the
    /// last center either way.
    pub fn compensated(track: &TrackRecord, history: usize) -> Self {
        let bbox = track.last_bbox();
        let center = track.last_center();

        let last = |values: &[f32]| values.last().copied().unwrap_or(0.0);
        let mut update = Self {
            bbox,
            center,
            distance: last(&track.distances),
            speed: last(&track.speeds),
            scale: last(&track.scales),
            direction: last(&track.directions),
            confidence: 0.0,
        };

        if track.tracked_frames_count > history {
            if let (Some(distance), Some(speed), Some(scale), Some(direction)) = (
                math::trailing_mean(&track.distances, history),
                math::trailing_mean(&track.speeds, history),
                math::trailing_mean(&track.scales, history),
                math::trailing_mean(&track.directions, history),
            ) {
                update.distance = distance;
                update.speed = speed;
                update.scale = scale;
                update.direction = direction;
                update.bbox = Rect::from_center(center.x, center.y, bbox.width, bbox.height);
            }
        }

        update
    }
}
