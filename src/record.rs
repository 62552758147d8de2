use serde_derive::{Deserialize, Serialize};

use crate::bbox::{Point, Rect};
use crate::config::TrackerConfig;
use crate::detection::Detection;
use crate::motion::MotionUpdate;

/// Stable key of a track inside its scene, assigned at creation and never
/// reused
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackHandle(pub u64);

/// Drawing color as (b, g, r)
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Color(pub [u8; 3]);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    Promote,
    Discard,
    Archive,
}

/// Full history of a single tracked object.
///
/// Every per-frame vector gets exactly one entry per frame the track is
/// alive, detected or not. `detected_frames` and `undetected_frames` split
/// `tracked_frames` between the two cases.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TrackRecord {
    pub handle: TrackHandle,
    pub id: Option<u32>,
    pub color: Color,

    pub tracked_frames: Vec<u64>,
    pub tracked_frames_count: usize,
    pub continuous_tracking_count: usize,

    pub detected_frames: Vec<u64>,
    pub detected_frames_count: usize,
    pub continuous_detection_count: usize,

    pub undetected_frames: Vec<u64>,
    pub undetected_frames_count: usize,
    pub continuous_undetection_count: usize,

    pub bboxes: Vec<Rect>,
    pub centers: Vec<Point>,

    pub detection_confidences: Vec<f32>,
    pub track_confidences: Vec<f32>,

    pub distances: Vec<f32>,
    pub speeds: Vec<f32>,
    pub scales: Vec<f32>,
    pub directions: Vec<f32>,
}

impl TrackRecord {
    /// Provisional track seeded from a detection nothing matched
    pub fn initialize(
        handle: TrackHandle,
        frame_number: u64,
        color: Color,
        det: &Detection,
        track_confidence: f32,
    ) -> Self {
        Self {
            handle,
            id: None,
            color,

            tracked_frames: vec![frame_number],
            tracked_frames_count: 1,
            continuous_tracking_count: 1,

            detected_frames: vec![det.frame_number],
            detected_frames_count: 1,
            continuous_detection_count: 0,

            undetected_frames: Vec::new(),
            undetected_frames_count: 0,
            continuous_undetection_count: 0,

            bboxes: vec![det.bbox],
            centers: vec![det.center],

            detection_confidences: vec![det.confidence],
            track_confidences: vec![track_confidence],

            distances: vec![0.0],
            speeds: vec![0.0],
            scales: vec![0.0],
            directions: vec![0.0],
        }
    }

    pub fn update(&mut self, frame_number: u64, motion: &MotionUpdate, det: Option<&Detection>) {
        self.tracked_frames.push(frame_number);
        self.tracked_frames_count += 1;
        self.continuous_tracking_count += 1;
        self.track_confidences.push(motion.confidence);

        self.distances.push(motion.distance);
        self.speeds.push(motion.speed);
        self.scales.push(motion.scale);
        self.directions.push(motion.direction);

        if let Some(det) = det {
            self.detected_frames.push(det.frame_number);
            self.detected_frames_count += 1;
            self.continuous_detection_count += 1;
            self.continuous_undetection_count = 0;

            self.bboxes.push(det.bbox);
            self.centers.push(det.center);
            self.detection_confidences.push(det.confidence);
        } else {
            self.undetected_frames.push(frame_number);
            self.undetected_frames_count += 1;
            self.continuous_undetection_count += 1;
            self.continuous_detection_count = 0;

            self.bboxes.push(motion.bbox);
            self.centers.push(motion.center);
            self.detection_confidences.push(0.0);
        }
    }

    /// Set change the current counters call for, if any
    pub fn transition(&self, config: &TrackerConfig) -> Option<Transition> {
        let missed_too_long = self.continuous_undetection_count > config.remove_after as usize;

        if self.is_confirmed() {
            missed_too_long.then_some(Transition::Archive)
        } else if self.continuous_detection_count > config.promote_after as usize {
            Some(Transition::Promote)
        } else if missed_too_long {
            Some(Transition::Discard)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.id.is_some()
    }

    // records are never empty, they are born with one entry
    #[inline]
    pub fn last_bbox(&self) -> Rect {
        self.bboxes.last().copied().unwrap_or_default()
    }

    #[inline]
    pub fn last_center(&self) -> Point {
        self.centers.last().copied().unwrap_or_else(Point::origin)
    }

    #[inline]
    pub fn last_detection_confidence(&self) -> f32 {
        self.detection_confidences.last().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn last_frame(&self) -> Option<u64> {
        self.tracked_frames.last().copied()
    }

    #[inline]
    pub fn trajectory(&self) -> &[Point] {
        &self.centers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(frame: u64) -> Detection {
        Detection::new(frame, Rect::ltwh(10.0, 10.0, 20.0, 20.0), 0.9)
    }

    fn fresh() -> TrackRecord {
        TrackRecord::initialize(TrackHandle(7), 0, Color([1, 2, 3]), &det(0), 0.5)
    }

    fn hit(track: &mut TrackRecord, frame: u64) {
        let d = det(frame);
        let m = MotionUpdate::observed(track, &d, 1.0);
        track.update(frame, &m, Some(&d));
    }

    fn miss(track: &mut TrackRecord, frame: u64) {
        let m = MotionUpdate::compensated(track, 3);
        track.update(frame, &m, None);
    }

    fn assert_aligned(track: &TrackRecord) {
        let n = track.continuous_tracking_count;
        assert_eq!(track.tracked_frames.len(), n);
        assert_eq!(track.bboxes.len(), n);
        assert_eq!(track.centers.len(), n);
        assert_eq!(track.track_confidences.len(), n);
        assert_eq!(track.detection_confidences.len(), n);
        assert_eq!(track.distances.len(), n);
        assert_eq!(track.speeds.len(), n);
        assert_eq!(track.scales.len(), n);
        assert_eq!(track.directions.len(), n);
        assert_eq!(
            track.detected_frames.len() + track.undetected_frames.len(),
            track.tracked_frames.len()
        );
    }

    #[test]
    fn test_initialize() {
        let track = fresh();

        assert_eq!(track.handle, TrackHandle(7));
        assert_eq!(track.id, None);
        assert!(!track.is_confirmed());
        assert_eq!(track.tracked_frames, vec![0]);
        assert_eq!(track.continuous_tracking_count, 1);
        assert_eq!(track.detected_frames_count, 1);
        assert_eq!(track.continuous_detection_count, 0);
        assert_eq!(track.track_confidences, vec![0.5]);
        assert_eq!(track.detection_confidences, vec![0.9]);
        assert_eq!(track.distances, vec![0.0]);
        assert_eq!(track.color, Color([1, 2, 3]));
        assert_aligned(&track);
    }

    #[test]
    fn test_hit_and_miss_counters() {
        let mut track = fresh();

        hit(&mut track, 1);
        hit(&mut track, 2);
        assert_eq!(track.continuous_detection_count, 2);
        assert_eq!(track.detected_frames_count, 3);

        miss(&mut track, 3);
        miss(&mut track, 4);
        assert_eq!(track.continuous_detection_count, 0);
        assert_eq!(track.continuous_undetection_count, 2);
        assert_eq!(track.undetected_frames, vec![3, 4]);
        assert_eq!(track.last_detection_confidence(), 0.0);
        assert_eq!(track.last_bbox(), Rect::ltwh(10.0, 10.0, 20.0, 20.0));

        hit(&mut track, 5);
        assert_eq!(track.continuous_detection_count, 1);
        assert_eq!(track.continuous_undetection_count, 0);
        assert_eq!(track.undetected_frames_count, 2);
        assert_eq!(track.continuous_tracking_count, 6);
        assert_eq!(track.tracked_frames, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(track.last_frame(), Some(5));
        assert_aligned(&track);
    }

    #[test]
    fn test_track_confidence_comes_from_motion() {
        let mut track = fresh();
        hit(&mut track, 1);
        miss(&mut track, 2);

        assert_eq!(track.track_confidences, vec![0.5, 1.0, 0.0]);
    }

    #[test]
    fn test_transitions() {
        let config = TrackerConfig::default();
        let mut track = fresh();

        for frame in 1..=5 {
            hit(&mut track, frame);
            assert_eq!(track.transition(&config), None);
        }
        hit(&mut track, 6);
        assert_eq!(track.transition(&config), Some(Transition::Promote));

        track.id = Some(0);
        assert_eq!(track.transition(&config), None);

        for frame in 7..=21 {
            miss(&mut track, frame);
            assert_eq!(track.transition(&config), None);
        }
        miss(&mut track, 22);
        assert_eq!(track.transition(&config), Some(Transition::Archive));
    }

    #[test]
    fn test_provisional_discard() {
        let config = TrackerConfig::default();
        let mut track = fresh();

        for frame in 1..=15 {
            miss(&mut track, frame);
        }
        assert_eq!(track.transition(&config), None);

        miss(&mut track, 16);
        assert_eq!(track.transition(&config), Some(Transition::Discard));
        assert_aligned(&track);
    }
}
