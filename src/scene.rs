use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assignment::{greedy_assignment, iou_matrix};
use crate::bbox::Rect;
use crate::config::TrackerConfig;
use crate::detection::Detection;
use crate::error::Error;
use crate::frame::Frame;
use crate::motion::MotionUpdate;
use crate::record::{Color, TrackHandle, TrackRecord, Transition};
use crate::Track;

/// Tracks of a single video source.
///
/// The scene owns every record. Provisional tracks are kept in creation
/// order, confirmed ones in promotion order (which is also id order), and
/// archived confirmed tracks in the order they were retired.
#[derive(Debug)]
pub struct Scene {
    config: TrackerConfig,
    records: BTreeMap<TrackHandle, TrackRecord>,
    provisional: BTreeSet<TrackHandle>,
    confirmed: BTreeMap<u32, TrackHandle>,
    archived: Vec<TrackRecord>,
    next_handle: u64,
    next_id: u32,
    last_frame: Option<u64>,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: TrackerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.color_seed);

        Self {
            config,
            records: BTreeMap::new(),
            provisional: BTreeSet::new(),
            confirmed: BTreeMap::new(),
            archived: Vec::new(),
            next_handle: 0,
            next_id: 0,
            last_frame: None,
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Converts the detector output of a frame and tracks it
    pub fn track_frame(&mut self, frame: &Frame) -> Result<Vec<Track>, Error> {
        let detections = frame
            .iter()
            .enumerate()
            .map(|(index, raw)| Detection::from_raw(frame.number, index, raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| {
                log::warn!("rejecting frame {}: {}", frame.number, err);
                err
            })?;

        self.track(frame.number, &detections)
    }

    /// Associates the detections of one frame with the current tracks.
    ///
    /// Frame numbers must strictly increase between calls. On error the
    /// scene is left untouched.
    pub fn track(
        &mut self,
        frame_number: u64,
        detections: &[Detection],
    ) -> Result<Vec<Track>, Error> {
        if let Err(err) = self.validate(frame_number, detections) {
            log::warn!("rejecting frame {}: {}", frame_number, err);
            return Err(err);
        }
        self.last_frame = Some(frame_number);

        let detections: Vec<&Detection> = match self.config.min_detection_confidence {
            Some(min) => detections.iter().filter(|d| d.confidence >= min).collect(),
            None => detections.iter().collect(),
        };

        let pool: Vec<(TrackHandle, Rect)> = self
            .confirmed
            .values()
            .chain(self.provisional.iter())
            .filter_map(|h| Some((*h, self.records.get(h)?.last_bbox())))
            .collect();

        let track_boxes: Vec<Rect> = pool.iter().map(|(_, b)| *b).collect();
        let det_boxes: Vec<Rect> = detections.iter().map(|d| d.bbox).collect();
        let assignments = greedy_assignment(
            iou_matrix(&track_boxes, &det_boxes),
            self.config.iou_threshold,
        );

        let mut track_matched = vec![false; pool.len()];
        let mut det_matched = vec![false; detections.len()];

        for &(r, c, iou) in &assignments {
            track_matched[r] = true;
            det_matched[c] = true;

            self.update(pool[r].0, frame_number, Some((detections[c], iou)));
        }

        for (det, _) in detections.iter().zip(&det_matched).filter(|(_, m)| !**m) {
            self.spawn(frame_number, det);
        }

        for ((handle, _), _) in pool.iter().zip(&track_matched).filter(|(_, m)| !**m) {
            self.update(*handle, frame_number, None);
        }

        log::trace!(
            "frame {}: {} matched, {} spawned, {} compensated, {} confirmed, {} provisional",
            frame_number,
            assignments.len(),
            detections.len() - assignments.len(),
            pool.len() - assignments.len(),
            self.confirmed.len(),
            self.provisional.len(),
        );

        Ok(self.tracks())
    }

    /// Confirmed tracks as of the last processed frame
    pub fn tracks(&self) -> Vec<Track> {
        self.confirmed().filter_map(Track::from_record).collect()
    }

    pub fn confirmed(&self) -> impl Iterator<Item = &TrackRecord> {
        self.confirmed.values().filter_map(|h| self.records.get(h))
    }

    pub fn provisional(&self) -> impl Iterator<Item = &TrackRecord> {
        self.provisional.iter().filter_map(|h| self.records.get(h))
    }

    #[inline]
    pub fn archived(&self) -> &[TrackRecord] {
        &self.archived
    }

    #[inline]
    pub fn get(&self, handle: TrackHandle) -> Option<&TrackRecord> {
        self.records.get(&handle)
    }

    /// Looks a confirmed track up by its public id, active or archived
    pub fn find(&self, id: u32) -> Option<&TrackRecord> {
        self.confirmed
            .get(&id)
            .and_then(|h| self.records.get(h))
            .or_else(|| self.archived.iter().find(|t| t.id == Some(id)))
    }

    #[inline]
    pub fn last_frame(&self) -> Option<u64> {
        self.last_frame
    }

    /// Id the next promoted track will get
    #[inline]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    fn validate(&self, frame_number: u64, detections: &[Detection]) -> Result<(), Error> {
        if let Some(previous) = self.last_frame {
            if frame_number <= previous {
                return Err(Error::FrameOrder {
                    previous,
                    current: frame_number,
                });
            }
        }

        for (index, det) in detections.iter().enumerate() {
            det.validate(frame_number, index)?;
        }

        Ok(())
    }

    fn spawn(&mut self, frame_number: u64, det: &Detection) {
        let handle = TrackHandle(self.next_handle);
        self.next_handle += 1;

        let color = Color(self.rng.random());
        let record = TrackRecord::initialize(
            handle,
            frame_number,
            color,
            det,
            self.config.initial_track_confidence,
        );

        self.records.insert(handle, record);
        self.provisional.insert(handle);
    }

    fn update(
        &mut self,
        handle: TrackHandle,
        frame_number: u64,
        observed: Option<(&Detection, f32)>,
    ) {
        let Some(record) = self.records.get_mut(&handle) else {
            return;
        };

        let motion = match observed {
            Some((det, iou)) => MotionUpdate::observed(record, det, iou),
            None => MotionUpdate::compensated(record, self.config.compensation_history),
        };

        record.update(frame_number, &motion, observed.map(|(det, _)| det));

        if let Some(transition) = record.transition(&self.config) {
            self.apply(handle, frame_number, transition);
        }
    }

    fn apply(&mut self, handle: TrackHandle, frame_number: u64, transition: Transition) {
        match transition {
            Transition::Promote => {
                let Some(record) = self.records.get_mut(&handle) else {
                    return;
                };

                let id = self.next_id;
                self.next_id += 1;

                record.id = Some(id);
                self.provisional.remove(&handle);
                self.confirmed.insert(id, handle);

                log::debug!("frame {}: track {} confirmed", frame_number, id);
            }

            Transition::Discard => {
                self.provisional.remove(&handle);
                self.records.remove(&handle);

                log::debug!("frame {}: provisional track {:?} discarded", frame_number, handle);
            }

            Transition::Archive => {
                let Some(record) = self.records.remove(&handle) else {
                    return;
                };

                if let Some(id) = record.id {
                    self.confirmed.remove(&id);
                    log::debug!("frame {}: track {} archived", frame_number, id);
                }

                self.archived.push(record);
            }
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
