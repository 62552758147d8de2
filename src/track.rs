use serde_derive::{Deserialize, Serialize};

use crate::bbox::Rect;
use crate::record::TrackRecord;

/// Reported state of a confirmed track on the current frame
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub track_id: u32,

    // detection confidence of the latest frame, 0 when it was compensated
    pub confidence: f32,
    pub bbox: Rect,
}

impl Track {
    /// `None` for provisional records
    pub fn from_record(record: &TrackRecord) -> Option<Self> {
        Some(Self {
            track_id: record.id?,
            confidence: record.last_detection_confidence(),
            bbox: record.last_bbox(),
        })
    }
}
