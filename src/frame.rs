use serde_derive::{Deserialize, Serialize};

use crate::detection::RawDetection;

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Frame {
    pub number: u64,
    pub detections: Vec<RawDetection>,
}

impl Frame {
    #[inline]
    pub fn new(number: u64, detections: Vec<RawDetection>) -> Self {
        Self { number, detections }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.detections.len()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &RawDetection> {
        self.detections.iter()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}
