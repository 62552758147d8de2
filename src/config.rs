use serde_derive::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    /// Minimal IOU for a track-detection pair to be matched
    pub iou_threshold: f32,

    /// Provisional track is confirmed once its run of detections exceeds this
    pub promote_after: u32,

    /// Track is dropped once its run of misses exceeds this
    pub remove_after: u32,

    /// Tracking confidence recorded on the first frame of a track
    pub initial_track_confidence: f32,

    /// Number of older history entries averaged while compensating a miss
    pub compensation_history: usize,

    /// Detections below this confidence are ignored, `None` keeps all of them
    pub min_detection_confidence: Option<f32>,

    pub color_seed: u64,
}

impl TrackerConfig {
    pub fn new(iou_threshold: f32, promote_after: u32, remove_after: u32) -> Self {
        Self {
            iou_threshold,
            promote_after,
            remove_after,
            ..Default::default()
        }
    }

    pub fn with_min_detection_confidence(mut self, confidence: f32) -> Self {
        self.min_detection_confidence = Some(confidence);
        self
    }

    pub fn with_color_seed(mut self, seed: u64) -> Self {
        self.color_seed = seed;
        self
    }

    pub fn with_compensation_history(mut self, n: usize) -> Self {
        self.compensation_history = n;
        self
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            iou_threshold: 0.1,
            promote_after: 5,
            remove_after: 15,
            initial_track_confidence: 0.5,
            compensation_history: 3,
            min_detection_confidence: None,
            color_seed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TrackerConfig =
            serde_json::from_str(r#"{"iou_threshold": 0.3, "remove_after": 30}"#).unwrap();

        assert_eq!(config.iou_threshold, 0.3);
        assert_eq!(config.remove_after, 30);
        assert_eq!(config.promote_after, 5);
        assert_eq!(config.min_detection_confidence, None);
    }

    #[test]
    fn test_builder() {
        let config = TrackerConfig::new(0.2, 3, 10)
            .with_min_detection_confidence(0.5)
            .with_color_seed(42);

        assert_eq!(config.promote_after, 3);
        assert_eq!(config.min_detection_confidence, Some(0.5));
        assert_eq!(config.color_seed, 42);
        assert_eq!(config.initial_track_confidence, 0.5);
    }
}
