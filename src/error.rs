use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Frame Order Error: frame {current} does not follow frame {previous}")]
    FrameOrder { previous: u64, current: u64 },

    #[error("Invalid Confidence: detection #{index} of frame {frame} has confidence {confidence}")]
    InvalidConfidence {
        frame: u64,
        index: usize,
        confidence: f32,
    },

    #[error("Invalid Box: detection #{index} of frame {frame} is not a finite non-negative box")]
    InvalidBox { frame: u64, index: usize },

    #[error("Frame Mismatch: detection #{index} belongs to frame {detection_frame}, not {frame}")]
    FrameMismatch {
        frame: u64,
        index: usize,
        detection_frame: u64,
    },
}
