use serde_derive::{Deserialize, Serialize};

use nalgebra as na;

use crate::bbox::{Point, Rect};
use crate::error::Error;

// relative, absorbs rounding of centers that went through serialization
const CENTER_TOLERANCE: f32 = 1e-4;

/// Detector output: (x,y) of the center and (width,height) of bbox in
/// source-frame pixels
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawDetection {
    #[serde(rename = "l", default)]
    pub label: String,
    #[serde(rename = "p")]
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RawDetection {
    pub fn new(label: impl Into<String>, confidence: f32, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            label: label.into(),
            confidence,
            x,
            y,
            w,
            h,
        }
    }

    #[inline(always)]
    pub fn bbox(&self) -> Rect {
        Rect::from_center(self.x, self.y, self.w, self.h)
    }
}

/// Detection of a single object on a single frame
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub frame_number: u64,
    pub bbox: Rect,
    pub center: Point,
    pub confidence: f32,
}

impl Detection {
    #[inline]
    pub fn new(frame_number: u64, bbox: Rect, confidence: f32) -> Self {
        Self {
            frame_number,
            bbox,
            center: bbox.center(),
            confidence,
        }
    }

    /// Checks a detector output and converts it; `index` is only used for
    /// error reporting
    pub fn from_raw(frame_number: u64, index: usize, raw: &RawDetection) -> Result<Self, Error> {
        Self::checked(frame_number, index, raw.bbox(), raw.confidence)
    }

    pub fn checked(
        frame_number: u64,
        index: usize,
        bbox: Rect,
        confidence: f32,
    ) -> Result<Self, Error> {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(Error::InvalidConfidence {
                frame: frame_number,
                index,
                confidence,
            });
        }

        let finite = bbox.is_finite() && bbox.area().is_finite();
        if !finite || bbox.width < 0.0 || bbox.height < 0.0 {
            return Err(Error::InvalidBox {
                frame: frame_number,
                index,
            });
        }

        Ok(Self::new(frame_number, bbox, confidence))
    }

    /// Checks an already built detection against the frame it is fed with.
    ///
    /// Besides the checks of [`Detection::checked`], the detection must belong
    /// to `frame_number` and its center must be the center of its box.
    pub fn validate(&self, frame_number: u64, index: usize) -> Result<(), Error> {
        if self.frame_number != frame_number {
            return Err(Error::FrameMismatch {
                frame: frame_number,
                index,
                detection_frame: self.frame_number,
            });
        }

        let expected = Self::checked(frame_number, index, self.bbox, self.confidence)?;

        let scale = expected.center.x.abs().max(expected.center.y.abs()).max(1.0);

        // NaN centers fail the comparison too
        let offset = na::distance(&self.center, &expected.center);
        if !(offset <= CENTER_TOLERANCE * scale) {
            return Err(Error::InvalidBox {
                frame: frame_number,
                index,
            });
        }

        Ok(())
    }
}
