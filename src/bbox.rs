use nalgebra as na;
use serde_derive::{Deserialize, Serialize};

pub type Point = na::Point2<f32>;

/// Left-top-width-height box in image pixels
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    #[inline]
    pub fn ltwh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a box from the coordinates of its center and its width-height
    #[inline]
    pub fn from_center(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::ltwh(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    #[inline(always)]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline(always)]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline(always)]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let w = self.right().min(other.right()) - x;
        let h = self.bottom().min(other.bottom()) - y;

        Self::clamped(x, y, w, h)
    }

    /// Smallest rectangle enclosing both boxes
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let w = self.right().max(other.right()) - x;
        let h = self.bottom().max(other.bottom()) - y;

        Self::clamped(x, y, w, h)
    }

    /// 0 for an empty union, and for boxes so large their areas overflow
    pub fn iou(&self, other: &Rect) -> f32 {
        let union_area = self.union(other).area();
        if union_area > 0.0 {
            let iou = self.intersection(other).area() / union_area;
            if iou.is_finite() {
                iou
            } else {
                0.0
            }
        } else {
            0.0
        }
    }

    #[inline]
    fn clamped(x: f32, y: f32, w: f32, h: f32) -> Rect {
        if w < 0.0 || h < 0.0 {
            Rect::EMPTY
        } else {
            Rect::ltwh(x, y, w, h)
        }
    }
}

impl From<Rect> for [f32; 4] {
    fn from(r: Rect) -> Self {
        [r.x, r.y, r.width, r.height]
    }
}
