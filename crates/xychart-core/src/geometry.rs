// File: crates/xychart-core/src/geometry.rs
// Summary: Plotting-box geometry in device pixels.

use skia_safe as skia;

use crate::types::Insets;

/// Plotting area in device pixels (canvas size times dpr, minus insets).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl BBox {
    pub const fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    /// Plot box for a `width x height` CSS-pixel canvas at `dpr`.
    pub fn from_canvas(width: i32, height: i32, insets: &Insets, dpr: f32) -> Self {
        let w = (width - insets.hsum() as i32).max(1) as f32;
        let h = (height - insets.vsum() as i32).max(1) as f32;
        Self::from_ltwh(insets.left as f32 * dpr, insets.top as f32 * dpr, w * dpr, h * dpr)
    }

    pub fn right(&self) -> f32 { self.left + self.width }
    pub fn bottom(&self) -> f32 { self.top + self.height }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right() && y >= self.top && y <= self.bottom()
    }

    pub fn to_rect(&self) -> skia::Rect {
        skia::Rect::from_xywh(self.left, self.top, self.width, self.height)
    }
}
