// File: crates/xychart-core/src/types.rs
// Summary: Shared constants (default canvas size, insets, dpr).

/// Default canvas width in CSS pixels.
pub const WIDTH: i32 = 1024;
/// Default canvas height in CSS pixels.
pub const HEIGHT: i32 = 640;
/// Default device pixel ratio.
pub const DPR: f32 = 1.0;

/// Margins around the plotting box, in CSS pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(72, 24, 24, 56)
    }
}
