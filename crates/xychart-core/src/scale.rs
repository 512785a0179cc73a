// File: crates/xychart-core/src/scale.rs
// Summary: Linear value <-> pixel transforms for the X and per-unit Y scales.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Values grow to the right.
    Horizontal,
    /// Values grow upwards; position 0 is the top (max value).
    Vertical,
}

/// One data scale. Positions are measured from the start of the plotting
/// box along the scale's orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale {
    pub min: f64,
    pub max: f64,
    pub orientation: Orientation,
}

impl Scale {
    pub fn new_linear(min: f64, max: f64, orientation: Orientation) -> Self {
        let max = if (max - min).abs() < 1e-9 { min + 1.0 } else { max };
        Self { min, max, orientation }
    }

    /// Linear scale over an observed `(min, max)`, `[0, 1]` when nothing was observed.
    pub fn auto(range: Option<(f64, f64)>, orientation: Orientation) -> Self {
        let (min, max) = range.unwrap_or((0.0, 1.0));
        Self::new_linear(min, max, orientation)
    }

    #[inline]
    fn fraction(&self, v: f64) -> f64 {
        (v - self.min) / (self.max - self.min).max(1e-12)
    }

    #[inline]
    fn from_fraction(&self, f: f64) -> f64 {
        self.min + f * (self.max - self.min)
    }

    /// Pixel position of `v` along a box of length `dim` starting at `off`.
    #[inline]
    pub fn val_to_pos(&self, v: f64, dim: f32, off: f32) -> f32 {
        let f = self.fraction(v) as f32;
        match self.orientation {
            Orientation::Horizontal => off + f * dim,
            Orientation::Vertical => off + (1.0 - f) * dim,
        }
    }

    /// Inverse of [`Scale::val_to_pos`] with `off = 0`.
    #[inline]
    pub fn pos_to_val(&self, pos: f32, dim: f32) -> f64 {
        let dim = dim.max(1.0);
        let f = match self.orientation {
            Orientation::Horizontal => pos / dim,
            Orientation::Vertical => 1.0 - pos / dim,
        };
        self.from_fraction(f as f64)
    }
}
