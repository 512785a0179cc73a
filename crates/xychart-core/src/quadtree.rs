// File: crates/xychart-core/src/quadtree.rs
// Summary: Quadtree over axis-aligned hit rectangles in plot-local device pixels.
// Notes:
// - Rebuilt every draw cycle, so there is no removal: `clear` and re-insert.
// - A rect lives at the shallowest node whose bounds fully contain it; rects
//   straddling a split line (or outside the root) stay at the parent.

/// Rects a node holds before it splits.
pub const MAX_OBJECTS: usize = 10;
/// Maximum depth below the root.
pub const MAX_LEVELS: u8 = 4;

/// Bounding box of one drawn point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    /// Plot slot of the series (scatter index + 1).
    pub series_index: usize,
    pub data_index: usize,
}

impl HitRect {
    #[inline]
    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        point_within(px, py, self.x, self.y, self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    fn intersects(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        overlaps(self.x, self.y, self.w, self.h, x, y, w, h)
    }
}

/// Closed-interval point-in-box test.
#[inline]
pub fn point_within(px: f32, py: f32, left: f32, top: f32, right: f32, bottom: f32) -> bool {
    px >= left && px <= right && py >= top && py <= bottom
}

#[inline]
#[allow(clippy::too_many_arguments)]
fn overlaps(ax: f32, ay: f32, aw: f32, ah: f32, bx: f32, by: f32, bw: f32, bh: f32) -> bool {
    ax <= bx + bw && ax + aw >= bx && ay <= by + bh && ay + ah >= by
}

#[derive(Clone, Debug)]
pub struct Quadtree {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    level: u8,
    rects: Vec<HitRect>,
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::with_level(x, y, w, h, 0)
    }

    fn with_level(x: f32, y: f32, w: f32, h: f32, level: u8) -> Self {
        Self { x, y, w, h, level, rects: Vec::new(), children: None }
    }

    pub fn bounds(&self) -> (f32, f32, f32, f32) { (self.x, self.y, self.w, self.h) }

    /// Move the root to new bounds, dropping all rects.
    pub fn reset(&mut self, x: f32, y: f32, w: f32, h: f32) {
        *self = Self::new(x, y, w, h);
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.children = None;
    }

    /// Total rects stored in this subtree.
    pub fn len(&self) -> usize {
        self.rects.len() + self.children.as_ref().map_or(0, |c| c.iter().map(Quadtree::len).sum())
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn insert(&mut self, rect: HitRect) {
        let quadrant = self.quadrant_of(&rect);
        if let (Some(children), Some(q)) = (self.children.as_mut(), quadrant) {
            children[q].insert(rect);
            return;
        }
        self.rects.push(rect);
        if self.children.is_none() && self.rects.len() > MAX_OBJECTS && self.level < MAX_LEVELS {
            self.split();
        }
    }

    /// Visit every rect intersecting the query window. Exact hit tests are the
    /// caller's job.
    pub fn query(&self, x: f32, y: f32, w: f32, h: f32, mut visit: impl FnMut(&HitRect)) {
        self.query_into(x, y, w, h, &mut visit);
    }

    fn query_into<F: FnMut(&HitRect)>(&self, x: f32, y: f32, w: f32, h: f32, visit: &mut F) {
        for r in self.rects.iter().filter(|r| r.intersects(x, y, w, h)) {
            visit(r);
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                if overlaps(child.x, child.y, child.w, child.h, x, y, w, h) {
                    child.query_into(x, y, w, h, visit);
                }
            }
        }
    }

    fn split(&mut self) {
        let (hw, hh) = (self.w / 2.0, self.h / 2.0);
        let (x, y, l) = (self.x, self.y, self.level + 1);
        self.children = Some(Box::new([
            Quadtree::with_level(x, y, hw, hh, l),
            Quadtree::with_level(x + hw, y, hw, hh, l),
            Quadtree::with_level(x, y + hh, hw, hh, l),
            Quadtree::with_level(x + hw, y + hh, hw, hh, l),
        ]));
        let rects = std::mem::take(&mut self.rects);
        for r in rects {
            self.insert(r);
        }
    }

    /// Child quadrant fully containing `r`, if any.
    fn quadrant_of(&self, r: &HitRect) -> Option<usize> {
        let (mx, my) = (self.x + self.w / 2.0, self.y + self.h / 2.0);
        let left = r.x >= self.x && r.x + r.w <= mx;
        let right = r.x >= mx && r.x + r.w <= self.x + self.w;
        let top = r.y >= self.y && r.y + r.h <= my;
        let bottom = r.y >= my && r.y + r.h <= self.y + self.h;
        match (left, right, top, bottom) {
            (true, _, true, _) => Some(0),
            (_, true, true, _) => Some(1),
            (true, _, _, true) => Some(2),
            (_, true, _, true) => Some(3),
            _ => None,
        }
    }
}
