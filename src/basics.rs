//! Foundation types: rectangles, points, rounding helpers, and the clip
//! utility every rasterizer goes through before touching a pixel.

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Floor toward negative infinity.
#[inline]
pub fn ifloor(v: f32) -> i32 {
    let i = v as i32;
    i - (i as f32 > v) as i32
}

/// Ceiling toward positive infinity.
#[inline]
pub fn iceil(v: f32) -> i32 {
    let i = v as i32;
    i + ((i as f32) < v) as i32
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle defined by two inclusive corner points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect<T: Copy> {
    pub x1: T,
    pub y1: T,
    pub x2: T,
    pub y2: T,
}

impl<T: Copy + PartialOrd> Rect<T> {
    pub const fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Rectangle spanning two corners given in any order.
    pub fn normalized(mut self) -> Self {
        if self.x1 > self.x2 {
            core::mem::swap(&mut self.x1, &mut self.x2);
        }
        if self.y1 > self.y2 {
            core::mem::swap(&mut self.y1, &mut self.y2);
        }
        self
    }

    /// Clip this rectangle to the intersection with `r`.
    /// Returns `true` if the result is a valid (non-empty) rectangle.
    pub fn clip(&mut self, r: &Self) -> bool {
        if self.x2 > r.x2 {
            self.x2 = r.x2;
        }
        if self.y2 > r.y2 {
            self.y2 = r.y2;
        }
        if self.x1 < r.x1 {
            self.x1 = r.x1;
        }
        if self.y1 < r.y1 {
            self.y1 = r.y1;
        }
        self.is_valid()
    }

    /// Returns `true` if the rectangle is valid (non-empty).
    pub fn is_valid(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns `true` if the point (x, y) is inside the rectangle.
    pub fn hit_test(&self, x: T, y: T) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Returns `true` if this rectangle overlaps with `r`.
    pub fn overlaps(&self, r: &Self) -> bool {
        !(r.x1 > self.x2 || r.x2 < self.x1 || r.y1 > self.y2 || r.y2 < self.y1)
    }
}

impl Rect<i32> {
    /// Number of columns covered, or 0 when the rectangle is empty.
    ///
    /// Saturates at `u32::MAX` for the full `i32` range.
    pub fn width(&self) -> u32 {
        if self.x2 < self.x1 {
            0
        } else {
            self.x2.abs_diff(self.x1).saturating_add(1)
        }
    }

    /// Number of rows covered, or 0 when the rectangle is empty.
    pub fn height(&self) -> u32 {
        if self.y2 < self.y1 {
            0
        } else {
            self.y2.abs_diff(self.y1).saturating_add(1)
        }
    }

    /// Rectangle of `width` x `height` pixels with its top-left corner at (x, y).
    ///
    /// Empty when either extent is not positive. The far edges saturate at
    /// `i32::MAX`.
    pub fn from_origin(x: i32, y: i32, width: i32, height: i32) -> Self {
        if width <= 0 || height <= 0 {
            return AREA_INVALID;
        }
        Self::new(x, y, x.saturating_add(width - 1), y.saturating_add(height - 1))
    }
}

/// Rectangle with `i32` coordinates.
pub type RectI = Rect<i32>;

/// Inclusive pixel rectangle used for both shape placement and clip results.
pub type Area = RectI;

/// The widest area the 16-bit widget coordinate space can express.
pub const AREA_MAX: Area = Area::new(
    i16::MIN as i32,
    i16::MIN as i32,
    i16::MAX as i32,
    i16::MAX as i32,
);

/// An always-empty area.
pub const AREA_INVALID: Area = Area::new(1, 1, 0, 0);

// ============================================================================
// Clip utility
// ============================================================================

/// Intersect `candidate` with `outer`.
///
/// Returns the inclusive overlap, or `None` when nothing is left to draw.
/// Rasterizers call this before addressing any pixel.
#[inline]
pub fn clip_to_bounds(outer: &Area, candidate: &Area) -> Option<Area> {
    let mut r = *candidate;
    if r.clip(outer) {
        Some(r)
    } else {
        None
    }
}

/// Clip `area` against [`AREA_MAX`].
#[inline]
pub fn self_clip(area: &Area) -> Option<Area> {
    clip_to_bounds(&AREA_MAX, area)
}

// ============================================================================
// Point
// ============================================================================

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointBase<T: Copy> {
    pub x: T,
    pub y: T,
}

impl<T: Copy> PointBase<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

pub type PointI = PointBase<i32>;

// ============================================================================
// Tests
// ============================================================================
