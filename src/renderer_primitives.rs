//! Solid primitives: axis-aligned runs, rectangles, and aliased Bresenham
//! strokes.
//!
//! Everything here writes whole pixels with a uniform alpha. Each routine
//! clips the requested shape against the surface first and returns without
//! touching memory when nothing is left.

use crate::basics::{Area, PointI};
use crate::color::PixelColor;
use crate::stroke::Dash;
use crate::surface::Surface;

// ============================================================================
// Runs and rectangles
// ============================================================================

/// Fill a horizontal run `thickness` rows tall whose top row is `y`.
///
/// Covers columns `min(x1, x2)..=max(x1, x2)` and rows `y..y + thickness`,
/// saturating at `i32::MAX`. A thickness of zero or less draws nothing.
pub fn fill_h_run<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    y: i32,
    x1: i32,
    x2: i32,
    thickness: i32,
    color: C,
    alpha: u8,
) {
    if thickness <= 0 {
        return;
    }
    let area = Area::new(x1, y, x2, y.saturating_add(thickness - 1)).normalized();
    fill_rect(surf, &area, color, alpha);
}

/// Fill a vertical run `thickness` columns wide whose left column is `x`.
///
/// Covers rows `min(y1, y2)..=max(y1, y2)` and columns `x..x + thickness`,
/// saturating at `i32::MAX`. A thickness of zero or less draws nothing.
pub fn fill_v_run<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    x: i32,
    y1: i32,
    y2: i32,
    thickness: i32,
    color: C,
    alpha: u8,
) {
    if thickness <= 0 {
        return;
    }
    let area = Area::new(x, y1, x.saturating_add(thickness - 1), y2).normalized();
    fill_rect(surf, &area, color, alpha);
}

/// Blend `color` over every pixel of `area` that lies on the surface.
pub fn fill_rect<C: PixelColor>(surf: &mut Surface<'_, C>, area: &Area, color: C, alpha: u8) {
    if let Some(clip) = surf.clip(area) {
        surf.blend_area(&clip, color, alpha);
    }
}

// ============================================================================
// Bresenham
// ============================================================================

/// Integer Bresenham walk from `start` to `end`, both endpoints included.
///
/// Step `k` advances the major axis by `k` and the minor axis by
/// `k * dmin / dmaj` rounded to the nearest pixel, ties up. Any step can be
/// addressed directly, so a caller can visit only the steps inside its clip.
#[derive(Debug, Clone)]
pub struct LineBresenham {
    x0: i64,
    y0: i64,
    sx: i64,
    sy: i64,
    dmaj: u32,
    dmin: u32,
    ver: bool,
    next: u32,
    last: u32,
    done: bool,
}

impl LineBresenham {
    pub fn new(start: PointI, end: PointI) -> Self {
        let dx = start.x.abs_diff(end.x);
        let dy = start.y.abs_diff(end.y);
        let ver = dy > dx;
        let (dmaj, dmin) = if ver { (dy, dx) } else { (dx, dy) };
        Self {
            x0: start.x as i64,
            y0: start.y as i64,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            dmaj,
            dmin,
            ver,
            next: 0,
            last: dmaj,
            done: false,
        }
    }

    /// True if the line advances faster in y than in x.
    #[inline]
    pub fn is_ver(&self) -> bool {
        self.ver
    }

    /// Number of steps after the first; the walk yields `steps() + 1` points.
    #[inline]
    pub fn steps(&self) -> u32 {
        self.dmaj
    }

    /// Point reached after `k` steps. `k` must not exceed [`LineBresenham::steps`].
    pub fn point(&self, k: u32) -> PointI {
        debug_assert!(k <= self.dmaj);
        let minor = if self.dmaj == 0 {
            0
        } else {
            let num = 2 * k as u128 * self.dmin as u128 + self.dmaj as u128;
            (num / (2 * self.dmaj as u128)) as i64
        };
        let (mx, my) = if self.ver {
            (minor, k as i64)
        } else {
            (k as i64, minor)
        };
        // Every step lies between the two i32 endpoints.
        PointI::new(
            (self.x0 + self.sx * mx) as i32,
            (self.y0 + self.sy * my) as i32,
        )
    }

    /// Inclusive range of steps whose major coordinate lies inside `clip`.
    pub fn steps_within(&self, clip: &Area) -> Option<(u32, u32)> {
        let (origin, dir, lo, hi) = if self.ver {
            (self.y0, self.sy, clip.y1 as i64, clip.y2 as i64)
        } else {
            (self.x0, self.sx, clip.x1 as i64, clip.x2 as i64)
        };
        let (a, b) = if dir > 0 {
            (lo - origin, hi - origin)
        } else {
            (origin - hi, origin - lo)
        };
        let first = a.max(0);
        let last = b.min(self.dmaj as i64);
        (first <= last).then(|| (first as u32, last as u32))
    }

    /// Restrict the walk to steps `first..=last`.
    pub fn restrict(mut self, first: u32, last: u32) -> Self {
        self.next = first;
        self.last = last.min(self.dmaj);
        self.done = first > self.last;
        self
    }
}

impl Iterator for LineBresenham {
    type Item = PointI;

    fn next(&mut self) -> Option<PointI> {
        if self.done {
            return None;
        }
        let p = self.point(self.next);
        if self.next == self.last {
            self.done = true;
        } else {
            self.next += 1;
        }
        Some(p)
    }
}

/// Aliased stroke: a Bresenham center line widened across its minor axis.
///
/// Each step paints `width` pixels perpendicular to the major axis, centered
/// on the center line (the extra pixel of an even width goes up/left). Steps
/// for which `dash` is off are skipped; the dash counts steps from `start`.
/// Only steps and offsets inside `clip` and the surface are visited.
pub fn draw_aliased_line<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    start: PointI,
    end: PointI,
    width: i32,
    color: C,
    alpha: u8,
    dash: Option<&Dash>,
    clip: &Area,
) {
    if width <= 0 {
        return;
    }
    let Some(clip) = surf.clip(clip) else {
        return;
    };
    let line = LineBresenham::new(start, end);
    let Some((first, last)) = line.steps_within(&clip) else {
        log::trace!("aliased line {:?}-{:?} outside clip", start, end);
        return;
    };
    let ver = line.is_ver();
    let lo = -(width as i64 / 2);
    let hi = lo + width as i64 - 1;
    let (cmin, cmax) = if ver {
        (clip.x1 as i64, clip.x2 as i64)
    } else {
        (clip.y1 as i64, clip.y2 as i64)
    };

    for k in first..=last {
        if dash.is_some_and(|d| !d.is_on(k)) {
            continue;
        }
        let p = line.point(k);
        let (major, minor) = if ver { (p.y, p.x) } else { (p.x, p.y) };
        let w1 = (minor as i64 + lo).max(cmin);
        let w2 = (minor as i64 + hi).min(cmax);
        for m in w1..=w2 {
            let m = m as i32;
            let (px, py) = if ver { (m, major) } else { (major, m) };
            surf.blend_pixel(px, py, color, alpha);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
