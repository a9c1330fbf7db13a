//! Stroke entry point.
//!
//! [`draw_stroke`] is the one place a widget asks for a line. Axis-aligned
//! strokes are scanline fills; anything else goes to the rasterizer the
//! [`LineAa`] policy names. A [`Dash`] pattern applies to every path and is
//! measured in pixels from the start point.

use crate::basics::{PointI, AREA_MAX};
use crate::color::{PixelColor, ALPHA_MAX};
use crate::line_sdf::draw_thick_line;
use crate::renderer_primitives::{draw_aliased_line, fill_h_run, fill_v_run, LineBresenham};
use crate::surface::Surface;

// ============================================================================
// Style
// ============================================================================

/// Edge treatment for strokes that are not axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineAa {
    /// Signed-distance coverage with a one-pixel ramp.
    #[default]
    Sdf,
    /// Whole pixels along a Bresenham center line.
    None,
}

/// On/off pattern along a stroke, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dash {
    pub on: u32,
    pub off: u32,
}

impl Default for Dash {
    fn default() -> Self {
        Self { on: 5, off: 5 }
    }
}

impl Dash {
    pub const fn new(on: u32, off: u32) -> Self {
        Self { on, off }
    }

    #[inline]
    fn period(&self) -> u32 {
        self.on.saturating_add(self.off)
    }

    /// True if the pixel `pos` steps from the start of the stroke is drawn.
    #[inline]
    pub fn is_on(&self, pos: u32) -> bool {
        match (self.on, self.off) {
            (0, _) => false,
            (_, 0) => true,
            _ => pos % self.period() < self.on,
        }
    }

    /// Inclusive step ranges that are drawn between steps `first` and `last`.
    ///
    /// Steps count from the start of the stroke, so the phase does not depend
    /// on `first`. Only the periods overlapping `first..=last` are visited.
    pub fn on_runs(&self, first: u32, last: u32) -> impl Iterator<Item = (u32, u32)> {
        let (on, period) = match self.off {
            0 => (u32::MAX, u32::MAX),
            _ => (self.on, self.period()),
        };
        let begin = first - first % period;
        let runs = if self.on == 0 { 0 } else { usize::MAX };
        (begin..=last)
            .step_by(period as usize)
            .take(runs)
            .filter_map(move |s| {
                let e = s.saturating_add(on - 1).min(last);
                let s = s.max(first);
                (s <= e).then_some((s, e))
            })
    }
}

/// Everything about a stroke except its geometry and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeStyle {
    pub width: i32,
    pub alpha: u8,
    pub aa: LineAa,
    pub dash: Option<Dash>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1,
            alpha: ALPHA_MAX,
            aa: LineAa::Sdf,
            dash: None,
        }
    }
}

/// A line as widgets describe it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineDesc<C> {
    pub start: PointI,
    pub end: PointI,
    pub width: i32,
    pub color: C,
    pub alpha: u8,
}

// ============================================================================
// Entry points
// ============================================================================

/// Draw `desc` with the default edge policy and no dash.
///
/// Horizontal lines fill `width` rows downward from `start.y`, vertical
/// lines fill `width` columns rightward from `start.x`, and diagonals are
/// anti-aliased.
pub fn draw_line<C: PixelColor>(surf: &mut Surface<'_, C>, desc: &LineDesc<C>) {
    let style = StrokeStyle {
        width: desc.width,
        alpha: desc.alpha,
        ..StrokeStyle::default()
    };
    draw_stroke(surf, desc.start, desc.end, desc.color, &style);
}

/// Draw the segment `start`-`end` in `color` using `style`.
pub fn draw_stroke<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    start: PointI,
    end: PointI,
    color: C,
    style: &StrokeStyle,
) {
    if style.width <= 0 {
        return;
    }
    let w = style.width;
    let a = style.alpha;

    if start.y == end.y {
        match style.dash {
            None => fill_h_run(surf, start.y, start.x, end.x, w, color, a),
            Some(d) => {
                let path = LineBresenham::new(start, end);
                let Some((first, last)) = path.steps_within(&surf.bounds()) else {
                    return;
                };
                for (s, e) in d.on_runs(first, last) {
                    let (p, q) = (path.point(s), path.point(e));
                    fill_h_run(surf, start.y, p.x, q.x, w, color, a);
                }
            }
        }
    } else if start.x == end.x {
        match style.dash {
            None => fill_v_run(surf, start.x, start.y, end.y, w, color, a),
            Some(d) => {
                let path = LineBresenham::new(start, end);
                let Some((first, last)) = path.steps_within(&surf.bounds()) else {
                    return;
                };
                for (s, e) in d.on_runs(first, last) {
                    let (p, q) = (path.point(s), path.point(e));
                    fill_v_run(surf, start.x, p.y, q.y, w, color, a);
                }
            }
        }
    } else {
        let clip = surf.bounds();
        let dash = style.dash.as_ref();
        match style.aa {
            LineAa::Sdf => draw_thick_line(surf, start, end, w, color, a, &clip, dash),
            LineAa::None => draw_aliased_line(surf, start, end, w, color, a, dash, &AREA_MAX),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
