//! Anti-aliased thick segments by signed distance.
//!
//! Each pixel of the segment's bounding box is projected onto the segment;
//! the distance from the pixel center to the nearest point of the segment
//! decides its coverage through a one-pixel-wide ramp centered on the stroke
//! edge. Only the bounding box (grown by the radius plus one pixel for the
//! ramp) is visited, so cost follows stroke area rather than surface area.
//!
//! Pixel centers sit on integer coordinates, matching the scanline fills: a
//! width-1 horizontal segment covers exactly its own row.

use crate::basics::{clip_to_bounds, iceil, ifloor, Area, PointI};
use crate::color::{multiply, PixelColor, ALPHA_MIN};
use crate::stroke::Dash;
use crate::surface::Surface;

/// Segments shorter than this draw nothing.
pub const LENGTH_EPSILON: f32 = 1e-4;

/// Projection parameter of `(x, y)` along unit direction `(ux, uy)` from
/// `(x1, y1)`, clamped onto the segment `[0, len]`.
#[inline]
fn segment_param(x1: f32, y1: f32, ux: f32, uy: f32, len: f32, x: f32, y: f32) -> f32 {
    ((x - x1) * ux + (y - y1) * uy).clamp(0.0, len)
}

/// Coverage of a pixel whose center is `dist` away from the segment.
#[inline]
pub fn coverage(radius: f32, dist: f32) -> f32 {
    (radius + 0.5 - dist).clamp(0.0, 1.0)
}

/// Draw the segment `p1`-`p2` with the given thickness and anti-aliased edges.
///
/// Coverage is scaled by `alpha` before blending. Pixels outside `clip` or
/// the surface are never visited. With a `dash`, pixels whose projection
/// falls in an off interval are skipped.
pub fn draw_thick_line<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    p1: PointI,
    p2: PointI,
    thickness: i32,
    color: C,
    alpha: u8,
    clip: &Area,
    dash: Option<&Dash>,
) {
    if thickness <= 0 || alpha == ALPHA_MIN {
        return;
    }
    let (x1, y1) = (p1.x as f32, p1.y as f32);
    let (x2, y2) = (p2.x as f32, p2.y as f32);
    let dx = x2 - x1;
    let dy = y2 - y1;
    let len = (dx * dx + dy * dy).sqrt();
    if len < LENGTH_EPSILON {
        return;
    }
    let ux = dx / len;
    let uy = dy / len;
    let radius = thickness as f32 * 0.5;

    let bbox = Area::new(
        ifloor(x1.min(x2) - radius - 1.0),
        ifloor(y1.min(y2) - radius - 1.0),
        iceil(x1.max(x2) + radius + 1.0),
        iceil(y1.max(y2) + radius + 1.0),
    );
    let Some(clip) = surf.clip(clip).and_then(|c| clip_to_bounds(&c, &bbox)) else {
        log::trace!("thick line {:?}-{:?} outside clip", p1, p2);
        return;
    };

    for y in clip.y1..=clip.y2 {
        let fy = y as f32;
        for x in clip.x1..=clip.x2 {
            let fx = x as f32;
            let t = segment_param(x1, y1, ux, uy, len, fx, fy);
            if let Some(d) = dash {
                if !d.is_on(t as u32) {
                    continue;
                }
            }
            let ex = fx - (x1 + t * ux);
            let ey = fy - (y1 + t * uy);
            let cov = coverage(radius, (ex * ex + ey * ey).sqrt());
            if cov > 0.0 {
                let a = multiply((cov * 255.0) as u8, alpha);
                surf.blend_pixel(x, y, color, a);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
