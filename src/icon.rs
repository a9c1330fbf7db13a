//! Icon blitter: nearest-neighbor scaled draw of a one-byte-per-pixel icon.
//!
//! Icon samples carry their own opacity in bit 7; the low seven bits are an
//! RGB322 color. Samples without the opacity bit are skipped entirely.

use crate::basics::{clip_to_bounds, Area};
use crate::color::{blend, from_rgb322, PixelColor};
use crate::error::RenderError;
use crate::fixed::ScaleQ10;
use crate::surface::Surface;

/// Bit 7 of an icon sample: the sample is drawn.
pub const ICON_OPAQUE: u8 = 0x80;

/// A borrowed icon bitmap, row-major, one byte per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Icon<'a> {
    width: u16,
    height: u16,
    bitmap: &'a [u8],
}

impl<'a> Icon<'a> {
    /// Wrap `bitmap`, which must hold at least `width * height` samples.
    pub fn new(width: u16, height: u16, bitmap: &'a [u8]) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if bitmap.len() < expected {
            return Err(RenderError::TruncatedPixmap {
                expected,
                actual: bitmap.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bitmap,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn sample(&self, x: u32, y: u32) -> u8 {
        self.bitmap[y as usize * self.width as usize + x as usize]
    }
}

/// Draw `icon` stretched over `coords`, limited to `area`.
///
/// `coords` is where the whole icon lands on screen; its size may differ
/// from the icon's, in which case each axis is resampled independently.
/// Only the part of `coords` inside both `area` and the surface is written.
pub fn blit_icon<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    area: &Area,
    coords: &Area,
    icon: &Icon<'_>,
    alpha: u8,
) {
    if icon.width == 0 || icon.height == 0 {
        return;
    }
    let Some(clip) = clip_to_bounds(area, coords).and_then(|c| surf.clip(&c)) else {
        log::trace!("icon at {:?} outside clip {:?}", coords, area);
        return;
    };
    let (Some(scale_x), Some(scale_y)) = (
        ScaleQ10::ratio(icon.width as u32, coords.width()),
        ScaleQ10::ratio(icon.height as u32, coords.height()),
    ) else {
        return;
    };

    for y in clip.y1..=clip.y2 {
        let sy = scale_y.apply(y.abs_diff(coords.y1));
        let span = surf.span_mut(&clip, y);
        for (px, x) in span.iter_mut().zip(clip.x1..) {
            let sx = scale_x.apply(x.abs_diff(coords.x1));
            let s = icon.sample(sx, sy);
            if s & ICON_OPAQUE != 0 {
                *px = blend(from_rgb322(s), *px, alpha);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
