//! Surface: a borrowed, clipped view onto pixel storage.
//!
//! A surface is the rectangle of the screen a draw pass renders into. It
//! carries its own origin in screen coordinates, so shapes are described in
//! screen space and the surface translates them to storage offsets.
//!
//! Addressing assumes the caller has already clipped against
//! [`Surface::bounds`]; see [`Surface::clip`]. Out-of-range requests panic
//! on the slice bounds check rather than touching foreign memory.

use crate::basics::{clip_to_bounds, Area, AREA_INVALID};
use crate::color::{blend, PixelColor};
use crate::error::RenderError;

// ============================================================================
// Surface
// ============================================================================

/// Mutable view of `width` x `height` pixels at screen position `(x1, y1)`.
///
/// Consecutive rows are `stride` pixels apart in `buf`; the stride may exceed
/// the visible width.
pub struct Surface<'a, C> {
    buf: &'a mut [C],
    x1: i32,
    y1: i32,
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a, C: PixelColor> Surface<'a, C> {
    /// Wrap `buf` as a surface.
    ///
    /// `buf` must hold at least `(height - 1) * stride + width` pixels.
    pub fn new(
        buf: &'a mut [C],
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, RenderError> {
        if stride < width as usize {
            return Err(RenderError::InvalidStride { stride, width });
        }
        let needed = required_len(width, height, stride);
        if buf.len() < needed {
            return Err(RenderError::BufferTooSmall {
                needed,
                actual: buf.len(),
            });
        }
        Ok(Self::from_parts(buf, x, y, width, height, stride))
    }

    /// Internal constructor for callers that have already validated the layout.
    pub(crate) fn from_parts(
        buf: &'a mut [C],
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        stride: usize,
    ) -> Self {
        debug_assert!(buf.len() >= required_len(width, height, stride));
        Self {
            buf,
            x1: x,
            y1: y,
            width,
            height,
            stride,
        }
    }

    pub fn x1(&self) -> i32 {
        self.x1
    }
    pub fn y1(&self) -> i32 {
        self.y1
    }
    /// Last visible column. Saturates at `i32::MAX`; one left of `x1` when empty.
    pub fn x2(&self) -> i32 {
        match self.width.checked_sub(1) {
            Some(w) => self.x1.saturating_add_unsigned(w),
            None => self.x1.saturating_sub(1),
        }
    }
    /// Last visible row. Saturates at `i32::MAX`; one above `y1` when empty.
    pub fn y2(&self) -> i32 {
        match self.height.checked_sub(1) {
            Some(h) => self.y1.saturating_add_unsigned(h),
            None => self.y1.saturating_sub(1),
        }
    }
    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Screen-space rectangle covered by this surface. Invalid when empty.
    pub fn bounds(&self) -> Area {
        if self.width == 0 || self.height == 0 {
            return AREA_INVALID;
        }
        Area::new(self.x1, self.y1, self.x2(), self.y2())
    }

    /// Clip a screen-space area against this surface.
    #[inline]
    pub fn clip(&self, area: &Area) -> Option<Area> {
        clip_to_bounds(&self.bounds(), area)
    }

    #[inline]
    fn offset(&self, local_x: u32, local_y: u32) -> usize {
        debug_assert!(local_x < self.width, "x {} outside width {}", local_x, self.width);
        debug_assert!(local_y < self.height, "y {} outside height {}", local_y, self.height);
        local_y as usize * self.stride + local_x as usize
    }

    /// Cursor at surface-relative `(local_x, local_y)`.
    ///
    /// The returned slice runs to the end of the visible row, so the cursor
    /// advances one pixel per x step. Use [`Surface::row_mut`] to step in y.
    #[inline]
    pub fn pixel_cursor(&mut self, local_x: u32, local_y: u32) -> &mut [C] {
        let start = self.offset(local_x, local_y);
        let end = self.offset(0, local_y) + self.width as usize;
        &mut self.buf[start..end]
    }

    /// Visible pixels of row `local_y`.
    #[inline]
    pub fn row_mut(&mut self, local_y: u32) -> &mut [C] {
        self.pixel_cursor(0, local_y)
    }

    /// Screen-space span `[clip.x1, clip.x2]` of screen row `y`.
    ///
    /// `clip` must come from [`Surface::clip`] and `y` must lie inside it.
    #[inline]
    pub fn span_mut(&mut self, clip: &Area, y: i32) -> &mut [C] {
        debug_assert!(y >= clip.y1 && y <= clip.y2);
        let lx = clip.x1.abs_diff(self.x1);
        let ly = y.abs_diff(self.y1);
        let len = clip.width() as usize;
        &mut self.pixel_cursor(lx, ly)[..len]
    }

    /// Read the pixel at screen position (x, y).
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> C {
        debug_assert!(x >= self.x1 && y >= self.y1);
        self.buf[self.offset(x.abs_diff(self.x1), y.abs_diff(self.y1))]
    }

    /// Blend `c` into the pixel at screen position (x, y), which must be inside
    /// [`Surface::bounds`].
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, c: C, alpha: u8) {
        debug_assert!(x >= self.x1 && y >= self.y1);
        let off = self.offset(x.abs_diff(self.x1), y.abs_diff(self.y1));
        let dst = &mut self.buf[off];
        *dst = blend(c, *dst, alpha);
    }

    /// Blend `c` over every pixel of an already clipped area.
    pub(crate) fn blend_area(&mut self, clip: &Area, c: C, alpha: u8) {
        for y in clip.y1..=clip.y2 {
            let span = self.span_mut(clip, y);
            if alpha == crate::color::ALPHA_MAX {
                span.fill(c);
            } else {
                for px in span.iter_mut() {
                    *px = blend(c, *px, alpha);
                }
            }
        }
    }
}

/// Minimum storage length for a `width` x `height` surface with `stride`.
#[inline]
pub(crate) fn required_len(width: u32, height: u32, stride: usize) -> usize {
    if width == 0 || height == 0 {
        0
    } else {
        (height as usize - 1) * stride + width as usize
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb888;

    const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
    const RED: Rgb888 = Rgb888::new(255, 0, 0);

    #[test]
    fn test_new_validates_storage() {
        let mut data = vec![BLACK; 10 * 4];
        assert!(Surface::new(&mut data, 0, 0, 10, 4, 10).is_ok());
        assert_eq!(
            Surface::new(&mut data, 0, 0, 10, 5, 10).err(),
            Some(RenderError::BufferTooSmall {
                needed: 50,
                actual: 40
            })
        );
        assert_eq!(
            Surface::new(&mut data, 0, 0, 10, 2, 8).err(),
            Some(RenderError::InvalidStride {
                stride: 8,
                width: 10
            })
        );
    }

    #[test]
    fn test_last_row_may_be_short() {
        // Stride 12, width 10, 3 rows: the final row needs only 10 pixels.
        let mut data = vec![BLACK; 12 * 2 + 10];
        assert!(Surface::new(&mut data, 0, 0, 10, 3, 12).is_ok());
    }

    #[test]
    fn test_bounds_with_origin() {
        let mut data = vec![BLACK; 20 * 10];
        let surf = Surface::new(&mut data, 100, 50, 20, 10, 20).unwrap();
        assert_eq!(surf.bounds(), Area::new(100, 50, 119, 59));
        assert_eq!(surf.clip(&Area::new(0, 0, 105, 52)), Some(Area::new(100, 50, 105, 52)));
        assert_eq!(surf.clip(&Area::new(0, 0, 99, 52)), None);
    }

    #[test]
    fn test_empty_surface_clips_everything() {
        let mut data: Vec<Rgb888> = Vec::new();
        let surf = Surface::new(&mut data, 0, 0, 0, 0, 0).unwrap();
        assert!(!surf.bounds().is_valid());
        assert_eq!(surf.clip(&Area::new(0, 0, 10, 10)), None);
    }

    #[test]
    fn test_origin_near_coordinate_limit() {
        let mut data = vec![BLACK; 4 * 3];
        let mut surf = Surface::new(&mut data, i32::MAX - 1, i32::MAX - 5, 4, 3, 4).unwrap();
        assert_eq!(surf.x2(), i32::MAX);
        assert_eq!(surf.y2(), i32::MAX - 3);
        assert_eq!(
            surf.bounds(),
            Area::new(i32::MAX - 1, i32::MAX - 5, i32::MAX, i32::MAX - 3)
        );
        let clip = surf.clip(&Area::new(0, 0, i32::MAX, i32::MAX)).unwrap();
        assert_eq!(clip.width(), 2);
        surf.blend_pixel(i32::MAX, i32::MAX - 4, RED, 255);
        assert_eq!(surf.pixel(i32::MAX, i32::MAX - 4), RED);
        assert_eq!(data[4 + 1], RED);
    }

    #[test]
    fn test_empty_surface_at_minimum_origin() {
        let mut data: Vec<Rgb888> = Vec::new();
        let surf = Surface::new(&mut data, i32::MIN, i32::MIN, 0, 0, 0).unwrap();
        assert_eq!(surf.x2(), i32::MIN);
        assert!(!surf.bounds().is_valid());
        assert_eq!(surf.clip(&Area::new(i32::MIN, i32::MIN, 0, 0)), None);
    }

    #[test]
    fn test_pixel_cursor_honors_stride() {
        let mut data = vec![BLACK; 16 * 4];
        {
            let mut surf = Surface::new(&mut data, 0, 0, 10, 4, 16).unwrap();
            let cursor = surf.pixel_cursor(3, 2);
            assert_eq!(cursor.len(), 7);
            cursor[0] = RED;
            cursor[1] = RED;
        }
        assert_eq!(data[2 * 16 + 3], RED);
        assert_eq!(data[2 * 16 + 4], RED);
        assert_eq!(data[2 * 16 + 2], BLACK);
    }

    #[test]
    fn test_span_mut_translates_origin() {
        let mut data = vec![BLACK; 8 * 8];
        {
            let mut surf = Surface::new(&mut data, 10, 20, 8, 8, 8).unwrap();
            let clip = surf.clip(&Area::new(12, 21, 14, 22)).unwrap();
            surf.span_mut(&clip, 22).fill(RED);
        }
        assert_eq!(data[2 * 8 + 2], RED);
        assert_eq!(data[2 * 8 + 4], RED);
        assert_eq!(data[2 * 8 + 5], BLACK);
        assert_eq!(data[8 + 2], BLACK);
    }

    #[test]
    fn test_blend_pixel() {
        let mut data = vec![BLACK; 4 * 4];
        let mut surf = Surface::new(&mut data, 0, 0, 4, 4, 4).unwrap();
        surf.blend_pixel(1, 1, RED, 255);
        surf.blend_pixel(2, 1, RED, 128);
        assert_eq!(surf.pixel(1, 1), RED);
        assert_eq!(surf.pixel(2, 1), Rgb888::new(128, 0, 0));
        assert_eq!(surf.pixel(3, 1), BLACK);
    }

    #[test]
    #[should_panic]
    fn test_unclipped_address_panics() {
        let mut data = vec![BLACK; 4 * 4];
        let mut surf = Surface::new(&mut data, 0, 0, 4, 4, 4).unwrap();
        surf.pixel_cursor(0, 4);
    }
}
