//! Rendering buffer: owned, row-oriented pixel storage.
//!
//! [`PixelBuffer`] owns a frame (or a slice of one) and hands out
//! [`Surface`] views for draw passes. Rows are `stride` pixels apart, so a
//! buffer can mirror hardware framebuffers whose pitch exceeds the visible
//! width.

use crate::basics::Area;
use crate::color::PixelColor;
use crate::surface::{required_len, Surface};

/// Owned pixel storage with an explicit row stride.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer<C> {
    pixels: Vec<C>,
    width: u32,
    height: u32,
    stride: usize,
}

impl<C: PixelColor> PixelBuffer<C> {
    /// Create a tightly packed `width` x `height` buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        Self::with_stride(width, height, width as usize, fill)
    }

    /// Create a buffer whose rows are `stride` pixels apart.
    ///
    /// A stride narrower than `width` is widened to `width`.
    pub fn with_stride(width: u32, height: u32, stride: usize, fill: C) -> Self {
        let stride = stride.max(width as usize);
        Self {
            pixels: vec![fill; stride * height as usize],
            width,
            height,
            stride,
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

    /// Read the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> C {
        self.row(y)[x as usize]
    }

    /// Overwrite the pixel at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, c: C) {
        self.row_mut(y)[x as usize] = c;
    }

    /// Visible pixels of row `y`.
    pub fn row(&self, y: u32) -> &[C] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable visible pixels of row `y`.
    pub fn row_mut(&mut self, y: u32) -> &mut [C] {
        assert!(
            y < self.height,
            "row {} out of bounds (height={})",
            y,
            self.height
        );
        let start = y as usize * self.stride;
        &mut self.pixels[start..start + self.width as usize]
    }

    /// Raw storage including stride padding.
    pub fn as_slice(&self) -> &[C] {
        &self.pixels
    }

    /// Fill every visible pixel with `c`.
    pub fn clear(&mut self, c: C) {
        for y in 0..self.height {
            self.row_mut(y).fill(c);
        }
    }

    /// Surface covering the whole buffer with its origin at (0, 0).
    pub fn surface(&mut self) -> Surface<'_, C> {
        self.surface_at(0, 0)
    }

    /// Surface covering the whole buffer, placed at screen position (x, y).
    pub fn surface_at(&mut self, x: i32, y: i32) -> Surface<'_, C> {
        Surface::from_parts(
            &mut self.pixels,
            x,
            y,
            self.width,
            self.height,
            self.stride,
        )
    }

    /// Surface over the part of the buffer covered by `area`.
    ///
    /// Coordinates are buffer coordinates and stay screen coordinates in the
    /// returned view. Returns `None` if `area` misses the buffer.
    pub fn sub_surface(&mut self, area: &Area) -> Option<Surface<'_, C>> {
        let full = Area::new(0, 0, self.width as i32 - 1, self.height as i32 - 1);
        let clip = crate::basics::clip_to_bounds(&full, area)?;
        let start = clip.y1 as usize * self.stride + clip.x1 as usize;
        let (w, h) = (clip.width(), clip.height());
        let end = start + required_len(w, h, self.stride);
        Some(Surface::from_parts(
            &mut self.pixels[start..end],
            clip.x1,
            clip.y1,
            w,
            h,
            self.stride,
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
