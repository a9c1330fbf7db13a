//! Pixmap draw: unscaled blits of raw and run-length encoded images.
//!
//! The visible columns of each pixmap row are decoded into a scratch row of
//! `(color, alpha)` pairs and then blended over the clipped span of the
//! surface. Run-length streams are decoded from the start, since a run may
//! continue into the next row.
//!
//! Pixmaps stored outside addressable memory (serial flash, a file) are drawn
//! through an [`ExtPixmap`], which asks a [`PixmapReader`] for the visible
//! bytes of one row at a time.
//!
//! RLE layout: a sequence of runs, each a count byte (1..=255) followed by a
//! single pixel in the base encoding. A count of zero, or a stream that ends
//! before the image is complete, is corrupt.

use std::io;

use crate::basics::Area;
use crate::color::{
    blend, from_rgb332, from_rgb565_le, multiply, PixelColor, ALPHA_MAX, ALPHA_MIN,
};
use crate::error::RenderError;
use crate::surface::Surface;

// ============================================================================
// Formats
// ============================================================================

/// Pixel encoding of a [`Pixmap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixmapFormat {
    /// 1 byte: RRRGGGBB.
    Rgb332,
    /// 2 bytes, little-endian RGB565.
    Rgb565,
    /// 3 bytes in R, G, B order.
    Rgb888,
    /// 4 bytes, little-endian 0xAARRGGBB.
    Argb8888,
    RleRgb332,
    RleRgb565,
    RleRgb888,
    /// Icon encoding; draw it with [`crate::icon::blit_icon`].
    Indexed,
}

impl PixmapFormat {
    /// Bytes of one encoded pixel (excluding RLE count bytes).
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb332 | Self::RleRgb332 | Self::Indexed => 1,
            Self::Rgb565 | Self::RleRgb565 => 2,
            Self::Rgb888 | Self::RleRgb888 => 3,
            Self::Argb8888 => 4,
        }
    }

    pub fn is_rle(self) -> bool {
        matches!(self, Self::RleRgb332 | Self::RleRgb565 | Self::RleRgb888)
    }

    /// Decode one pixel of this format's base encoding.
    ///
    /// `px` must hold exactly [`PixmapFormat::bytes_per_pixel`] bytes.
    #[inline]
    fn decode<C: PixelColor>(self, px: &[u8]) -> (C, u8) {
        match self {
            Self::Rgb332 | Self::RleRgb332 | Self::Indexed => (from_rgb332(px[0]), ALPHA_MAX),
            Self::Rgb565 | Self::RleRgb565 => (from_rgb565_le(px[0], px[1]), ALPHA_MAX),
            Self::Rgb888 | Self::RleRgb888 => (C::from_rgb(px[0], px[1], px[2]), ALPHA_MAX),
            Self::Argb8888 => (C::from_rgb(px[2], px[1], px[0]), px[3]),
        }
    }
}

/// A borrowed, encoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixmap<'a> {
    width: u16,
    height: u16,
    format: PixmapFormat,
    data: &'a [u8],
}

impl<'a> Pixmap<'a> {
    /// Wrap `data` as a `width` x `height` pixmap.
    ///
    /// Raw formats are length-checked here. RLE streams are checked while
    /// they are decoded.
    pub fn new(
        width: u16,
        height: u16,
        format: PixmapFormat,
        data: &'a [u8],
    ) -> Result<Self, RenderError> {
        if !format.is_rle() {
            let expected = width as usize * height as usize * format.bytes_per_pixel();
            if data.len() < expected {
                return Err(RenderError::TruncatedPixmap {
                    expected,
                    actual: data.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> PixmapFormat {
        self.format
    }
}

// ============================================================================
// External source
// ============================================================================

/// Random-access byte source behind an [`ExtPixmap`].
///
/// Implemented for any `FnMut(u64, &mut [u8]) -> io::Result<()>`.
pub trait PixmapReader {
    /// Fill all of `buf` with the encoded bytes starting at `offset`.
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

impl<F> PixmapReader for F
where
    F: FnMut(u64, &mut [u8]) -> io::Result<()>,
{
    fn read(&mut self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        self(offset, buf)
    }
}

/// A raw-format pixmap whose bytes are fetched through a [`PixmapReader`].
///
/// Rows are laid out exactly as for [`Pixmap`]. Only the columns that survive
/// clipping are read.
pub struct ExtPixmap<R> {
    width: u16,
    height: u16,
    format: PixmapFormat,
    reader: R,
}

impl<R: PixmapReader> ExtPixmap<R> {
    /// Run-length and indexed formats need sequential or icon decoding and
    /// are rejected with [`RenderError::UnsupportedFormat`].
    pub fn new(
        width: u16,
        height: u16,
        format: PixmapFormat,
        reader: R,
    ) -> Result<Self, RenderError> {
        if format.is_rle() || format == PixmapFormat::Indexed {
            return Err(RenderError::UnsupportedFormat(format));
        }
        Ok(Self {
            width,
            height,
            format,
            reader,
        })
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn format(&self) -> PixmapFormat {
        self.format
    }

    pub fn into_reader(self) -> R {
        self.reader
    }
}

// ============================================================================
// Row decoding
// ============================================================================

/// Empty vector with room for `len` items, or `OutOfMemory`.
fn reserve_row<T>(len: usize) -> Result<Vec<T>, RenderError> {
    let mut row = Vec::new();
    if row.try_reserve_exact(len).is_err() {
        let bytes = len.saturating_mul(core::mem::size_of::<T>());
        log::error!("pixmap row buffer: failed to allocate {} bytes", bytes);
        return Err(RenderError::OutOfMemory { bytes });
    }
    Ok(row)
}

/// Sequential row source over a pixmap's data.
enum RowSource<'a, C> {
    Raw {
        data: &'a [u8],
        format: PixmapFormat,
        row_bytes: usize,
    },
    Rle {
        data: &'a [u8],
        format: PixmapFormat,
        width: usize,
        pos: usize,
        left: u8,
        current: (C, u8),
    },
    Reader {
        reader: &'a mut dyn PixmapReader,
        format: PixmapFormat,
        width: usize,
        bytes: Vec<u8>,
    },
}

impl<'a, C: PixelColor> RowSource<'a, C> {
    fn new(pixmap: &Pixmap<'a>) -> Self {
        let bpp = pixmap.format.bytes_per_pixel();
        if pixmap.format.is_rle() {
            Self::Rle {
                data: pixmap.data,
                format: pixmap.format,
                width: pixmap.width as usize,
                pos: 0,
                left: 0,
                current: (C::from_rgb(0, 0, 0), ALPHA_MIN),
            }
        } else {
            Self::Raw {
                data: pixmap.data,
                format: pixmap.format,
                row_bytes: pixmap.width as usize * bpp,
            }
        }
    }

    fn from_reader<R: PixmapReader>(pixmap: &'a mut ExtPixmap<R>) -> Self {
        Self::Reader {
            reader: &mut pixmap.reader,
            format: pixmap.format,
            width: pixmap.width as usize,
            bytes: Vec::new(),
        }
    }

    /// Allocate per-draw byte scratch for `cols` visible columns.
    fn prepare(&mut self, cols: usize) -> Result<(), RenderError> {
        if let Self::Reader { format, bytes, .. } = self {
            *bytes = reserve_row(cols.saturating_mul(format.bytes_per_pixel()))?;
        }
        Ok(())
    }

    /// Decode columns `lo..=hi` of row `y` into `out`, which is cleared
    /// first. Rows must be requested in order for RLE sources.
    fn decode_row(
        &mut self,
        y: usize,
        lo: usize,
        hi: usize,
        out: &mut Vec<(C, u8)>,
    ) -> Result<(), RenderError> {
        out.clear();
        match self {
            Self::Raw {
                data,
                format,
                row_bytes,
            } => {
                let bpp = format.bytes_per_pixel();
                let start = y * *row_bytes;
                let row = &data[start + lo * bpp..start + (hi + 1) * bpp];
                out.extend(row.chunks_exact(bpp).map(|px| format.decode::<C>(px)));
            }
            Self::Rle {
                data,
                format,
                width,
                pos,
                left,
                current,
            } => {
                let bpp = format.bytes_per_pixel();
                for col in 0..*width {
                    if *left == 0 {
                        let count = match data.get(*pos) {
                            Some(&n) if n > 0 => n,
                            _ => return Err(RenderError::CorruptRle { offset: *pos }),
                        };
                        let px = data
                            .get(*pos + 1..*pos + 1 + bpp)
                            .ok_or(RenderError::CorruptRle { offset: *pos + 1 })?;
                        *current = format.decode(px);
                        *left = count;
                        *pos += 1 + bpp;
                    }
                    if (lo..=hi).contains(&col) {
                        out.push(*current);
                    }
                    *left -= 1;
                }
            }
            Self::Reader {
                reader,
                format,
                width,
                bytes,
            } => {
                let bpp = format.bytes_per_pixel();
                let offset = (y as u64 * *width as u64 + lo as u64) * bpp as u64;
                bytes.clear();
                bytes.resize((hi - lo + 1) * bpp, 0);
                reader.read(offset, bytes).map_err(|e| {
                    log::warn!("pixmap read of {} bytes at {}: {}", bytes.len(), offset, e);
                    RenderError::ReadFailed {
                        offset,
                        kind: e.kind(),
                    }
                })?;
                out.extend(bytes.chunks_exact(bpp).map(|px| format.decode::<C>(px)));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Draw
// ============================================================================

/// Draw `pixmap` unscaled with its top-left corner at screen position (x, y).
///
/// Per-pixel alpha (`Argb8888`) is multiplied by `alpha`. Returns an error
/// without writing further pixels if the scratch row cannot be allocated,
/// the format cannot be drawn here, or an RLE stream turns out to be corrupt;
/// rows blended before a corrupt row stay on the surface.
pub fn draw_pixmap<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    x: i32,
    y: i32,
    pixmap: &Pixmap<'_>,
    alpha: u8,
) -> Result<(), RenderError> {
    if pixmap.format == PixmapFormat::Indexed {
        log::warn!("indexed pixmap passed to draw_pixmap; use blit_icon");
        return Err(RenderError::UnsupportedFormat(pixmap.format));
    }
    let src = RowSource::<C>::new(pixmap);
    draw_rows(surf, x, y, pixmap.width, pixmap.height, src, alpha)
}

/// Draw an externally stored pixmap, reading one clipped row at a time.
///
/// Behaves like [`draw_pixmap`]. A failed read stops the draw with
/// [`RenderError::ReadFailed`]; rows blended before it stay on the surface.
pub fn draw_ext_pixmap<C: PixelColor, R: PixmapReader>(
    surf: &mut Surface<'_, C>,
    x: i32,
    y: i32,
    pixmap: &mut ExtPixmap<R>,
    alpha: u8,
) -> Result<(), RenderError> {
    let (width, height) = (pixmap.width, pixmap.height);
    let src = RowSource::<C>::from_reader(pixmap);
    draw_rows(surf, x, y, width, height, src, alpha)
}

fn draw_rows<C: PixelColor>(
    surf: &mut Surface<'_, C>,
    x: i32,
    y: i32,
    width: u16,
    height: u16,
    mut src: RowSource<'_, C>,
    alpha: u8,
) -> Result<(), RenderError> {
    let coords = Area::from_origin(x, y, width as i32, height as i32);
    let Some(clip) = surf.clip(&coords) else {
        log::trace!("pixmap at {:?} outside surface", coords);
        return Ok(());
    };

    let lo = clip.x1.abs_diff(x) as usize;
    let hi = clip.x2.abs_diff(x) as usize;
    let mut row: Vec<(C, u8)> = reserve_row(hi - lo + 1)?;
    src.prepare(hi - lo + 1)?;

    let skip = clip.y1.abs_diff(y) as usize;
    let last = clip.y2.abs_diff(y) as usize;
    // Raw rows are addressed directly; RLE must be walked from row 0.
    let first = if matches!(src, RowSource::Rle { .. }) { 0 } else { skip };

    for py in first..=last {
        if let Err(e) = src.decode_row(py, lo, hi, &mut row) {
            log::warn!("pixmap row {}: {}", py, e);
            return Err(e);
        }
        if py < skip {
            continue;
        }
        let sy = clip.y1 + (py - skip) as i32;
        let span = surf.span_mut(&clip, sy);
        for (dst, &(c, a)) in span.iter_mut().zip(&row) {
            *dst = blend(c, *dst, multiply(a, alpha));
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Argb8888, Rgb565, Rgb888};
    use std::io::ErrorKind;
    use crate::rendering_buffer::PixelBuffer;

    const BG: Rgb888 = Rgb888::new(0, 0, 0);

    #[test]
    fn test_bytes_per_pixel() {
        assert_eq!(PixmapFormat::Rgb332.bytes_per_pixel(), 1);
        assert_eq!(PixmapFormat::RleRgb565.bytes_per_pixel(), 2);
        assert_eq!(PixmapFormat::Rgb888.bytes_per_pixel(), 3);
        assert_eq!(PixmapFormat::Argb8888.bytes_per_pixel(), 4);
        assert!(PixmapFormat::RleRgb888.is_rle());
        assert!(!PixmapFormat::Rgb888.is_rle());
    }

    #[test]
    fn test_new_validates_raw_length() {
        let data = [0u8; 11];
        assert_eq!(
            Pixmap::new(2, 2, PixmapFormat::Rgb888, &data).err(),
            Some(RenderError::TruncatedPixmap {
                expected: 12,
                actual: 11
            })
        );
        // RLE length is only known while decoding.
        assert!(Pixmap::new(2, 2, PixmapFormat::RleRgb888, &data).is_ok());
    }

    #[test]
    fn test_raw_rgb888() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 1, 2, 3];
        let pm = Pixmap::new(2, 2, PixmapFormat::Rgb888, &data).unwrap();
        let mut buf = PixelBuffer::new(4, 4, BG);
        draw_pixmap(&mut buf.surface(), 1, 1, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.pixel(1, 1), Rgb888::new(255, 0, 0));
        assert_eq!(buf.pixel(2, 1), Rgb888::new(0, 255, 0));
        assert_eq!(buf.pixel(1, 2), Rgb888::new(0, 0, 255));
        assert_eq!(buf.pixel(2, 2), Rgb888::new(1, 2, 3));
        assert_eq!(buf.pixel(0, 0), BG);
        assert_eq!(buf.pixel(3, 3), BG);
    }

    #[test]
    fn test_raw_rgb565_on_rgb565_surface() {
        let data = 0xF800u16
            .to_le_bytes()
            .iter()
            .chain(0x001Fu16.to_le_bytes().iter())
            .copied()
            .collect::<Vec<u8>>();
        let pm = Pixmap::new(2, 1, PixmapFormat::Rgb565, &data).unwrap();
        let mut buf = PixelBuffer::new(2, 1, Rgb565(0));
        draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.pixel(0, 0), Rgb565(0xF800));
        assert_eq!(buf.pixel(1, 0), Rgb565(0x001F));
    }

    #[test]
    fn test_clipped_raw_pixmap() {
        // 4x4 Rgb332, red bottom-right quadrant, drawn half off the top-left corner.
        let data: Vec<u8> = (0..16)
            .map(|i| if i % 4 >= 2 && i / 4 >= 2 { 0xE0 } else { 0x03 })
            .collect();
        let pm = Pixmap::new(4, 4, PixmapFormat::Rgb332, &data).unwrap();
        let mut buf = PixelBuffer::new(4, 4, BG);
        draw_pixmap(&mut buf.surface(), -2, -2, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.pixel(0, 0), Rgb888::new(255, 0, 0));
        assert_eq!(buf.pixel(1, 1), Rgb888::new(255, 0, 0));
        assert_eq!(buf.pixel(2, 0), BG);
        assert_eq!(buf.pixel(0, 2), BG);
    }

    #[test]
    fn test_argb_alpha_multiplies_draw_alpha() {
        let data = Argb8888::new(128, 255, 255, 255).0.to_le_bytes();
        let pm = Pixmap::new(1, 1, PixmapFormat::Argb8888, &data).unwrap();

        let mut buf = PixelBuffer::new(1, 1, BG);
        draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.pixel(0, 0), Rgb888::new(128, 128, 128));

        let mut buf = PixelBuffer::new(1, 1, BG);
        draw_pixmap(&mut buf.surface(), 0, 0, &pm, 0).unwrap();
        assert_eq!(buf.pixel(0, 0), BG);
    }

    #[test]
    fn test_rle_runs_cross_rows() {
        // 3x2: five red then one blue.
        let data = [5, 0xE0, 1, 0x03];
        let pm = Pixmap::new(3, 2, PixmapFormat::RleRgb332, &data).unwrap();
        let mut buf = PixelBuffer::new(3, 2, BG);
        draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX).unwrap();
        let red = Rgb888::new(255, 0, 0);
        assert_eq!(buf.row(0), &[red, red, red]);
        assert_eq!(buf.row(1), &[red, red, Rgb888::new(0, 0, 255)]);
    }

    #[test]
    fn test_rle_skips_rows_above_clip() {
        // Row 0 green, row 1 red, in RLE565.
        let g = 0x07E0u16.to_le_bytes();
        let r = 0xF800u16.to_le_bytes();
        let data = [2, g[0], g[1], 2, r[0], r[1]];
        let pm = Pixmap::new(2, 2, PixmapFormat::RleRgb565, &data).unwrap();
        let mut buf = PixelBuffer::new(2, 1, BG);
        draw_pixmap(&mut buf.surface(), 0, -1, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.row(0), &[Rgb888::new(255, 0, 0); 2]);
    }

    #[test]
    fn test_rle_zero_count_is_corrupt() {
        let data = [3, 10, 20, 30, 0, 1, 2, 3];
        let pm = Pixmap::new(3, 2, PixmapFormat::RleRgb888, &data).unwrap();
        let mut buf = PixelBuffer::new(3, 2, BG);
        let res = draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX);
        assert_eq!(res, Err(RenderError::CorruptRle { offset: 4 }));
        // The complete first row was blended before the error.
        assert_eq!(buf.row(0), &[Rgb888::new(10, 20, 30); 3]);
        assert_eq!(buf.row(1), &[BG; 3]);
    }

    #[test]
    fn test_rle_truncated_stream() {
        let data = [4, 10, 20];
        let pm = Pixmap::new(2, 2, PixmapFormat::RleRgb888, &data).unwrap();
        let mut buf = PixelBuffer::new(2, 2, BG);
        assert_eq!(
            draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX),
            Err(RenderError::CorruptRle { offset: 1 })
        );
        assert!(buf.as_slice().iter().all(|p| *p == BG));
    }

    #[test]
    fn test_indexed_is_unsupported() {
        let data = [0x80u8; 4];
        let pm = Pixmap::new(2, 2, PixmapFormat::Indexed, &data).unwrap();
        let mut buf = PixelBuffer::new(2, 2, BG);
        assert_eq!(
            draw_pixmap(&mut buf.surface(), 0, 0, &pm, ALPHA_MAX),
            Err(RenderError::UnsupportedFormat(PixmapFormat::Indexed))
        );
        assert!(buf.as_slice().iter().all(|p| *p == BG));
    }

    #[test]
    fn test_offscreen_and_empty_are_ok() {
        let data = [0u8; 4];
        let pm = Pixmap::new(2, 2, PixmapFormat::Rgb332, &data).unwrap();
        let mut buf = PixelBuffer::new(2, 2, Rgb888::new(1, 1, 1));
        assert_eq!(draw_pixmap(&mut buf.surface(), 10, 10, &pm, ALPHA_MAX), Ok(()));
        let empty = Pixmap::new(0, 0, PixmapFormat::RleRgb332, &[]).unwrap();
        assert_eq!(draw_pixmap(&mut buf.surface(), 0, 0, &empty, ALPHA_MAX), Ok(()));
        assert!(buf.as_slice().iter().all(|p| *p == Rgb888::new(1, 1, 1)));
    }

    #[test]
    fn test_pixmap_at_coordinate_limit() {
        let data = [0xE0u8, 0x1C, 0x03, 0xFF];
        let pm = Pixmap::new(2, 2, PixmapFormat::Rgb332, &data).unwrap();
        let mut buf = PixelBuffer::new(3, 3, BG);
        let o = i32::MAX - 2;
        // The pixmap's far corner would sit one past i32::MAX.
        draw_pixmap(&mut buf.surface_at(o, o), i32::MAX, i32::MAX, &pm, ALPHA_MAX).unwrap();
        assert_eq!(buf.pixel(2, 2), Rgb888::new(255, 0, 0));
        assert_eq!(buf.pixel(1, 1), BG);
        draw_pixmap(&mut buf.surface_at(o, o), i32::MAX - 1, i32::MAX - 1, &pm, ALPHA_MAX)
            .unwrap();
        assert_eq!(buf.pixel(1, 1), Rgb888::new(255, 0, 0));
        assert_eq!(buf.pixel(2, 1), Rgb888::new(0, 255, 0));
        assert_eq!(buf.pixel(1, 2), Rgb888::new(0, 0, 255));
        assert_eq!(buf.pixel(2, 2), Rgb888::new(255, 255, 255));
    }

    #[test]
    fn test_row_reservation_failure_is_reported() {
        let res = reserve_row::<(Rgb888, u8)>(usize::MAX / 2);
        assert!(
            matches!(res, Err(RenderError::OutOfMemory { bytes }) if bytes == usize::MAX),
            "got {:?}",
            res.map(|v| v.capacity())
        );
        let ok = reserve_row::<(Rgb888, u8)>(16).unwrap();
        assert!(ok.is_empty() && ok.capacity() >= 16);
    }

    #[test]
    fn test_ext_pixmap_reads_only_visible_columns() {
        // 3x2 Rgb888: red, green, blue / white, gray, black.
        let data: Vec<u8> = vec![
            255, 0, 0, 0, 255, 0, 0, 0, 255, //
            255, 255, 255, 9, 9, 9, 0, 0, 0,
        ];
        let mut calls = Vec::new();
        let mut buf = PixelBuffer::new(2, 2, Rgb888::new(1, 1, 1));
        {
            let reader = |offset: u64, out: &mut [u8]| -> io::Result<()> {
                calls.push((offset, out.len()));
                let start = offset as usize;
                out.copy_from_slice(&data[start..start + out.len()]);
                Ok(())
            };
            let mut pm = ExtPixmap::new(3, 2, PixmapFormat::Rgb888, reader).unwrap();
            draw_ext_pixmap(&mut buf.surface(), -1, 0, &mut pm, ALPHA_MAX).unwrap();
        }
        assert_eq!(calls, vec![(3, 6), (12, 6)]);
        assert_eq!(buf.row(0), &[Rgb888::new(0, 255, 0), Rgb888::new(0, 0, 255)]);
        assert_eq!(buf.row(1), &[Rgb888::new(9, 9, 9), Rgb888::new(0, 0, 0)]);
    }

    #[test]
    fn test_ext_pixmap_read_error_stops_draw() {
        let reader = |offset: u64, out: &mut [u8]| -> io::Result<()> {
            if offset > 0 {
                return Err(io::Error::new(ErrorKind::TimedOut, "flash busy"));
            }
            out.fill(0xFF);
            Ok(())
        };
        let mut pm = ExtPixmap::new(2, 2, PixmapFormat::Rgb565, reader).unwrap();
        let mut buf = PixelBuffer::new(2, 2, BG);
        assert_eq!(
            draw_ext_pixmap(&mut buf.surface(), 0, 0, &mut pm, ALPHA_MAX),
            Err(RenderError::ReadFailed {
                offset: 4,
                kind: ErrorKind::TimedOut
            })
        );
        assert_eq!(buf.row(0), &[Rgb888::new(255, 255, 255); 2]);
        assert_eq!(buf.row(1), &[BG; 2]);
    }

    #[test]
    fn test_ext_pixmap_rejects_stream_formats() {
        let never = |_: u64, _: &mut [u8]| -> io::Result<()> { Ok(()) };
        assert_eq!(
            ExtPixmap::new(2, 2, PixmapFormat::RleRgb565, never).err(),
            Some(RenderError::UnsupportedFormat(PixmapFormat::RleRgb565))
        );
        assert_eq!(
            ExtPixmap::new(2, 2, PixmapFormat::Indexed, never).err(),
            Some(RenderError::UnsupportedFormat(PixmapFormat::Indexed))
        );
    }

    #[test]
    fn test_ext_pixmap_offscreen_never_reads() {
        let mut reads = 0;
        let mut buf = PixelBuffer::new(4, 4, BG);
        {
            let reader = |_: u64, _: &mut [u8]| -> io::Result<()> {
                reads += 1;
                Ok(())
            };
            let mut pm = ExtPixmap::new(4, 4, PixmapFormat::Argb8888, reader).unwrap();
            assert_eq!(draw_ext_pixmap(&mut buf.surface(), 4, 0, &mut pm, ALPHA_MAX), Ok(()));
        }
        assert_eq!(reads, 0);
    }
}
