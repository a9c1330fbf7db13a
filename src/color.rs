//! Color types and the 8-bit alpha compositor.
//!
//! Provides the packed pixel types a surface can be made of:
//! - `Rgb565`: 16-bit packed, the usual embedded LCD format
//! - `Rgb888`: 8 bits per channel, no alpha
//! - `Argb8888`: 32-bit packed with an alpha byte
//!
//! All of them implement [`PixelColor`], which carries the blend operation.
//! Values entering the compositor are always the source; the surface pixel is
//! the destination.

/// Fully opaque. Blending at this value overwrites the destination.
pub const ALPHA_MAX: u8 = 255;
/// Fully transparent.
pub const ALPHA_MIN: u8 = 0;

const BASE_SHIFT: u32 = 8;
const BASE_MSB: i32 = 1 << (BASE_SHIFT - 1);

/// Interpolate `p` toward `q` by `a` (0 = p, 255 = q), with rounding.
#[inline]
pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
    let t = (q as i32 - p as i32) * a as i32 + BASE_MSB - (p > q) as i32;
    (p as i32 + (((t >> BASE_SHIFT) + t) >> BASE_SHIFT)) as u8
}

/// Fixed-point multiply, exact over u8: `multiply(x, 255) == x`.
#[inline]
pub fn multiply(a: u8, b: u8) -> u8 {
    let t: u32 = a as u32 * b as u32 + BASE_MSB as u32;
    (((t >> BASE_SHIFT) + t) >> BASE_SHIFT) as u8
}

// ============================================================================
// PixelColor trait
// ============================================================================

/// A fixed-width packed color a surface is made of.
pub trait PixelColor: Copy + PartialEq + core::fmt::Debug {
    /// Build from 8-bit channels.
    fn from_rgb(r: u8, g: u8, b: u8) -> Self;

    /// Expand to 8-bit channels.
    fn to_rgb888(self) -> Rgb888;

    /// Linear blend of `self` (source) over `dst`, weighted by `alpha / 255`.
    ///
    /// Implementations need not special-case the end points; [`blend`] does.
    fn mix(self, dst: Self, alpha: u8) -> Self;
}

/// Composite `src` over `dst` at `alpha`.
///
/// `ALPHA_MAX` returns `src` untouched and `ALPHA_MIN` returns `dst`
/// untouched; both are exact.
#[inline]
pub fn blend<C: PixelColor>(src: C, dst: C, alpha: u8) -> C {
    match alpha {
        ALPHA_MAX => src,
        ALPHA_MIN => dst,
        a => src.mix(dst, a),
    }
}

// ============================================================================
// Rgb888
// ============================================================================

/// RGB color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb888 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb888 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From a packed 0xRRGGBB value.
    pub const fn from_packed(v: u32) -> Self {
        Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    pub const fn to_packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl PixelColor for Rgb888 {
    #[inline]
    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b)
    }

    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        self
    }

    #[inline]
    fn mix(self, dst: Self, alpha: u8) -> Self {
        Self {
            r: lerp(dst.r, self.r, alpha),
            g: lerp(dst.g, self.g, alpha),
            b: lerp(dst.b, self.b, alpha),
        }
    }
}

// ============================================================================
// Rgb565
// ============================================================================

/// 16-bit packed RGB: 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    #[inline]
    fn channels(self) -> (u8, u8, u8) {
        let r5 = ((self.0 >> 11) & 0x1F) as u8;
        let g6 = ((self.0 >> 5) & 0x3F) as u8;
        let b5 = (self.0 & 0x1F) as u8;
        ((r5 << 3) | (r5 >> 2), (g6 << 2) | (g6 >> 4), (b5 << 3) | (b5 >> 2))
    }
}

impl PixelColor for Rgb565 {
    #[inline]
    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3))
    }

    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        let (r, g, b) = self.channels();
        Rgb888::new(r, g, b)
    }

    // Channels are widened by bit replication, so narrowing an unmixed
    // channel gives back the original bits.
    #[inline]
    fn mix(self, dst: Self, alpha: u8) -> Self {
        let (sr, sg, sb) = self.channels();
        let (dr, dg, db) = dst.channels();
        Self::from_rgb(lerp(dr, sr, alpha), lerp(dg, sg, alpha), lerp(db, sb, alpha))
    }
}

// ============================================================================
// Argb8888
// ============================================================================

/// 32-bit packed 0xAARRGGBB.
///
/// The alpha byte of a surface pixel accumulates toward opaque as sources
/// are blended over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Argb8888(pub u32);

impl Argb8888 {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn a(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

impl PixelColor for Argb8888 {
    #[inline]
    fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(ALPHA_MAX, r, g, b)
    }

    #[inline]
    fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r(), self.g(), self.b())
    }

    #[inline]
    fn mix(self, dst: Self, alpha: u8) -> Self {
        Self::new(
            lerp(dst.a(), ALPHA_MAX, alpha),
            lerp(dst.r(), self.r(), alpha),
            lerp(dst.g(), self.g(), alpha),
            lerp(dst.b(), self.b(), alpha),
        )
    }
}

// ============================================================================
// Narrow source encodings
// ============================================================================

/// Widen an `n`-bit channel value to 8 bits by bit replication.
#[inline]
fn widen(v: u8, bits: u32) -> u8 {
    let mut out = 0u32;
    let mut shift = 8i32 - bits as i32;
    while shift > -(bits as i32) {
        out |= if shift >= 0 {
            (v as u32) << shift
        } else {
            (v as u32) >> (-shift)
        };
        shift -= bits as i32;
    }
    out as u8
}

/// Decode the low 7 bits of an icon sample: 3 bits red, 2 green, 2 blue.
#[inline]
pub fn from_rgb322<C: PixelColor>(v: u8) -> C {
    C::from_rgb(
        widen((v >> 4) & 0x07, 3),
        widen((v >> 2) & 0x03, 2),
        widen(v & 0x03, 2),
    )
}

/// Decode an RGB332 byte: 3 bits red, 3 green, 2 blue.
#[inline]
pub fn from_rgb332<C: PixelColor>(v: u8) -> C {
    C::from_rgb(
        widen(v >> 5, 3),
        widen((v >> 2) & 0x07, 3),
        widen(v & 0x03, 2),
    )
}

/// Decode a little-endian RGB565 pair.
#[inline]
pub fn from_rgb565_le<C: PixelColor>(lo: u8, hi: u8) -> C {
    let rgb = Rgb565(u16::from_le_bytes([lo, hi])).to_rgb888();
    C::from_rgb(rgb.r, rgb.g, rgb.b)
}

// ============================================================================
// Tests
// ============================================================================
