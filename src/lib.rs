//! # raster-core
//!
//! Software rasterizer and compositor for small embedded GUIs.
//!
//! Widgets hand the engine a surface (a clipped window onto a frame buffer)
//! and a draw request; the engine writes the covered pixels with 8-bit alpha
//! blending. It features:
//!
//! - Axis-aligned runs and rectangle fills
//! - Anti-aliased thick lines by signed distance, or aliased Bresenham strokes
//! - Dashed strokes
//! - Nearest-neighbor scaled icon blits with per-sample opacity
//! - Raw and run-length encoded pixmap draws, from memory or an external reader
//! - RGB565, RGB888 and ARGB8888 surfaces
//!
//! ## Architecture
//!
//! Every draw call follows the same path:
//!
//! 1. **Clip** - the requested shape is intersected with the surface bounds
//! 2. **Cursor** - the clipped rectangle is mapped to storage offsets
//! 3. **Rasterize** - per-pixel coverage or source sample is computed
//! 4. **Composite** - the result is blended into the surface through the cursor
//!
//! Calls are synchronous and keep no state between them.

// Foundation types
pub mod basics;
pub mod color;
pub mod error;
pub mod fixed;

// Surfaces
pub mod rendering_buffer;
pub mod surface;

// Rasterizers
pub mod icon;
pub mod line_sdf;
pub mod pixmap;
pub mod renderer_primitives;
pub mod stroke;

pub use basics::{clip_to_bounds, Area, PointI, Rect, AREA_MAX};
pub use color::{blend, Argb8888, PixelColor, Rgb565, Rgb888, ALPHA_MAX, ALPHA_MIN};
pub use error::RenderError;
pub use icon::{blit_icon, Icon};
pub use line_sdf::draw_thick_line;
pub use pixmap::{draw_ext_pixmap, draw_pixmap, ExtPixmap, Pixmap, PixmapFormat, PixmapReader};
pub use renderer_primitives::{draw_aliased_line, fill_h_run, fill_rect, fill_v_run};
pub use rendering_buffer::PixelBuffer;
pub use stroke::{draw_line, draw_stroke, Dash, LineAa, LineDesc, StrokeStyle};
pub use surface::Surface;
