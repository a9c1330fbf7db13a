//! Errors a single draw call can report.
//!
//! Empty clip regions and degenerate geometry are not errors: those calls
//! return without touching the surface. Everything here leaves the rest of
//! the surface usable; the caller simply does not see that call's output.

use crate::pixmap::PixmapFormat;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    // ── Construction errors ──────────────────────────────────────────

    #[error("surface needs {needed} pixels of storage, buffer holds {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("row stride {stride} is narrower than the surface width {width}")]
    InvalidStride { stride: usize, width: u32 },

    #[error("pixmap data is {actual} bytes, {expected} required")]
    TruncatedPixmap { expected: usize, actual: usize },

    // ── Draw-time errors ─────────────────────────────────────────────

    #[error("scratch allocation of {bytes} bytes failed")]
    OutOfMemory { bytes: usize },

    #[error("pixmap format {0:?} is not supported by this operation")]
    UnsupportedFormat(PixmapFormat),

    #[error("run-length stream is corrupt at byte {offset}")]
    CorruptRle { offset: usize },

    #[error("pixmap read at byte {offset} failed: {kind}")]
    ReadFailed { offset: u64, kind: std::io::ErrorKind },
}
