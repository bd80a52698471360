//! Error types for card rendering.

use thiserror::Error;

/// Result type alias for renderer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the full render path and of the
/// project/layout parsers.
///
/// Missing optional assets are never errors; they are logged and drawn
/// with fallbacks instead.
#[derive(Error, Debug)]
pub enum Error {
    /// The portrait could not be read or decoded.
    #[error("failed to load portrait: {0}")]
    Portrait(#[source] image::ImageError),

    /// The final raster could not be encoded.
    #[error("failed to encode card image: {0}")]
    Encode(#[source] image::ImageError),

    /// A layout override did not merge into a valid layout.
    #[error("invalid layout override: {0}")]
    Layout(#[source] serde_json::Error),

    /// A project snapshot could not be parsed.
    #[error("invalid project snapshot: {0}")]
    Project(#[source] serde_json::Error),

    /// The drawing surface could not be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    /// Reading a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
