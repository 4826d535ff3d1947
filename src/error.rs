//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and display operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Invalid tile or grid geometry
//! - [`Error`] - Runtime errors during display operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - SPI transport errors
//! - [`StatusError`](crate::interface::StatusError) - Non-zero status from a raw primitive
//!
//! Bounds and buffer checks happen before the first exchange of a call, so
//! [`Error::OutOfBounds`] and [`Error::BufferTooSmall`] never leave partial
//! state behind. [`Error::Device`] can surface part way through a rectangle
//! transfer; tiles already exchanged are not rolled back.
//!
//! ## Example
//!
//! ```
//! use multitron::{BuilderError, GridDimensions, TileSize};
//!
//! let result = TileSize::new(0, 16);
//! assert!(matches!(result, Err(BuilderError::InvalidTileSize { .. })));
//!
//! // 16x16 tiles exceed the 7-bit tile index
//! let result = GridDimensions::new(16, 16);
//! assert!(result.is_err());
//! ```

use crate::config::{MAX_TILE_HEIGHT, MAX_TILE_WIDTH, MAX_TILES};
use crate::interface::TileInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: TileInterface> {
    /// Hardware exchange failed
    ///
    /// Wraps the underlying error from the [`TileInterface`] implementation.
    Device(I::Error),
    /// Requested coordinates or extent fall outside the logical framebuffer
    ///
    /// Single pixel requests report `w` and `h` as 1.
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Width
        w: u32,
        /// Height
        h: u32,
    },
    /// The device reported a grid the driver cannot address
    InvalidGrid {
        /// Tile rows reported
        rows: u8,
        /// Tile columns reported
        cols: u8,
    },
    /// Caller buffer is smaller than the region it describes
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
}

impl<I: TileInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Device(e) => f.debug_tuple("Device").field(e).finish(),
            Self::OutOfBounds { x, y, w, h } => f
                .debug_struct("OutOfBounds")
                .field("x", x)
                .field("y", y)
                .field("w", w)
                .field("h", h)
                .finish(),
            Self::InvalidGrid { rows, cols } => f
                .debug_struct("InvalidGrid")
                .field("rows", rows)
                .field("cols", cols)
                .finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
        }
    }
}

impl<I: TileInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Device(e) => write!(f, "Device error: {e:?}"),
            Self::OutOfBounds { x, y, w, h } => {
                write!(f, "Out of bounds: x={x}, y={y}, w={w}, h={h}")
            }
            Self::InvalidGrid { rows, cols } => write!(
                f,
                "Invalid grid reported by device: {rows}x{cols} tiles (max {MAX_TILES} tiles)"
            ),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
        }
    }
}

impl<I: TileInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// Tile geometry outside what the scanline buffer and command word support
    ///
    /// See [`TileSize::new()`](crate::config::TileSize::new) for constraints.
    InvalidTileSize {
        /// Tile width requested
        width: u16,
        /// Tile height requested
        height: u16,
    },
    /// Grid geometry outside what the tile index field supports
    ///
    /// See [`GridDimensions::new()`](crate::config::GridDimensions::new) for constraints.
    InvalidGrid {
        /// Tile rows requested
        rows: u8,
        /// Tile columns requested
        cols: u8,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidTileSize { width, height } => write!(
                f,
                "Invalid tile size {width}x{height} (max {MAX_TILE_WIDTH}x{MAX_TILE_HEIGHT})"
            ),
            Self::InvalidGrid { rows, cols } => write!(
                f,
                "Invalid grid {rows}x{cols} (must be non-empty, max {MAX_TILES} tiles)"
            ),
        }
    }
}

impl core::error::Error for BuilderError {}
