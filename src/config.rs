//! Display configuration types and builder

use crate::command::{SCANLINE_BITS, TILE_BITS};
pub use crate::error::BuilderError;

/// Widest tile scanline the driver can buffer, in bytes
pub const MAX_TILE_WIDTH: u16 = 256;

/// Tallest tile the scanline field can address
pub const MAX_TILE_HEIGHT: u16 = 1 << SCANLINE_BITS;

/// Most tiles the tile index field can address
pub const MAX_TILES: u16 = 1 << TILE_BITS;

/// Tile width of production MultiTron panels
pub const DEFAULT_TILE_WIDTH: u16 = 256;

/// Tile height of production MultiTron panels
pub const DEFAULT_TILE_HEIGHT: u16 = 128;

/// Pixel dimensions of a single tile
///
/// These are fixed by the hardware and are not reported by the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSize {
    /// Width in pixels (bytes per scanline)
    pub width: u16,
    /// Height in pixels (scanlines per tile)
    pub height: u16,
}

impl TileSize {
    /// Create a tile size with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidTileSize` if either side is zero, the width
    /// exceeds [`MAX_TILE_WIDTH`] or the height exceeds [`MAX_TILE_HEIGHT`].
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_TILE_WIDTH || height == 0 || height > MAX_TILE_HEIGHT {
            return Err(BuilderError::InvalidTileSize { width, height });
        }
        Ok(Self { width, height })
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_TILE_WIDTH,
            height: DEFAULT_TILE_HEIGHT,
        }
    }
}

/// Tile grid dimensions, as reported by the device at power on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDimensions {
    /// Number of tile rows
    pub rows: u8,
    /// Number of tile columns
    pub cols: u8,
}

impl GridDimensions {
    /// Create grid dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidGrid` if:
    /// - rows or cols is zero
    /// - rows * cols > MAX_TILES (tile index would not fit its field)
    pub fn new(rows: u8, cols: u8) -> Result<Self, BuilderError> {
        if rows == 0 || cols == 0 || rows as u16 * cols as u16 > MAX_TILES {
            return Err(BuilderError::InvalidGrid { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Number of tiles in the grid
    pub fn tile_count(&self) -> u32 {
        self.rows as u32 * self.cols as u32
    }
}

/// Display configuration
///
/// Use `Builder` to create a Config.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Geometry of each tile
    pub tile_size: TileSize,
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```
/// use multitron::{Builder, TileSize};
///
/// let tile = match TileSize::new(64, 32) {
///     Ok(tile) => tile,
///     Err(_) => return,
/// };
/// let config = Builder::new().tile_size(tile).build();
/// assert_eq!(config.tile_size.width, 64);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    tile_size: TileSize,
}

impl Builder {
    /// Create a new Builder with production tile geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tile geometry
    pub fn tile_size(mut self, tile_size: TileSize) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        Config {
            tile_size: self.tile_size,
        }
    }
}
