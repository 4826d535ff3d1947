//! Coordinate to tile resolution
//!
//! The logical framebuffer is the tile grid laid out row-major: tile `0` is the
//! top-left tile and tile `row * cols + col` sits at grid position
//! `(col, row)`. A logical pixel `(x, y)` lives in tile
//! `(x / tile_width, y / tile_height)` at local offset
//! `(x % tile_width, y % tile_height)`.
//!
//! ## Example
//!
//! ```
//! use multitron::{GridDimensions, Layout, TileSize};
//!
//! let (grid, tile) = match (GridDimensions::new(2, 2), TileSize::new(4, 4)) {
//!     (Ok(grid), Ok(tile)) => (grid, tile),
//!     _ => return,
//! };
//! let layout = Layout::new(grid, tile);
//!
//! let location = match layout.locate(5, 1) {
//!     Some(location) => location,
//!     None => return,
//! };
//! assert_eq!(location.tile, 1);
//! assert_eq!((location.local_x, location.local_y), (1, 1));
//!
//! assert!(layout.locate(8, 0).is_none());
//! ```

use crate::config::{GridDimensions, TileSize};

/// Where a logical pixel lives on the hardware
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLocation {
    /// Tile index, `row * cols + col`
    pub tile: u32,
    /// Grid row of the tile
    pub row: u32,
    /// Grid column of the tile
    pub col: u32,
    /// Column within the tile (byte offset within the scanline)
    pub local_x: u32,
    /// Row within the tile (scanline number)
    pub local_y: u32,
}

/// Grid plus tile geometry: everything needed to map logical coordinates
///
/// Fixed once the display is initialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    grid: GridDimensions,
    tile_size: TileSize,
}

impl Layout {
    /// Combine a grid and a tile geometry
    pub const fn new(grid: GridDimensions, tile_size: TileSize) -> Self {
        Self { grid, tile_size }
    }

    /// Tile grid dimensions
    pub const fn grid(&self) -> GridDimensions {
        self.grid
    }

    /// Single tile geometry
    pub const fn tile_size(&self) -> TileSize {
        self.tile_size
    }

    /// Logical framebuffer width in pixels
    pub fn width(&self) -> u32 {
        self.grid.cols as u32 * self.tile_size.width as u32
    }

    /// Logical framebuffer height in pixels
    pub fn height(&self) -> u32 {
        self.grid.rows as u32 * self.tile_size.height as u32
    }

    /// Number of tiles
    pub fn tile_count(&self) -> u32 {
        self.grid.tile_count()
    }

    /// Logical coordinate of a tile's top-left pixel
    pub fn tile_origin(&self, tile: u32) -> Option<(u32, u32)> {
        if tile >= self.tile_count() {
            return None;
        }
        let cols = self.grid.cols as u32;
        Some((
            (tile % cols) * self.tile_size.width as u32,
            (tile / cols) * self.tile_size.height as u32,
        ))
    }

    /// Resolve a logical pixel to its tile
    ///
    /// Returns `None` when `x >= width()` or `y >= height()`.
    pub fn locate(&self, x: u32, y: u32) -> Option<TileLocation> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let tile_width = self.tile_size.width as u32;
        let tile_height = self.tile_size.height as u32;
        let row = y / tile_height;
        let col = x / tile_width;
        Some(TileLocation {
            tile: row * self.grid.cols as u32 + col,
            row,
            col,
            local_x: x % tile_width,
            local_y: y % tile_height,
        })
    }

    /// Resolve a signed coordinate, rejecting negative values before widening
    pub fn locate_signed(&self, x: i64, y: i64) -> Option<TileLocation> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        self.locate(x, y)
    }

    /// Whether the rectangle `(x, y, w, h)` lies inside the framebuffer
    ///
    /// The edge sums are computed in 64 bits so a rectangle whose `x + w`
    /// wraps a `u32` is rejected. Empty rectangles are always contained.
    pub fn contains(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if w == 0 || h == 0 {
            return true;
        }
        x as u64 + w as u64 <= self.width() as u64 && y as u64 + h as u64 <= self.height() as u64
    }
}
