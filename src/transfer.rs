//! Rectangle to scanline decomposition
//!
//! A rectangle row `y` covering columns `[x, x + w)` crosses a contiguous run
//! of tiles in one grid row. For each of those tiles the row touches a single
//! byte range of scanline `y % tile_height`:
//!
//! | Tile position         | Range                                     |
//! |-----------------------|-------------------------------------------|
//! | only tile             | `x % W ..= (x + w - 1) % W`               |
//! | leftmost of several   | `x % W ..= W - 1`                         |
//! | rightmost of several  | `0 ..= (x + w - 1) % W`                   |
//! | interior              | `0 ..= W - 1`                             |
//!
//! [`row_spans`] yields these ranges left to right, so concatenating them
//! reproduces the row in caller buffer order.
//!
//! ## Example
//!
//! ```
//! use multitron::{GridDimensions, Layout, TileSize, transfer::row_spans};
//!
//! let (grid, tile) = match (GridDimensions::new(1, 2), TileSize::new(256, 16)) {
//!     (Ok(grid), Ok(tile)) => (grid, tile),
//!     _ => return,
//! };
//! let layout = Layout::new(grid, tile);
//!
//! let spans: Vec<_> = row_spans(&layout, 200, 0, 100).into_iter().flatten().collect();
//! assert_eq!(spans.len(), 2);
//! assert_eq!((spans[0].tile, spans[0].start, spans[0].end), (0, 200, 255));
//! assert_eq!((spans[1].tile, spans[1].start, spans[1].end), (1, 0, 43));
//! ```

use crate::resolver::Layout;

/// Rectangular region of the logical framebuffer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Region {
    /// X coordinate of the left edge
    pub x: u32,
    /// Y coordinate of the top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Region {
    /// Create a new region
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Whether the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Bytes a linear buffer needs to hold the region (one byte per pixel)
    pub fn buffer_size(&self) -> usize {
        (self.w as usize).saturating_mul(self.h as usize)
    }
}

/// One tile's share of one rectangle row
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileSpan {
    /// Tile index
    pub tile: u32,
    /// Scanline within the tile
    pub scanline: u32,
    /// First byte touched in the scanline
    pub start: usize,
    /// Last byte touched in the scanline (inclusive)
    pub end: usize,
}

impl TileSpan {
    /// Number of bytes touched
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Spans always touch at least one byte
    pub const fn is_empty(&self) -> bool {
        false
    }
}

/// Iterator over the tile spans of one rectangle row
#[derive(Clone, Debug)]
pub struct RowSpans {
    next: u32,
    first: u32,
    last: u32,
    first_start: usize,
    last_end: usize,
    tile_width: usize,
    scanline: u32,
}

impl Iterator for RowSpans {
    type Item = TileSpan;

    fn next(&mut self) -> Option<TileSpan> {
        if self.next > self.last {
            return None;
        }
        let tile = self.next;
        self.next += 1;
        let start = if tile == self.first {
            self.first_start
        } else {
            0
        };
        let end = if tile == self.last {
            self.last_end
        } else {
            self.tile_width - 1
        };
        Some(TileSpan {
            tile,
            scanline: self.scanline,
            start,
            end,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.last + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowSpans {}

/// Decompose row `y` of a rectangle spanning columns `[x, x + w)`
///
/// Returns `None` when `w` is zero or either end of the row falls outside the
/// framebuffer.
pub fn row_spans(layout: &Layout, x: u32, y: u32, w: u32) -> Option<RowSpans> {
    let right = x.checked_add(w.checked_sub(1)?)?;
    let first = layout.locate(x, y)?;
    let last = layout.locate(right, y)?;
    Some(RowSpans {
        next: first.tile,
        first: first.tile,
        last: last.tile,
        first_start: first.local_x as usize,
        last_end: last.local_x as usize,
        tile_width: layout.tile_size().width as usize,
        scanline: first.local_y,
    })
}
