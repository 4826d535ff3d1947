//! MultiTron Tiled Display Driver
//!
//! A driver for MultiTron displays: a grid of fixed-size tiles presented as one
//! flat framebuffer of single-byte pixels.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - Single pixel and rectangular read/write across tile boundaries
//! - Hardware abstracted behind [`TileInterface`], with an `embedded-hal` v1.0
//!   SPI transport, a raw status-code adapter and a retry decorator
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Whole framebuffer snapshots (with `alloc` feature)
//!
//! ## How It Works
//!
//! The hardware only moves whole tile scanlines. Each logical operation is
//! resolved to tiles ([`Layout`]), broken into per-tile scanline ranges
//! ([`transfer::row_spans`]), and exchanged one scanline at a time using packed
//! [`ControlWord`]s. Writes read the scanline first so bytes outside the target
//! survive.
//!
//! ## Usage
//!
//! ```rust
//! use multitron::{Builder, ControlWord, Display, FnInterface, Opcode, Region, TileSize};
//!
//! // A 2x1 grid of 4x4 tiles held in memory
//! let mut tiles = [[0u8; 16]; 2];
//! let interface = FnInterface::new(move |word: u32, buffer: Option<&mut [u8]>| {
//!     let command = ControlWord::from_bits(word);
//!     let tile = command.tile() as usize;
//!     let offset = command.scanline() as usize * 4;
//!     match (command.opcode(), buffer) {
//!         (Some(Opcode::PowerOn), Some(reply)) => reply.copy_from_slice(&[2, 1]),
//!         (Some(Opcode::PowerOff), None) => {}
//!         (Some(Opcode::ReadLine), Some(line)) => {
//!             line.copy_from_slice(&tiles[tile][offset..offset + 4])
//!         }
//!         (Some(Opcode::WriteLine), Some(line)) => {
//!             tiles[tile][offset..offset + 4].copy_from_slice(line)
//!         }
//!         _ => return 1,
//!     }
//!     0
//! });
//!
//! let tile = match TileSize::new(4, 4) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//! let config = Builder::new().tile_size(tile).build();
//! let mut display = match Display::init(interface, config) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//! assert_eq!((display.width(), display.height()), (8, 4));
//!
//! // A 4x2 rectangle straddling both tiles
//! let region = Region::new(2, 1, 4, 2);
//! let _ = display.put_rect(region, &[1, 2, 3, 4, 5, 6, 7, 8]);
//!
//! let mut back = [0u8; 8];
//! let _ = display.get_rect(region, &mut back);
//! assert_eq!(back, [1, 2, 3, 4, 5, 6, 7, 8]);
//! assert!(matches!(display.get_pixel(4, 1), Ok(3)));
//!
//! let _ = display.destroy();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Control word encoding
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Hardware interface abstraction
pub mod interface;
/// Coordinate to tile resolution
pub mod resolver;
/// Rectangle to scanline decomposition
pub mod transfer;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use command::{ControlWord, Opcode};
pub use config::{
    Builder, Config, DEFAULT_TILE_HEIGHT, DEFAULT_TILE_WIDTH, GridDimensions, MAX_TILE_HEIGHT,
    MAX_TILE_WIDTH, MAX_TILES, TileSize,
};
pub use display::Display;
pub use error::{BuilderError, Error};
pub use interface::{FnInterface, InterfaceError, Retry, SpiInterface, StatusError, TileInterface};
pub use resolver::{Layout, TileLocation};
pub use transfer::{Region, TileSpan};
