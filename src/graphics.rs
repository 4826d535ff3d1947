//! Graphics support via embedded-graphics
//!
//! [`Display`] implements [`DrawTarget`] with [`Gray8`] pixels: the luma byte is
//! written to the panel unchanged. There is no local framebuffer, so every
//! drawing call goes straight to the hardware.
//!
//! - `draw_iter` costs one read-modify-write per pixel
//! - `fill_solid` and `clear` stream through [`Display::fill`], one
//!   read-modify-write per touched tile scanline
//!
//! Pixels outside the framebuffer are clipped, as embedded-graphics expects.
//!
//! ## Example
//!
//! ```
//! use embedded_graphics::{
//!     pixelcolor::Gray8,
//!     prelude::*,
//!     primitives::{PrimitiveStyle, Rectangle},
//! };
//! use multitron::{Builder, ControlWord, Display, FnInterface, Opcode, TileSize};
//!
//! // One 8x8 tile held in memory
//! let mut memory = [0u8; 64];
//! let interface = FnInterface::new(move |word: u32, buffer: Option<&mut [u8]>| {
//!     let command = ControlWord::from_bits(word);
//!     let offset = command.scanline() as usize * 8;
//!     match (command.opcode(), buffer) {
//!         (Some(Opcode::PowerOn), Some(reply)) => reply.copy_from_slice(&[1, 1]),
//!         (Some(Opcode::ReadLine), Some(line)) => {
//!             line.copy_from_slice(&memory[offset..offset + 8])
//!         }
//!         (Some(Opcode::WriteLine), Some(line)) => {
//!             memory[offset..offset + 8].copy_from_slice(line)
//!         }
//!         _ => return 1,
//!     }
//!     0
//! });
//! let tile = match TileSize::new(8, 8) {
//!     Ok(tile) => tile,
//!     Err(_) => return,
//! };
//! let mut display = match Display::init(interface, Builder::new().tile_size(tile).build()) {
//!     Ok(display) => display,
//!     Err(_) => return,
//! };
//!
//! let _ = display.clear(Gray8::BLACK);
//! let _ = Rectangle::new(Point::new(2, 2), Size::new(4, 4))
//!     .into_styled(PrimitiveStyle::with_stroke(Gray8::WHITE, 1))
//!     .draw(&mut display);
//!
//! assert!(matches!(display.get_pixel(2, 2), Ok(0xFF)));
//! assert!(matches!(display.get_pixel(3, 3), Ok(0x00)));
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{Gray8, GrayColor},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::display::Display;
use crate::error::Error;
use crate::interface::TileInterface;
use crate::transfer::Region;

impl<I> DrawTarget for Display<I>
where
    I: TileInterface,
{
    type Color = Gray8;
    type Error = Error<I>;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let inside = self
                .layout()
                .locate_signed(i64::from(point.x), i64::from(point.y))
                .is_some();
            if !inside {
                continue;
            }
            self.put_pixel(point.x as u32, point.y as u32, color.luma())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        let region = Region::new(
            area.top_left.x as u32,
            area.top_left.y as u32,
            area.size.width,
            area.size.height,
        );
        self.fill(region, color.luma())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(Region::new(0, 0, self.width(), self.height()), color.luma())
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: TileInterface,
{
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}
