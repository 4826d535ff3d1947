//! Core display operations
//!
//! [`Display`] is the session handle for one powered-on tile grid. It owns the
//! hardware interface and the [`Layout`] discovered at power on, and threads
//! both through every pixel and rectangle operation.
//!
//! All hardware access happens one scanline at a time. Reads issue `ReadLine`;
//! writes issue `ReadLine`, patch the bytes they own, then `WriteLine`, so the
//! untouched bytes of a partially covered scanline survive.

use crate::command::{ControlWord, Opcode};
use crate::config::{Config, GridDimensions, MAX_TILE_WIDTH};
use crate::error::Error;
use crate::interface::TileInterface;
use crate::resolver::{Layout, TileLocation};
use crate::transfer::{Region, RowSpans, row_spans};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Stack buffer holding one tile scanline
type Scanline = [u8; MAX_TILE_WIDTH as usize];

/// Driver for a powered-on MultiTron tile grid
pub struct Display<I>
where
    I: TileInterface,
{
    /// Hardware interface
    interface: I,
    /// Grid and tile geometry, fixed at power on
    layout: Layout,
}

impl<I> Display<I>
where
    I: TileInterface,
{
    /// Power on the grid and discover its dimensions
    ///
    /// Issues `PowerOn` with tile, reserved and scanline fields cleared. The
    /// device answers with two bytes: column count, then row count.
    ///
    /// # Errors
    ///
    /// - `Error::Device` if the power on exchange fails
    /// - `Error::InvalidGrid` if the reported grid is empty or has more tiles
    ///   than the command word can address
    pub fn init(mut interface: I, config: Config) -> Result<Self, Error<I>> {
        let mut reply = [0u8; 2];
        interface
            .exchange(ControlWord::system(Opcode::PowerOn), Some(&mut reply))
            .map_err(Error::Device)?;

        let [cols, rows] = reply;
        let grid =
            GridDimensions::new(rows, cols).map_err(|_| Error::InvalidGrid { rows, cols })?;
        let layout = Layout::new(grid, config.tile_size);
        log::debug!(
            "multitron powered on: {}x{} tiles, {}x{} pixels",
            cols,
            rows,
            layout.width(),
            layout.height()
        );

        Ok(Self { interface, layout })
    }

    /// Power off the grid and hand back the interface
    ///
    /// # Errors
    ///
    /// Returns `Error::Device` if the power off exchange fails.
    pub fn destroy(mut self) -> Result<I, Error<I>> {
        self.interface
            .exchange(ControlWord::system(Opcode::PowerOff), None)
            .map_err(Error::Device)?;
        log::debug!("multitron powered off");
        Ok(self.interface)
    }

    /// Grid and tile geometry
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Access the underlying interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Logical framebuffer width in pixels
    pub fn width(&self) -> u32 {
        self.layout.width()
    }

    /// Logical framebuffer height in pixels
    pub fn height(&self) -> u32 {
        self.layout.height()
    }

    /// Read one pixel
    ///
    /// One `ReadLine` of the owning tile's scanline.
    pub fn get_pixel(&mut self, x: u32, y: u32) -> Result<u8, Error<I>> {
        let location = self.locate(x, y)?;
        let mut scanline: Scanline = [0; MAX_TILE_WIDTH as usize];
        let line = self.line_buffer(&mut scanline);
        self.read_line(location.tile, location.local_y, line)?;
        Ok(line[location.local_x as usize])
    }

    /// Write one pixel
    ///
    /// Read-modify-write of the owning tile's scanline; only the byte at
    /// `(x, y)` changes.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: u8) -> DisplayResult<I> {
        let location = self.locate(x, y)?;
        let mut scanline: Scanline = [0; MAX_TILE_WIDTH as usize];
        let line = self.line_buffer(&mut scanline);
        self.read_line(location.tile, location.local_y, line)?;
        line[location.local_x as usize] = color;
        self.write_line(location.tile, location.local_y, line)
    }

    /// Copy a rectangle of the framebuffer into `buffer`, row-major
    ///
    /// `buffer` must hold at least `region.w * region.h` bytes; bytes past that
    /// are left alone. An empty region succeeds without touching the hardware.
    ///
    /// # Errors
    ///
    /// - `Error::OutOfBounds` if the region extends past the framebuffer
    /// - `Error::BufferTooSmall` if `buffer` is shorter than the region
    /// - `Error::Device` if an exchange fails; `buffer` is then partially filled
    pub fn get_rect(&mut self, region: Region, buffer: &mut [u8]) -> DisplayResult<I> {
        self.check_region(region, buffer.len())?;
        if region.is_empty() {
            return Ok(());
        }

        let mut scanline: Scanline = [0; MAX_TILE_WIDTH as usize];
        let mut cursor = 0;
        for row in region.y..region.y + region.h {
            for span in self.spans(region, row)? {
                let line = self.line_buffer(&mut scanline);
                self.read_line(span.tile, span.scanline, line)?;
                buffer[cursor..cursor + span.len()].copy_from_slice(&line[span.start..=span.end]);
                cursor += span.len();
            }
        }
        Ok(())
    }

    /// Write a rectangle of the framebuffer from `buffer`, row-major
    ///
    /// Each touched tile scanline is read, patched and written back, so pixels
    /// outside the region keep their values. An empty region succeeds without
    /// touching the hardware.
    ///
    /// # Errors
    ///
    /// - `Error::OutOfBounds` if the region extends past the framebuffer
    /// - `Error::BufferTooSmall` if `buffer` is shorter than the region
    /// - `Error::Device` if an exchange fails; the display is then partially
    ///   updated
    pub fn put_rect(&mut self, region: Region, buffer: &[u8]) -> DisplayResult<I> {
        self.check_region(region, buffer.len())?;
        if region.is_empty() {
            return Ok(());
        }

        let mut scanline: Scanline = [0; MAX_TILE_WIDTH as usize];
        let mut cursor = 0;
        for row in region.y..region.y + region.h {
            for span in self.spans(region, row)? {
                let line = self.line_buffer(&mut scanline);
                self.read_line(span.tile, span.scanline, line)?;
                line[span.start..=span.end].copy_from_slice(&buffer[cursor..cursor + span.len()]);
                cursor += span.len();
                self.write_line(span.tile, span.scanline, line)?;
            }
        }
        Ok(())
    }

    /// Set every pixel of a region to one color
    ///
    /// Same exchange pattern as [`put_rect`](Self::put_rect) without needing a
    /// caller buffer.
    pub fn fill(&mut self, region: Region, color: u8) -> DisplayResult<I> {
        self.check_region(region, region.buffer_size())?;
        if region.is_empty() {
            return Ok(());
        }

        let mut scanline: Scanline = [0; MAX_TILE_WIDTH as usize];
        for row in region.y..region.y + region.h {
            for span in self.spans(region, row)? {
                let line = self.line_buffer(&mut scanline);
                self.read_line(span.tile, span.scanline, line)?;
                line[span.start..=span.end].fill(color);
                self.write_line(span.tile, span.scanline, line)?;
            }
        }
        Ok(())
    }

    /// Read the whole framebuffer, row-major
    #[cfg(feature = "alloc")]
    pub fn snapshot(&mut self) -> Result<alloc::vec::Vec<u8>, Error<I>> {
        let region = Region::new(0, 0, self.width(), self.height());
        let mut buffer = alloc::vec![0u8; region.buffer_size()];
        self.get_rect(region, &mut buffer)?;
        Ok(buffer)
    }

    fn locate(&self, x: u32, y: u32) -> Result<TileLocation, Error<I>> {
        self.layout
            .locate(x, y)
            .ok_or(Error::OutOfBounds { x, y, w: 1, h: 1 })
    }

    fn check_region(&self, region: Region, provided: usize) -> DisplayResult<I> {
        let Region { x, y, w, h } = region;
        if !self.layout.contains(x, y, w, h) {
            return Err(Error::OutOfBounds { x, y, w, h });
        }
        let required = region.buffer_size();
        if provided < required {
            return Err(Error::BufferTooSmall { required, provided });
        }
        Ok(())
    }

    fn spans(&self, region: Region, row: u32) -> Result<RowSpans, Error<I>> {
        row_spans(&self.layout, region.x, row, region.w).ok_or(Error::OutOfBounds {
            x: region.x,
            y: region.y,
            w: region.w,
            h: region.h,
        })
    }

    fn line_buffer<'a>(&self, scanline: &'a mut Scanline) -> &'a mut [u8] {
        &mut scanline[..self.layout.tile_size().width as usize]
    }

    fn read_line(&mut self, tile: u32, scanline: u32, line: &mut [u8]) -> DisplayResult<I> {
        log::trace!("read tile {} line {}", tile, scanline);
        self.exchange(ControlWord::line(Opcode::ReadLine, tile, scanline), line)
    }

    fn write_line(&mut self, tile: u32, scanline: u32, line: &mut [u8]) -> DisplayResult<I> {
        log::trace!("write tile {} line {}", tile, scanline);
        self.exchange(ControlWord::line(Opcode::WriteLine, tile, scanline), line)
    }

    fn exchange(&mut self, command: ControlWord, line: &mut [u8]) -> DisplayResult<I> {
        self.interface
            .exchange(command, Some(line))
            .map_err(|e| {
                log::warn!("exchange {:#010x} failed: {:?}", command.bits(), e);
                Error::Device(e)
            })
    }
}
