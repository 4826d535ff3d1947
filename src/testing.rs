//! Simulated tile panel shared by the unit tests

use alloc::vec;
use alloc::vec::Vec;

use crate::command::{ControlWord, Opcode};
use crate::interface::TileInterface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PanelFault;

/// In-memory grid of tiles that records every control word it receives
#[derive(Debug)]
pub(crate) struct FakePanel {
    pub rows: u8,
    pub cols: u8,
    pub tile_width: usize,
    pub tile_height: usize,
    pub tiles: Vec<Vec<u8>>,
    pub commands: Vec<ControlWord>,
    /// Index of the exchange (counting from zero) that fails
    pub fail_at: Option<usize>,
    pub powered: bool,
}

impl FakePanel {
    pub fn new(rows: u8, cols: u8, tile_width: usize, tile_height: usize) -> Self {
        let tiles = (0..rows as usize * cols as usize)
            .map(|tile| {
                // distinct, predictable background per tile
                (0..tile_width * tile_height)
                    .map(|i| (tile * 31 + i) as u8)
                    .collect()
            })
            .collect();
        Self {
            rows,
            cols,
            tile_width,
            tile_height,
            tiles,
            commands: Vec::new(),
            fail_at: None,
            powered: false,
        }
    }

    /// Pixel at logical coordinates, read straight from tile memory
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let tile = (y / self.tile_height) * self.cols as usize + x / self.tile_width;
        self.tiles[tile][(y % self.tile_height) * self.tile_width + x % self.tile_width]
    }

    /// Whole framebuffer in row-major order
    pub fn framebuffer(&self) -> Vec<u8> {
        let width = self.cols as usize * self.tile_width;
        let height = self.rows as usize * self.tile_height;
        let mut out = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                out[y * width + x] = self.pixel(x, y);
            }
        }
        out
    }

    pub fn count(&self, opcode: Opcode) -> usize {
        self.commands
            .iter()
            .filter(|word| word.opcode() == Some(opcode))
            .count()
    }

    fn line(&mut self, word: ControlWord) -> Result<&mut [u8], PanelFault> {
        let scanline = word.scanline() as usize;
        if scanline >= self.tile_height {
            return Err(PanelFault);
        }
        let start = scanline * self.tile_width;
        let width = self.tile_width;
        let tile = self
            .tiles
            .get_mut(word.tile() as usize)
            .ok_or(PanelFault)?;
        Ok(&mut tile[start..start + width])
    }
}

impl TileInterface for FakePanel {
    type Error = PanelFault;

    fn exchange(
        &mut self,
        command: ControlWord,
        buffer: Option<&mut [u8]>,
    ) -> Result<(), Self::Error> {
        if self.fail_at == Some(self.commands.len()) {
            return Err(PanelFault);
        }
        self.commands.push(command);
        match (command.opcode(), buffer) {
            (Some(Opcode::PowerOn), Some(reply)) if reply.len() == 2 => {
                reply.copy_from_slice(&[self.cols, self.rows]);
                self.powered = true;
            }
            (Some(Opcode::PowerOff), None) => self.powered = false,
            (Some(Opcode::ReadLine), Some(out)) if out.len() == self.tile_width => {
                out.copy_from_slice(self.line(command)?);
            }
            (Some(Opcode::WriteLine), Some(data)) if data.len() == self.tile_width => {
                self.line(command)?.copy_from_slice(data);
            }
            _ => return Err(PanelFault),
        }
        Ok(())
    }
}
