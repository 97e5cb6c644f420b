use log::trace;

use crate::bits::U4;
use crate::error::ApplyError;
use crate::types::{HCommand, Instruction, Rgb, Scroll, Tile, VCommand};

pub const SCREEN_WIDTH: usize = 300;
pub const SCREEN_HEIGHT: usize = 216;
pub const VIEW_WIDTH: usize = 294;
pub const VIEW_HEIGHT: usize = 204;
/// Border thickness on the left and right edges.
pub const BORDER_X: usize = (SCREEN_WIDTH - VIEW_WIDTH) / 2;
/// Border thickness on the top and bottom edges.
pub const BORDER_Y: usize = (SCREEN_HEIGHT - VIEW_HEIGHT) / 2;
pub const TILE_WIDTH: usize = 6;
pub const TILE_HEIGHT: usize = 12;

/// Color table indices, addressed as `screen[y][x]`.
pub type Screen = [[U4; SCREEN_WIDTH]; SCREEN_HEIGHT];
pub type ColorTable = [Rgb; 16];
const BLANK_SCREEN: Screen = [[0; SCREEN_WIDTH]; SCREEN_HEIGHT];

/// Everything a CD+G stream draws into.
#[derive(Clone)]
pub struct Cdg {
    colors: ColorTable,
    screen: Screen,
    bg_color: U4,
    border_color: U4,
    transparent_color: U4,
}

impl Default for Cdg {
    fn default() -> Self {
        Self::new()
    }
}

impl Cdg {
    pub fn new() -> Self {
        Cdg {
            colors: [Rgb::default(); 16],
            screen: BLANK_SCREEN,
            bg_color: 0,
            border_color: 0,
            transparent_color: 0,
        }
    }

    pub fn colors(&self) -> &ColorTable {
        &self.colors
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Color index at `x`, `y`, or None outside the 300x216 screen.
    pub fn pixel(&self, x: usize, y: usize) -> Option<U4> {
        self.screen.get(y)?.get(x).copied()
    }

    pub fn bg_color(&self) -> U4 {
        self.bg_color
    }

    pub fn border_color(&self) -> U4 {
        self.border_color
    }

    pub fn transparent_color(&self) -> U4 {
        self.transparent_color
    }

    /// Applies one instruction. Nothing is touched when an error is returned.
    pub fn apply(&mut self, instruction: &Instruction) -> Result<(), ApplyError> {
        trace!("Applying {}", instruction.name());
        match instruction {
            Instruction::Empty => {}
            Instruction::MemoryPreset { color } => {
                self.screen = [[*color; SCREEN_WIDTH]; SCREEN_HEIGHT];
                self.bg_color = *color;
            }
            Instruction::BorderPreset { color } => {
                self.border_color = *color;
                self.fill_border(*color);
            }
            Instruction::TileBlock(tile) => self.draw_tile(tile, false)?,
            Instruction::TileBlockXor(tile) => self.draw_tile(tile, true)?,
            Instruction::LoadColorsLow(colors) => self.colors[..8].copy_from_slice(colors),
            Instruction::LoadColorsHigh(colors) => self.colors[8..].copy_from_slice(colors),
            Instruction::ScrollPreset(scroll) => self.scroll(scroll, Some(scroll.color)),
            Instruction::ScrollCopy(scroll) => self.scroll(scroll, None),
            Instruction::DefineTransparent { color } => {
                self.transparent_color = *color;
            }
        }
        Ok(())
    }

    fn fill_border(&mut self, color: U4) {
        for (y, line) in self.screen.iter_mut().enumerate() {
            if y < BORDER_Y || y >= SCREEN_HEIGHT - BORDER_Y {
                *line = [color; SCREEN_WIDTH];
            } else {
                line[..BORDER_X].fill(color);
                line[SCREEN_WIDTH - BORDER_X..].fill(color);
            }
        }
    }

    fn draw_tile(&mut self, tile: &Tile, xor: bool) -> Result<(), ApplyError> {
        let top = tile.row as usize * TILE_HEIGHT;
        let left = tile.column as usize * TILE_WIDTH;
        if top + TILE_HEIGHT > SCREEN_HEIGHT || left + TILE_WIDTH > SCREEN_WIDTH {
            return Err(ApplyError::OutOfRange {
                row: tile.row,
                column: tile.column,
            });
        }
        for (i, bits) in tile.pixels.iter().enumerate() {
            let line = &mut self.screen[top + i][left..left + TILE_WIDTH];
            for (j, pixel) in line.iter_mut().enumerate() {
                // bit 5 is the leftmost pixel
                let color = if bits & (1 << (5 - j)) != 0 {
                    tile.color1
                } else {
                    tile.color0
                };
                if xor {
                    *pixel ^= color;
                } else {
                    *pixel = color;
                }
            }
        }
        Ok(())
    }

    /// Shifts the screen one tile step per axis. Vacated pixels get `fill`,
    /// or the pixels pushed off the opposite edge when `fill` is None.
    fn scroll(&mut self, scroll: &Scroll, fill: Option<U4>) {
        match scroll.horizontal.command {
            HCommand::None => {}
            HCommand::Right => {
                for line in self.screen.iter_mut() {
                    line.rotate_right(TILE_WIDTH);
                    if let Some(color) = fill {
                        line[..TILE_WIDTH].fill(color);
                    }
                }
            }
            HCommand::Left => {
                for line in self.screen.iter_mut() {
                    line.rotate_left(TILE_WIDTH);
                    if let Some(color) = fill {
                        line[SCREEN_WIDTH - TILE_WIDTH..].fill(color);
                    }
                }
            }
        }
        match scroll.vertical.command {
            VCommand::None => {}
            VCommand::Down => {
                self.screen.rotate_right(TILE_HEIGHT);
                if let Some(color) = fill {
                    self.screen[..TILE_HEIGHT].fill([color; SCREEN_WIDTH]);
                }
            }
            VCommand::Up => {
                self.screen.rotate_left(TILE_HEIGHT);
                if let Some(color) = fill {
                    self.screen[SCREEN_HEIGHT - TILE_HEIGHT..].fill([color; SCREEN_WIDTH]);
                }
            }
        }
    }
}
