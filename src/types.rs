use crate::bits::{U4, U5, U6};

/// One color table entry, 4 significant bits per channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: U4,
    pub green: U4,
    pub blue: U4,
}

impl Rgb {
    pub const fn new(red: U4, green: U4, blue: U4) -> Self {
        Rgb { red, green, blue }
    }

    /// Expands to 8 bits per channel by repeating the nibble, so 0xF becomes 0xFF.
    pub fn to_rgba8(self) -> [u8; 4] {
        let widen = |c: U4| c << 4 | c;
        [widen(self.red), widen(self.green), widen(self.blue), 0xFF]
    }
}

/// A 6x12 tile. Bit 5 of each row byte is the leftmost pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub color0: U4,
    pub color1: U4,
    pub row: U5,
    pub column: U6,
    pub pixels: [U6; 12],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HCommand {
    None,
    Right,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VCommand {
    None,
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HScroll {
    pub command: HCommand,
    /// 0-7, only meaningful for smooth scrolling
    pub offset: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VScroll {
    pub command: VCommand,
    /// 0-15, only meaningful for smooth scrolling
    pub offset: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scroll {
    pub color: U4,
    pub horizontal: HScroll,
    pub vertical: VScroll,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Empty,
    MemoryPreset { color: U4 },
    BorderPreset { color: U4 },
    TileBlock(Tile),
    TileBlockXor(Tile),
    LoadColorsLow([Rgb; 8]),
    LoadColorsHigh([Rgb; 8]),
    ScrollPreset(Scroll),
    ScrollCopy(Scroll),
    DefineTransparent { color: U4 },
}

impl Instruction {
    /// Short name used in packet listings.
    pub fn name(&self) -> &'static str {
        match self {
            Instruction::Empty => "empty",
            Instruction::MemoryPreset { .. } => "memory preset",
            Instruction::BorderPreset { .. } => "border preset",
            Instruction::TileBlock(_) => "tile block",
            Instruction::TileBlockXor(_) => "tile block xor",
            Instruction::LoadColorsLow(_) => "load colors low",
            Instruction::LoadColorsHigh(_) => "load colors high",
            Instruction::ScrollPreset(_) => "scroll preset",
            Instruction::ScrollCopy(_) => "scroll copy",
            Instruction::DefineTransparent { .. } => "define transparent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Rgb;

    #[test]
    fn widening() {
        assert_eq!(Rgb::new(0xF, 0x0, 0x8).to_rgba8(), [0xFF, 0x00, 0x88, 0xFF]);
        assert_eq!(Rgb::default().to_rgba8(), [0, 0, 0, 0xFF]);
    }
}
