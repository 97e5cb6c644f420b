use log::{debug, trace};

use crate::bits::{low_bits, low_nibble, split_color_word, SUBCODE_MASK};
use crate::packet::SubCode;
use crate::types::{HCommand, HScroll, Instruction, Rgb, Scroll, Tile, VCommand, VScroll};

pub const MEMORY_PRESET: u8 = 1;
pub const BORDER_PRESET: u8 = 2;
pub const TILE_BLOCK: u8 = 6;
pub const SCROLL_PRESET: u8 = 20;
pub const SCROLL_COPY: u8 = 24;
pub const DEFINE_TRANSPARENT: u8 = 28;
pub const LOAD_COLORS_LOW: u8 = 30;
pub const LOAD_COLORS_HIGH: u8 = 31;
pub const TILE_BLOCK_XOR: u8 = 38;

pub fn decode(sub: &SubCode) -> Instruction {
    // Packets without data still occupy a time slot, so they come back as Empty
    if !sub.contains_data() {
        return Instruction::Empty;
    }
    let data = &sub.data;
    let instruction = match sub.instruction() {
        MEMORY_PRESET => {
            if low_nibble(data[1]) != 0 {
                debug!("Skipping repeated memory preset");
                Instruction::Empty
            } else {
                Instruction::MemoryPreset { color: low_nibble(data[0]) }
            }
        }
        BORDER_PRESET => Instruction::BorderPreset { color: low_nibble(data[0]) },
        TILE_BLOCK => Instruction::TileBlock(decode_tile(data)),
        TILE_BLOCK_XOR => Instruction::TileBlockXor(decode_tile(data)),
        LOAD_COLORS_LOW => Instruction::LoadColorsLow(decode_colors(data)),
        LOAD_COLORS_HIGH => Instruction::LoadColorsHigh(decode_colors(data)),
        SCROLL_PRESET => Instruction::ScrollPreset(decode_scroll(data)),
        SCROLL_COPY => Instruction::ScrollCopy(decode_scroll(data)),
        DEFINE_TRANSPARENT => Instruction::DefineTransparent { color: low_nibble(data[0]) },
        unknown => {
            debug!("Ignoring unknown instruction {}", unknown);
            Instruction::Empty
        }
    };
    trace!("Decoded {:?}", instruction);
    instruction
}

fn decode_tile(data: &[u8; 16]) -> Tile {
    let mut pixels = [0; 12];
    for (row, byte) in pixels.iter_mut().zip(&data[4..16]) {
        *row = *byte & SUBCODE_MASK;
    }
    Tile {
        color0: low_nibble(data[0]),
        color1: low_nibble(data[1]),
        row: low_bits(data[2], 5),
        column: low_bits(data[3], 6),
        pixels,
    }
}

fn decode_colors(data: &[u8; 16]) -> [Rgb; 8] {
    let mut colors = [Rgb::default(); 8];
    for (color, pair) in colors.iter_mut().zip(data.chunks_exact(2)) {
        *color = split_color_word(pair[0], pair[1]);
    }
    colors
}

/// Splits a 6-bit scroll field into its 2-bit command and the raw offset bits.
fn split_scroll_field(field: u8) -> (u8, u8) {
    let field = field & SUBCODE_MASK;
    ((field >> 4) & 0x3, field)
}

fn decode_scroll(data: &[u8; 16]) -> Scroll {
    let (h_cmd, h_field) = split_scroll_field(data[1]);
    let (v_cmd, v_field) = split_scroll_field(data[2]);
    let horizontal = HScroll {
        command: match h_cmd {
            1 => HCommand::Right,
            2 => HCommand::Left,
            // 3 is reserved
            _ => HCommand::None,
        },
        offset: low_bits(h_field, 3),
    };
    let vertical = VScroll {
        command: match v_cmd {
            1 => VCommand::Down,
            2 => VCommand::Up,
            _ => VCommand::None,
        },
        offset: low_bits(v_field, 4),
    };
    Scroll {
        color: low_nibble(data[0]),
        horizontal,
        vertical,
    }
}
