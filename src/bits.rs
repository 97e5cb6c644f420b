use crate::types::Rgb;

pub type U4 = u8;
pub type U5 = u8;
pub type U6 = u8;

/// Everything above the low 6 bits of a subcode byte is P/Q channel data.
pub const SUBCODE_MASK: u8 = 0x3F;

/// Widths are always constants, so an oversized one is a bug at the call site.
pub fn n_set_bits(num_bits: u8) -> u8 {
    debug_assert!(num_bits <= 8);
    ((1_u16 << num_bits) - 1) as u8
}

/// Keeps the lowest num_bits bits of byte
///
/// # Arguments
///
/// * `byte` - A raw byte from the subcode record
/// * `num_bits` - How many of the low bits are meaningful, at most 8
///
pub fn low_bits(byte: u8, num_bits: u8) -> u8 {
    byte & n_set_bits(num_bits)
}

pub fn low_nibble(byte: u8) -> U4 {
    low_bits(byte, 4)
}

/// Splits one color table entry out of a pair of payload bytes.
///
/// Once the P and Q bits are cleared the word reads `00rrrrgg 00ggbbbb`.
pub fn split_color_word(high: u8, low: u8) -> Rgb {
    let word = ((high as u16) << 8 | low as u16) & 0x3F3F;
    let red = (word >> 10) & 0xF;
    // two bits of green sit in each byte
    let green = ((word >> 6) & 0xC) | ((word >> 4) & 0xF);
    let blue = word & 0xF;
    Rgb {
        red: red as U4,
        green: green as U4,
        blue: blue as U4,
    }
}
