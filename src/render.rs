use crate::cdg::{Cdg, SCREEN_HEIGHT, SCREEN_WIDTH};

/// Bytes in one RGBA8 frame covering the whole screen, border included.
pub const FRAME_LEN: usize = SCREEN_WIDTH * SCREEN_HEIGHT * 4;

/// Copies the screen into an RGBA8 frame, looking each index up in the color table.
///
/// # Arguments
///
/// * `cdg` - The display state to read
/// * `frame` - Row-major RGBA8 pixels, at least `FRAME_LEN` bytes
/// * `transparency` - Write the transparent color index with zero alpha
///
pub fn draw(cdg: &Cdg, frame: &mut [u8], transparency: bool) {
    debug_assert!(frame.len() >= FRAME_LEN, "frame holds {} bytes", frame.len());
    let mut palette = [[0; 4]; 16];
    for (entry, rgb) in palette.iter_mut().zip(cdg.colors()) {
        *entry = rgb.to_rgba8();
    }
    if transparency {
        palette[cdg.transparent_color() as usize][3] = 0;
    }
    let pixels = cdg.screen().iter().flatten();
    for (out, index) in frame.chunks_exact_mut(4).zip(pixels) {
        out.copy_from_slice(&palette[*index as usize]);
    }
}

#[cfg(test)]
mod tests {
    use super::{draw, FRAME_LEN};
    use crate::cdg::{Cdg, SCREEN_WIDTH};
    use crate::types::{Instruction, Rgb, Tile};

    fn scene() -> Cdg {
        let mut cdg = Cdg::new();
        let mut colors = [Rgb::default(); 8];
        colors[1] = Rgb::new(0xF, 0x0, 0x0);
        colors[2] = Rgb::new(0x0, 0x8, 0x1);
        cdg.apply(&Instruction::LoadColorsLow(colors)).unwrap();
        cdg.apply(&Instruction::MemoryPreset { color: 1 }).unwrap();
        let tile = Tile { color0: 2, color1: 2, row: 0, column: 1, pixels: [0; 12] };
        cdg.apply(&Instruction::TileBlock(tile)).unwrap();
        cdg
    }

    #[test]
    fn expands_colors() {
        let cdg = scene();
        let mut frame = vec![0; FRAME_LEN];
        draw(&cdg, &mut frame, false);
        assert_eq!(frame[..4], [0xFF, 0x00, 0x00, 0xFF]);
        assert_eq!(frame[6 * 4..7 * 4], [0x00, 0x88, 0x11, 0xFF]);
        let last_row = (SCREEN_WIDTH * 215) * 4;
        assert_eq!(frame[last_row..last_row + 4], [0xFF, 0x00, 0x00, 0xFF]);
    }

    #[test]
    fn transparent_index() {
        let mut cdg = scene();
        cdg.apply(&Instruction::DefineTransparent { color: 2 }).unwrap();
        let mut frame = vec![0; FRAME_LEN];
        draw(&cdg, &mut frame, true);
        assert_eq!(frame[3], 0xFF);
        assert_eq!(frame[6 * 4 + 3], 0);
        draw(&cdg, &mut frame, false);
        assert_eq!(frame[6 * 4 + 3], 0xFF);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn short_frame() {
        let mut frame = vec![0; FRAME_LEN - 4];
        draw(&scene(), &mut frame, false);
    }
}
