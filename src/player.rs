use std::time::Duration;

use log::warn;

use crate::cdg::Cdg;
use crate::decode::decode;
use crate::packet::{packets_due, SubCode};
use crate::types::Instruction;

/// Feeds a decoded stream into one display state at the subcode packet rate.
pub struct Player {
    cdg: Cdg,
    instructions: Vec<Instruction>,
    cursor: usize,
    skipped: usize,
}

impl Player {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Player {
            cdg: Cdg::new(),
            instructions,
            cursor: 0,
            skipped: 0,
        }
    }

    pub fn from_packets(packets: &[SubCode]) -> Self {
        Self::new(packets.iter().map(decode).collect())
    }

    pub fn cdg(&self) -> &Cdg {
        &self.cdg
    }

    /// Packets consumed so far, empty ones included.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Tiles dropped for lying outside the screen.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.instructions.len()
    }

    /// Applies every packet due by `elapsed`, returning how many were applied.
    pub fn advance_to(&mut self, elapsed: Duration) -> usize {
        let due = usize::try_from(packets_due(elapsed)).unwrap_or(usize::MAX);
        self.advance_until(due.min(self.instructions.len()))
    }

    pub fn run_to_end(&mut self) -> usize {
        self.advance_until(self.instructions.len())
    }

    fn advance_until(&mut self, target: usize) -> usize {
        let start = self.cursor;
        while self.cursor < target {
            if let Err(e) = self.cdg.apply(&self.instructions[self.cursor]) {
                warn!("Skipping packet {}: {}", self.cursor, e);
                self.skipped += 1;
            }
            self.cursor += 1;
        }
        self.cursor - start
    }
}

#[cfg(test)]
mod tests {
    use super::Player;
    use crate::packet::SubCode;
    use crate::types::{Instruction, Tile};
    use std::time::Duration;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn stream() -> Vec<Instruction> {
        let bad = Tile { color0: 1, color1: 1, row: 20, column: 0, pixels: [0; 12] };
        let good = Tile { row: 0, ..bad };
        vec![
            Instruction::MemoryPreset { color: 4 },
            Instruction::Empty,
            Instruction::TileBlock(bad),
            Instruction::TileBlock(good),
            Instruction::BorderPreset { color: 2 },
        ]
    }

    #[test]
    fn paced_playback() {
        init();
        let mut player = Player::new(stream());
        assert_eq!(player.advance_to(Duration::from_millis(0)), 0);
        // 300 packets per second, so 2 packets after 7ms
        assert_eq!(player.advance_to(Duration::from_millis(7)), 2);
        assert_eq!(player.cdg().pixel(10, 10), Some(4));
        assert_eq!(player.advance_to(Duration::from_millis(7)), 0);
        assert_eq!(player.advance_to(Duration::from_secs(60)), 3);
        assert!(player.is_finished());
        assert_eq!(player.position(), 5);
    }

    #[test]
    fn out_of_range_tiles_are_skipped() {
        init();
        let mut player = Player::new(stream());
        assert_eq!(player.run_to_end(), 5);
        assert_eq!(player.skipped(), 1);
        assert_eq!(player.cdg().pixel(5, 8), Some(1));
        // the later border preset paints over the tile's top rows
        assert_eq!(player.cdg().pixel(5, 5), Some(2));
        assert_eq!(player.cdg().pixel(0, 0), Some(2));
        assert_eq!(player.cdg().pixel(20, 20), Some(4));
    }

    #[test]
    fn keeps_empty_packets_for_timing() {
        let mut quiet = SubCode::with_data(1, [0; 16]);
        quiet.command = 0;
        let player = Player::from_packets(&[quiet, SubCode::with_data(1, [3; 16])]);
        assert_eq!(player.len(), 2);
    }
}
