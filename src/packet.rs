use std::io::{self, Read};
use std::time::Duration;

use log::warn;

use crate::bits::SUBCODE_MASK;

pub const PACKET_SIZE: usize = 24;
/// Masked command value of every packet that carries graphics.
pub const CDG_COMMAND: u8 = 0x09;

pub const PACKETS_PER_SECTOR: u64 = 4;
pub const SECTORS_PER_SECOND: u64 = 75;
pub const PACKETS_PER_SECOND: u64 = PACKETS_PER_SECTOR * SECTORS_PER_SECOND;
pub const PACKET_DURATION: Duration = Duration::from_micros(1_000_000 / PACKETS_PER_SECOND);

/// One raw 24-byte subcode record, fields exactly as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCode {
    pub command: u8,
    pub instruction: u8,
    pub parity_q: [u8; 2],
    pub data: [u8; 16],
    pub parity_p: [u8; 4],
}

impl SubCode {
    pub fn from_bytes(bytes: &[u8; PACKET_SIZE]) -> Self {
        let mut parity_q = [0; 2];
        let mut data = [0; 16];
        let mut parity_p = [0; 4];
        parity_q.copy_from_slice(&bytes[2..4]);
        data.copy_from_slice(&bytes[4..20]);
        parity_p.copy_from_slice(&bytes[20..24]);
        SubCode {
            command: bytes[0],
            instruction: bytes[1],
            parity_q,
            data,
            parity_p,
        }
    }

    /// Builds a graphics packet with zeroed parity, mostly useful in tests.
    pub fn with_data(instruction: u8, data: [u8; 16]) -> Self {
        SubCode {
            command: CDG_COMMAND,
            instruction,
            parity_q: [0; 2],
            data,
            parity_p: [0; 4],
        }
    }

    pub fn command(&self) -> u8 {
        self.command & SUBCODE_MASK
    }

    pub fn instruction(&self) -> u8 {
        self.instruction & SUBCODE_MASK
    }

    pub fn contains_data(&self) -> bool {
        self.command() == CDG_COMMAND
    }
}

/// How many packets a player should have consumed after `elapsed`.
pub fn packets_due(elapsed: Duration) -> u64 {
    (elapsed.as_micros() * PACKETS_PER_SECOND as u128 / 1_000_000) as u64
}

/// Reads consecutive subcode records until the source runs dry.
pub struct Packets<R> {
    read: R,
    done: bool,
}

impl<R: Read> Packets<R> {
    pub fn new(read: R) -> Self {
        Packets { read, done: false }
    }

    /// Fills `buf` as far as the source allows, returning the byte count.
    fn fill(&mut self, buf: &mut [u8; PACKET_SIZE]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < PACKET_SIZE {
            match self.read.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read> Iterator for Packets<R> {
    type Item = io::Result<SubCode>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = [0; PACKET_SIZE];
        match self.fill(&mut buf) {
            Ok(PACKET_SIZE) => Some(Ok(SubCode::from_bytes(&buf))),
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(n) => {
                warn!("Dropping truncated trailing record of {} bytes", n);
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Reads every record, empty ones included since they still take up a time slot.
pub fn read_packets(read: impl Read) -> io::Result<Vec<SubCode>> {
    Packets::new(read).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn record(seed: u8) -> [u8; PACKET_SIZE] {
        let mut bytes = [0; PACKET_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8);
        }
        bytes
    }

    #[test]
    fn field_layout() {
        let sub = SubCode::from_bytes(&record(0));
        assert_eq!(sub.command, 0);
        assert_eq!(sub.instruction, 1);
        assert_eq!(sub.parity_q, [2, 3]);
        assert_eq!(sub.data[0], 4);
        assert_eq!(sub.data[15], 19);
        assert_eq!(sub.parity_p, [20, 21, 22, 23]);
    }

    #[test]
    fn command_is_masked() {
        let mut bytes = [0; PACKET_SIZE];
        bytes[0] = 0xC9;
        bytes[1] = 0xDE;
        let sub = SubCode::from_bytes(&bytes);
        assert!(sub.contains_data());
        assert_eq!(sub.instruction(), 0x1E);
        bytes[0] = 0x08;
        assert!(!SubCode::from_bytes(&bytes).contains_data());
    }

    #[test]
    fn reads_whole_records() {
        init();
        let mut stream = Vec::new();
        stream.extend_from_slice(&record(0));
        stream.extend_from_slice(&record(100));
        let packets = read_packets(&stream[..]).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[1].command, 100);
    }

    #[test]
    fn drops_truncated_tail() {
        init();
        let mut stream = record(0).to_vec();
        stream.extend_from_slice(&[9; 10]);
        let packets = read_packets(&stream[..]).unwrap();
        assert_eq!(packets.len(), 1);
        assert!(read_packets(io::empty()).unwrap().is_empty());
    }

    #[test]
    fn pacing() {
        assert_eq!(PACKETS_PER_SECOND, 300);
        assert_eq!(PACKET_DURATION, Duration::from_micros(3333));
        assert_eq!(packets_due(Duration::from_secs(0)), 0);
        assert_eq!(packets_due(Duration::from_secs(2)), 600);
        assert_eq!(packets_due(Duration::from_millis(10)), 3);
    }
}
