//! Fixed binary encoding of a `MazeSpec`, used to move mazes from the
//! producer to solver workers without cloning. 24-byte header (six
//! little-endian u32: rows, cols, startX, startY, goalX, goalY) followed by
//! `rows*cols` row-major grid bytes.

use crate::types::{Grid, MazeSpec};

const HEADER_LEN: usize = 24;

/// Opaque, move-only byte buffer. Never clone this on the hot path — hand
/// it to exactly one worker.
#[derive(Debug)]
pub struct EncodedSpec {
    bytes: Vec<u8>,
}

impl EncodedSpec {
    pub fn encode(spec: &MazeSpec) -> Self {
        let rows = spec.rows();
        let cols = spec.cols();
        let mut bytes = Vec::with_capacity(HEADER_LEN + rows * cols);
        bytes.extend_from_slice(&(rows as u32).to_le_bytes());
        bytes.extend_from_slice(&(cols as u32).to_le_bytes());
        bytes.extend_from_slice(&(spec.start.0 as u32).to_le_bytes());
        bytes.extend_from_slice(&(spec.start.1 as u32).to_le_bytes());
        bytes.extend_from_slice(&(spec.goal.0 as u32).to_le_bytes());
        bytes.extend_from_slice(&(spec.goal.1 as u32).to_le_bytes());
        bytes.extend_from_slice(spec.grid.as_bytes());
        EncodedSpec { bytes }
    }

    pub fn decode(&self) -> MazeSpec {
        let read_u32 = |off: usize| -> u32 {
            u32::from_le_bytes(self.bytes[off..off + 4].try_into().unwrap())
        };
        let rows = read_u32(0) as usize;
        let cols = read_u32(4) as usize;
        let start_x = read_u32(8) as usize;
        let start_y = read_u32(12) as usize;
        let goal_x = read_u32(16) as usize;
        let goal_y = read_u32(20) as usize;
        let cells = self.bytes[HEADER_LEN..HEADER_LEN + rows * cols].to_vec();
        MazeSpec {
            grid: Grid::from_raw(rows, cols, cells),
            start: (start_x, start_y),
            goal: (goal_x, goal_y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;

    #[test]
    fn round_trips_a_maze_spec() {
        let mut grid = Grid::walls(3, 4);
        grid.set_passage(0, 0, true);
        grid.set_passage(3, 2, true);
        let spec = MazeSpec {
            grid,
            start: (0, 0),
            goal: (3, 2),
        };
        let encoded = EncodedSpec::encode(&spec);
        let decoded = encoded.decode();
        assert_eq!(decoded, spec);
    }

    #[test]
    fn header_is_24_bytes_of_little_endian_u32() {
        let grid = Grid::walls(2, 2);
        let spec = MazeSpec {
            grid,
            start: (1, 0),
            goal: (0, 1),
        };
        let encoded = EncodedSpec::encode(&spec);
        assert_eq!(&encoded.bytes[0..4], &2u32.to_le_bytes());
        assert_eq!(&encoded.bytes[4..8], &2u32.to_le_bytes());
        assert_eq!(&encoded.bytes[8..12], &1u32.to_le_bytes());
        assert_eq!(&encoded.bytes[12..16], &0u32.to_le_bytes());
        assert_eq!(&encoded.bytes[16..20], &0u32.to_le_bytes());
        assert_eq!(&encoded.bytes[20..24], &1u32.to_le_bytes());
        assert_eq!(encoded.bytes.len(), 24 + 4);
    }
}
