//! Builds the inner token string for one example, then JSON-encodes it as a
//! single `{"text": ...}` line. The inner string is assembled with a
//! hand-rolled byte writer (matching the throughput-sensitive style used
//! elsewhere in this pipeline); only the final escape/quote step goes
//! through `serde_json`, which guarantees correct escaping.

use std::io::Write;

use crate::types::{MazeSpec, ReasoningEvent, Solution};

/// Builds the token string for one example: geometry, walls, reasoning
/// trace, and plan, space-joined in the fixed order the format requires.
pub fn build_tokens(spec: &MazeSpec, solution: &Solution, buffer: &mut Vec<u8>) {
    buffer.clear();

    write!(
        buffer,
        "query start {} {} goal {} {}",
        spec.start.0, spec.start.1, spec.goal.0, spec.goal.1
    )
    .expect("writing to a Vec<u8> cannot fail");

    for y in 0..spec.rows() {
        for x in 0..spec.cols() {
            if !spec.grid.is_passage(x, y) {
                write!(buffer, " wall {} {}", x, y).expect("writing to a Vec<u8> cannot fail");
            }
        }
    }

    buffer.extend_from_slice(b" reasoning");
    for event in &solution.reasoning {
        match *event {
            ReasoningEvent::Close { x, y, g, h } => {
                write!(buffer, " close {} {} c{} c{}", x, y, g, h)
                    .expect("writing to a Vec<u8> cannot fail");
            }
            ReasoningEvent::Create { x, y, g, h } => {
                write!(buffer, " create {} {} c{} c{}", x, y, g, h)
                    .expect("writing to a Vec<u8> cannot fail");
            }
        }
    }

    buffer.extend_from_slice(b" solution");
    for &(x, y) in &solution.plan {
        write!(buffer, " plan {} {}", x, y).expect("writing to a Vec<u8> cannot fail");
    }

    buffer.extend_from_slice(b" end");
}

/// Serializes one example as a complete, newline-terminated JSON line.
pub fn serialize_example(spec: &MazeSpec, solution: &Solution, out: &mut Vec<u8>) {
    let mut token_buffer = Vec::with_capacity(4096);
    build_tokens(spec, solution, &mut token_buffer);
    let text = String::from_utf8(token_buffer).expect("tokens are ASCII");

    serde_json::to_writer(&mut *out, &serde_json::json!({ "text": text }))
        .expect("writing to a Vec<u8> cannot fail");
    out.push(b'\n');
}

/// Serializes a contiguous batch of (spec, solution) pairs into one buffer,
/// in the order given.
pub fn serialize_batch(items: &[(MazeSpec, Solution)]) -> Vec<u8> {
    let mut out = Vec::with_capacity(items.len() * 4096);
    for (spec, solution) in items {
        serialize_example(spec, solution, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Grid;

    #[test]
    fn emits_a_single_text_field_ending_in_end() {
        let mut grid = Grid::walls(2, 2);
        grid.set_passage(0, 0, true);
        grid.set_passage(1, 0, true);
        let spec = MazeSpec {
            grid,
            start: (0, 0),
            goal: (1, 0),
        };
        let solution = Solution {
            reasoning: vec![
                ReasoningEvent::Close { x: 0, y: 0, g: 0, h: 1 },
                ReasoningEvent::Create { x: 1, y: 0, g: 1, h: 0 },
                ReasoningEvent::Close { x: 1, y: 0, g: 1, h: 0 },
            ],
            plan: vec![(0, 0), (1, 0)],
        };

        let mut out = Vec::new();
        serialize_example(&spec, &solution, &mut out);
        let line = String::from_utf8(out).unwrap();
        assert!(line.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        let text = parsed["text"].as_str().unwrap();
        assert!(text.starts_with("query start 0 0 goal 1 0"));
        assert!(text.contains("wall 0 1"));
        assert!(text.contains("wall 1 1"));
        assert!(text.ends_with(" end"));
    }

    #[test]
    fn token_order_matches_the_canonical_layout() {
        let mut grid = Grid::walls(1, 2);
        grid.set_passage(0, 0, true);
        grid.set_passage(1, 0, true);
        let spec = MazeSpec {
            grid,
            start: (0, 0),
            goal: (1, 0),
        };
        let solution = Solution {
            reasoning: vec![ReasoningEvent::Close { x: 0, y: 0, g: 0, h: 1 }],
            plan: vec![(0, 0), (1, 0)],
        };

        let mut buffer = Vec::new();
        build_tokens(&spec, &solution, &mut buffer);
        let text = String::from_utf8(buffer).unwrap();
        let tokens: Vec<&str> = text.split(' ').collect();

        assert_eq!(&tokens[0..7], &["query", "start", "0", "0", "goal", "1", "0"]);
        let reasoning_pos = tokens.iter().position(|&t| t == "reasoning").unwrap();
        let solution_pos = tokens.iter().position(|&t| t == "solution").unwrap();
        assert!(reasoning_pos < solution_pos);
        assert_eq!(tokens.last(), Some(&"end"));
    }
}
