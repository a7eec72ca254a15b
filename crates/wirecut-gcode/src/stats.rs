//! Summary counts over generated program text.

use serde::{Deserialize, Serialize};

/// Line and motion counts of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GcodeStats {
    pub total_lines: usize,
    /// Rapid plus feed moves
    pub move_commands: usize,
    pub rapid_moves: usize,
    /// `G1` lines, including the feed-rate declaration
    pub feed_moves: usize,
}

impl GcodeStats {
    pub fn from_text(text: &str) -> Self {
        let mut stats = Self::default();
        for line in text.lines() {
            stats.total_lines += 1;
            match line.split_whitespace().next() {
                Some("G0") | Some("G00") => stats.rapid_moves += 1,
                Some("G1") | Some("G01") => stats.feed_moves += 1,
                _ => {}
            }
        }
        stats.move_commands = stats.rapid_moves + stats.feed_moves;
        stats
    }
}
