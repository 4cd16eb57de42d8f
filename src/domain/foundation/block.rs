//! Block identifier - the three sequential question blocks of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three question blocks, in the order a subject walks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    /// Block 1: childhood inclinations, branching.
    Childhood,
    /// Block 2: vocation and work processes, weighted multiselect.
    Vocation,
    /// Block 3: perception / process / result columns.
    Columns,
}

impl Block {
    /// All blocks in session order.
    pub const ALL: [Block; 3] = [Block::Childhood, Block::Vocation, Block::Columns];

    /// Returns the 1-based block number.
    pub fn number(&self) -> u8 {
        match self {
            Block::Childhood => 1,
            Block::Vocation => 2,
            Block::Columns => 3,
        }
    }

    /// Returns the heading shown to subjects.
    pub fn title(&self) -> &'static str {
        match self {
            Block::Childhood => "Childhood and natural inclinations",
            Block::Vocation => "Professions, processes and shifts",
            Block::Columns => "Perception, process and result",
        }
    }

    /// Returns the block that follows this one, if any.
    pub fn next(&self) -> Option<Block> {
        match self {
            Block::Childhood => Some(Block::Vocation),
            Block::Vocation => Some(Block::Columns),
            Block::Columns => None,
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Block::Childhood => "childhood",
            Block::Vocation => "vocation",
            Block::Columns => "columns",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_numbered_in_session_order() {
        let numbers: Vec<u8> = Block::ALL.iter().map(Block::number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn next_walks_the_blocks_then_stops() {
        assert_eq!(Block::Childhood.next(), Some(Block::Vocation));
        assert_eq!(Block::Vocation.next(), Some(Block::Columns));
        assert_eq!(Block::Columns.next(), None);
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Block::Columns).unwrap(), "\"columns\"");
        assert_eq!(Block::Vocation.to_string(), "vocation");
    }
}
