use std::fmt;

use serde::{Deserialize, Serialize};

const LEVEL_BITS: u32 = 3;
const TILE_BITS: u32 = 22;
const ID_BITS: u32 = 21;

const LEVEL_MASK: u64 = (1 << LEVEL_BITS) - 1;
const TILE_MASK: u64 = (1 << TILE_BITS) - 1;
const ID_MASK: u64 = (1 << ID_BITS) - 1;

/// Identifier of a node or directed edge: hierarchy level, tile and index
/// within the tile, packed into 46 bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(u64);

impl GraphId {
    pub const INVALID: GraphId = GraphId((1 << (LEVEL_BITS + TILE_BITS + ID_BITS)) - 1);

    pub const fn new(level: u8, tile_id: u32, id: u32) -> Self {
        GraphId(
            (level as u64 & LEVEL_MASK)
                | ((tile_id as u64 & TILE_MASK) << LEVEL_BITS)
                | ((id as u64 & ID_MASK) << (LEVEL_BITS + TILE_BITS)),
        )
    }

    pub const fn from_value(value: u64) -> Self {
        GraphId(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub const fn level(&self) -> u8 {
        (self.0 & LEVEL_MASK) as u8
    }

    pub const fn tile_id(&self) -> u32 {
        ((self.0 >> LEVEL_BITS) & TILE_MASK) as u32
    }

    pub const fn id(&self) -> u32 {
        ((self.0 >> (LEVEL_BITS + TILE_BITS)) & ID_MASK) as u32
    }

    pub const fn index(&self) -> usize {
        self.id() as usize
    }

    pub fn is_valid(&self) -> bool {
        *self != GraphId::INVALID
    }

    /// Identifier of the tile owning this node or edge.
    pub const fn tile_base(&self) -> GraphId {
        GraphId::new(self.level(), self.tile_id(), 0)
    }

    pub const fn with_id(&self, id: u32) -> GraphId {
        GraphId::new(self.level(), self.tile_id(), id)
    }
}

impl Default for GraphId {
    fn default() -> Self {
        GraphId::INVALID
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "invalid");
        }
        write!(f, "{}/{}/{}", self.level(), self.tile_id(), self.id())
    }
}

impl fmt::Debug for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GraphId({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_id_fields() {
        let id = GraphId::new(2, 756_425, 12);

        assert_eq!(id.level(), 2);
        assert_eq!(id.tile_id(), 756_425);
        assert_eq!(id.id(), 12);
        assert!(id.is_valid());
        assert_eq!(id.tile_base(), GraphId::new(2, 756_425, 0));
        assert_eq!(id.with_id(3).id(), 3);
        assert_eq!(id.to_string(), "2/756425/12");
    }

    #[test]
    fn test_default_is_invalid() {
        assert!(!GraphId::default().is_valid());
        assert_eq!(GraphId::default().to_string(), "invalid");
    }
}
