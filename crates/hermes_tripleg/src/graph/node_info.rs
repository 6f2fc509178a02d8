use geo::{Coord, Point};

use super::{
    graph_constants::{IntersectionType, NodeType, Traversability},
    graph_id::GraphId,
};

/// Node record. Position is stored relative to the tile's base coordinate.
#[derive(Debug, Clone, Default)]
pub struct NodeInfo {
    pub offset: Coord<f64>,
    pub edge_index: u32,
    pub edge_count: u32,
    pub admin_index: u32,
    /// Index into the timezone table, 0 when unknown.
    pub timezone: u32,
    pub node_type: NodeType,
    pub intersection: IntersectionType,
    pub drive_on_right: bool,
    pub named_intersection: bool,
    pub transition_index: u32,
    pub transition_count: u32,
    /// Index of the transit stop record for transit nodes.
    pub stop_index: u32,
    /// Heading in degrees of each outgoing edge, by local edge index.
    pub headings: Vec<u16>,
    /// Driveability of each outgoing edge, by local edge index.
    pub local_driveability: Vec<Traversability>,
}

impl NodeInfo {
    pub fn lat_lng(&self, base: Point<f64>) -> Point<f64> {
        Point::new(base.x() + self.offset.x, base.y() + self.offset.y)
    }

    pub fn heading(&self, local_index: u32) -> u16 {
        self.headings
            .get(local_index as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn local_driveability(&self, local_index: u32) -> Traversability {
        self.local_driveability
            .get(local_index as usize)
            .copied()
            .unwrap_or_default()
    }

    pub fn is_transit_platform(&self) -> bool {
        self.node_type == NodeType::MultiUseTransitPlatform
    }

    pub fn is_fork(&self) -> bool {
        self.intersection == IntersectionType::Fork
    }
}

/// Link from a node to the same intersection on another hierarchy level.
#[derive(Debug, Clone, Copy)]
pub struct NodeTransition {
    pub end_node: GraphId,
    pub up: bool,
}
