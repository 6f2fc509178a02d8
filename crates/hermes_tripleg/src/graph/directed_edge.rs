use super::{
    access::Access,
    graph_constants::{CycleLane, RoadClass, Surface, Traversability, Use},
    graph_id::GraphId,
};

/// One traversable direction of a road segment as stored in its tile.
#[derive(Debug, Clone, Default)]
pub struct DirectedEdge {
    pub end_node: GraphId,
    /// Index of the shared edge info (shape, names, way id) in the tile.
    pub edge_info_index: u32,
    /// Index of the opposing edge among the end node's outgoing edges.
    pub opp_index: u32,
    pub local_edge_index: u32,
    pub opp_local_index: u32,
    /// Length in meters.
    pub length: u32,
    /// Whether the edge runs in the same direction as its stored shape.
    pub forward: bool,

    pub forward_access: Access,
    pub reverse_access: Access,

    pub classification: RoadClass,
    pub edge_use: Use,
    pub surface: Surface,
    pub cycle_lane: CycleLane,
    pub bike_network: u8,

    pub toll: bool,
    pub unpaved: bool,
    pub tunnel: bool,
    pub bridge: bool,
    pub roundabout: bool,
    pub internal: bool,
    pub dest_only: bool,
    pub truck_route: bool,
    pub dismount: bool,
    pub sidewalk_left: bool,
    pub sidewalk_right: bool,

    pub has_sign: bool,
    pub has_turn_lanes: bool,
    pub has_lane_connectivity: bool,
    pub has_access_restriction: bool,
    /// Modes for which a complex restriction ends at this edge.
    pub end_restriction: Access,

    pub is_shortcut: bool,
    pub shortcut: u8,
    pub superseded: u8,

    pub lane_count: u8,
    pub density: u8,
    pub speed: u8,
    pub truck_speed: u8,
    pub weighted_grade: u8,
    pub max_up_slope: i32,
    pub max_down_slope: i32,
    /// Bit per local edge index, set when that edge shares a name with this one.
    pub name_consistency: u8,

    pub line_id: u32,
}

impl DirectedEdge {
    pub fn name_consistency(&self, local_index: u32) -> bool {
        local_index < u8::BITS && self.name_consistency & (1 << local_index) != 0
    }

    pub fn is_transit_line(&self) -> bool {
        self.edge_use.is_transit_line()
    }

    pub fn superseded_by(&self, shortcut: &DirectedEdge) -> bool {
        shortcut.is_shortcut && shortcut.shortcut & self.superseded != 0
    }

    /// Classifies the edge for one access bit, swapping the polarity when the
    /// edge is traversed against its stored direction.
    pub fn traversability(&self, access: Access, traversed_forward: bool) -> Traversability {
        let forward = self.forward_access.intersects(access);
        let reverse = self.reverse_access.intersects(access);
        let (forward, reverse) = if traversed_forward {
            (forward, reverse)
        } else {
            (reverse, forward)
        };

        match (forward, reverse) {
            (true, true) => Traversability::Both,
            (true, false) => Traversability::Forward,
            (false, true) => Traversability::Backward,
            (false, false) => Traversability::None,
        }
    }
}
