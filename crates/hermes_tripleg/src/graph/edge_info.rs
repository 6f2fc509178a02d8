use geo::Point;

use super::graph_constants::SignType;

#[derive(Debug, Clone, Copy, Default)]
pub struct NameInfo {
    /// Offset into the tile's text list.
    pub text_offset: u32,
    pub is_route_number: bool,
}

/// Data shared by both directions of a road segment.
#[derive(Debug, Clone, Default)]
pub struct EdgeInfo {
    pub way_id: u64,
    pub mean_elevation: f32,
    /// Posted speed limit in km/h, 0 when unknown.
    pub speed_limit: u8,
    pub names: Vec<NameInfo>,
    /// Geometry in the direction of the edge flagged `forward`.
    pub shape: Vec<Point<f64>>,
}

#[derive(Debug, Clone)]
pub struct Sign {
    /// Edge index, or node index when `is_node` is set.
    pub index: u32,
    pub is_node: bool,
    pub sign_type: SignType,
    pub text: String,
    pub is_route_number: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LaneConnectivity {
    pub to_edge_index: u32,
    pub from_way_id: u64,
    pub from_lanes: String,
    pub to_lanes: String,
}

/// Live traffic speeds of an edge split in up to three sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrafficSpeed {
    /// End of the first section, as a fraction of 255.
    pub breakpoint1: u8,
    /// End of the second section, as a fraction of 255.
    pub breakpoint2: u8,
    pub speed1: u8,
    pub speed2: u8,
    pub speed3: u8,
}
