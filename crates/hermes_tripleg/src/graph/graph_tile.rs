use fxhash::FxHashMap;
use geo::Point;

use super::{
    access::Access,
    directed_edge::DirectedEdge,
    edge_info::{EdgeInfo, LaneConnectivity, Sign, TrafficSpeed},
    graph_id::GraphId,
    node_info::{NodeInfo, NodeTransition},
    restriction::{AccessRestriction, ComplexRestriction},
    transit::{TransitDeparture, TransitRoute, TransitSchedule, TransitStop},
};
use crate::admin_index::AdminInfo;

#[derive(Debug, Clone)]
pub struct TileHeader {
    pub graph_id: GraphId,
    /// Days since 2014-01-01.
    pub date_created: u32,
    pub has_elevation: bool,
    pub base_ll: Point<f64>,
    pub dataset_id: u64,
}

impl TileHeader {
    pub fn new(graph_id: GraphId) -> Self {
        TileHeader {
            graph_id: graph_id.tile_base(),
            date_created: 0,
            has_elevation: false,
            base_ll: Point::new(0.0, 0.0),
            dataset_id: 0,
        }
    }
}

/// Read-only content of one graph tile.
#[derive(Debug, Clone)]
pub struct GraphTile {
    pub header: TileHeader,
    pub nodes: Vec<NodeInfo>,
    pub directed_edges: Vec<DirectedEdge>,
    pub edge_infos: Vec<EdgeInfo>,
    /// Names and transit strings. Offset 0 is reserved for "absent".
    pub text_list: Vec<String>,
    pub signs: Vec<Sign>,
    pub turn_lanes: FxHashMap<u32, Vec<u16>>,
    pub lane_connectivity: FxHashMap<u32, Vec<LaneConnectivity>>,
    pub access_restrictions: Vec<AccessRestriction>,
    pub complex_restrictions: Vec<ComplexRestriction>,
    pub traffic_speeds: FxHashMap<u32, TrafficSpeed>,
    pub transit_departures: Vec<TransitDeparture>,
    pub transit_routes: Vec<TransitRoute>,
    pub transit_stops: Vec<TransitStop>,
    pub transit_schedules: Vec<TransitSchedule>,
    pub admins: Vec<AdminInfo>,
    pub transitions: Vec<NodeTransition>,
}

impl GraphTile {
    pub fn new(header: TileHeader) -> Self {
        GraphTile {
            header,
            nodes: Vec::new(),
            directed_edges: Vec::new(),
            edge_infos: Vec::new(),
            text_list: vec![String::new()],
            signs: Vec::new(),
            turn_lanes: FxHashMap::default(),
            lane_connectivity: FxHashMap::default(),
            access_restrictions: Vec::new(),
            complex_restrictions: Vec::new(),
            traffic_speeds: FxHashMap::default(),
            transit_departures: Vec::new(),
            transit_routes: Vec::new(),
            transit_stops: Vec::new(),
            transit_schedules: Vec::new(),
            admins: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub fn id(&self) -> GraphId {
        self.header.graph_id
    }

    pub fn node(&self, id: GraphId) -> Option<&NodeInfo> {
        self.nodes.get(id.index())
    }

    pub fn directed_edge(&self, id: GraphId) -> Option<&DirectedEdge> {
        self.directed_edges.get(id.index())
    }

    /// Outgoing edges of a node with their graph ids, in storage order.
    pub fn node_edges<'a>(
        &'a self,
        node: &NodeInfo,
    ) -> impl Iterator<Item = (GraphId, &'a DirectedEdge)> + 'a {
        let tile_id = self.id();
        let start = node.edge_index as usize;
        let end = start + node.edge_count as usize;

        self.directed_edges
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(move |(i, edge)| (tile_id.with_id((start + i) as u32), edge))
    }

    pub fn edge_info(&self, edge: &DirectedEdge) -> Option<&EdgeInfo> {
        self.edge_infos.get(edge.edge_info_index as usize)
    }

    pub fn node_lat_lng(&self, node: &NodeInfo) -> Point<f64> {
        node.lat_lng(self.header.base_ll)
    }

    pub fn text(&self, offset: u32) -> Option<&str> {
        if offset == 0 {
            return None;
        }
        self.text_list.get(offset as usize).map(String::as_str)
    }

    /// Appends a string to the text list and returns its offset.
    pub fn add_text(&mut self, text: impl Into<String>) -> u32 {
        self.text_list.push(text.into());
        (self.text_list.len() - 1) as u32
    }

    pub fn edge_signs(&self, edge_index: u32) -> impl Iterator<Item = &Sign> {
        self.signs
            .iter()
            .filter(move |sign| !sign.is_node && sign.index == edge_index)
    }

    pub fn node_signs(&self, node_index: u32) -> impl Iterator<Item = &Sign> {
        self.signs
            .iter()
            .filter(move |sign| sign.is_node && sign.index == node_index)
    }

    pub fn turn_lanes(&self, edge_index: u32) -> Option<&[u16]> {
        self.turn_lanes.get(&edge_index).map(Vec::as_slice)
    }

    pub fn lane_connectivity(&self, edge_index: u32) -> &[LaneConnectivity] {
        self.lane_connectivity
            .get(&edge_index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Access restrictions of an edge targeting any of `modes`. Lane scoped
    /// restrictions are only returned when `include_lanes` is set.
    pub fn access_restrictions(
        &self,
        edge_index: u32,
        modes: Access,
        include_lanes: bool,
    ) -> Vec<&AccessRestriction> {
        self.access_restrictions
            .iter()
            .filter(|restriction| {
                restriction.edge_index == edge_index
                    && restriction.modes.intersects(modes)
                    && (include_lanes || !restriction.access_type.is_lane_restriction())
            })
            .collect()
    }

    /// Complex restrictions ending at `edge_id` and targeting any of `modes`.
    pub fn complex_restrictions_to(
        &self,
        edge_id: GraphId,
        modes: Access,
        lanes_only: bool,
    ) -> impl Iterator<Item = &ComplexRestriction> {
        self.complex_restrictions.iter().filter(move |restriction| {
            restriction.to_id == edge_id
                && restriction.modes.intersects(modes)
                && (!lanes_only || restriction.restriction_type.is_lane_restriction())
        })
    }

    pub fn traffic_speed(&self, edge_index: u32) -> Option<&TrafficSpeed> {
        self.traffic_speeds.get(&edge_index)
    }

    /// Departure of a trip on a transit line, preferring the first one not
    /// before `time_of_day`.
    pub fn transit_departure(
        &self,
        line_id: u32,
        trip_id: u32,
        time_of_day: u32,
    ) -> Option<&TransitDeparture> {
        let mut departures = self
            .transit_departures
            .iter()
            .filter(|departure| departure.line_id == line_id && departure.trip_id == trip_id);

        let first = departures.clone().next();
        departures
            .find(|departure| departure.departure_time >= time_of_day)
            .or(first)
    }

    pub fn transit_route(&self, index: u32) -> Option<&TransitRoute> {
        self.transit_routes.get(index as usize)
    }

    pub fn transit_stop(&self, index: u32) -> Option<&TransitStop> {
        self.transit_stops.get(index as usize)
    }

    pub fn transit_schedule(&self, index: u32) -> Option<&TransitSchedule> {
        self.transit_schedules.get(index as usize)
    }

    pub fn admin(&self, index: u32) -> Option<&AdminInfo> {
        self.admins.get(index as usize)
    }

    pub fn node_transitions(&self, node: &NodeInfo) -> &[NodeTransition] {
        let start = node.transition_index as usize;
        let end = start + node.transition_count as usize;
        self.transitions.get(start..end).unwrap_or_default()
    }
}
