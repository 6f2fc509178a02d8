use fxhash::FxHashMap;
use geo::Point;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::graph::{GraphId, SideOfStreet};

/// Edge a location was snapped to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEdgeCandidate {
    pub graph_id: GraphId,
    pub percent_along: f64,
    pub projected: Point<f64>,
    #[serde(default)]
    pub side_of_street: SideOfStreet,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat_lng: Point<f64>,
    pub path_edges: Vec<PathEdgeCandidate>,
    pub projected_lat_lng: Option<Point<f64>>,
    pub side_of_street: Option<SideOfStreet>,
    pub date_time: Option<String>,
}

impl Location {
    pub fn new(lat_lng: Point<f64>, path_edges: Vec<PathEdgeCandidate>) -> Self {
        Location {
            lat_lng,
            path_edges,
            projected_lat_lng: None,
            side_of_street: None,
            date_time: None,
        }
    }

    pub fn candidate(&self, edge_id: GraphId) -> Option<&PathEdgeCandidate> {
        self.path_edges
            .iter()
            .find(|candidate| candidate.graph_id == edge_id)
    }

    /// Drops every candidate but the one for `edge_id`, or all of them when
    /// the location has none for that edge.
    pub fn retain_path_edge(&mut self, edge_id: GraphId) {
        self.path_edges.retain(|candidate| candidate.graph_id == edge_id);
        self.path_edges.truncate(1);
    }
}

/// Where the leg leaves or enters an edge around a discontinuity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeTrimmingInfo {
    pub trim: bool,
    pub distance_along: f64,
    pub vertex: Point<f64>,
}

/// Begin and end trimming by position of the edge in the path.
pub type EdgeTrimming = FxHashMap<usize, (EdgeTrimmingInfo, EdgeTrimmingInfo)>;
