use serde::{Deserialize, Serialize};

use crate::{cost::Cost, costing::TravelMode, graph::GraphId};

/// One edge of a computed path with the cost accumulated up to its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathInfo {
    pub edge_id: GraphId,
    pub mode: TravelMode,
    /// Transit trip, 0 when none.
    pub trip_id: u32,
    /// Index of the access restriction active on the edge.
    pub restriction_index: Option<usize>,
    pub elapsed_cost: Cost,
    /// Cost of entering the edge.
    pub transition_cost: Cost,
}

impl PathInfo {
    pub fn new(edge_id: GraphId, mode: TravelMode, elapsed_cost: Cost) -> Self {
        PathInfo {
            edge_id,
            mode,
            trip_id: 0,
            restriction_index: None,
            elapsed_cost,
            transition_cost: Cost::zero(),
        }
    }

    pub fn with_trip_id(mut self, trip_id: u32) -> Self {
        self.trip_id = trip_id;
        self
    }

    pub fn with_restriction_index(mut self, index: usize) -> Self {
        self.restriction_index = Some(index);
        self
    }

    pub fn with_transition_cost(mut self, transition_cost: Cost) -> Self {
        self.transition_cost = transition_cost;
        self
    }
}
