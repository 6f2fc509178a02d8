use super::{
    access::Access,
    graph_constants::{AccessType, RestrictionType},
    graph_id::GraphId,
};
use crate::datetime::time_domain::TimeDomain;

#[derive(Debug, Clone)]
pub struct AccessRestriction {
    pub edge_index: u32,
    pub access_type: AccessType,
    pub modes: Access,
    /// Packed time domain for timed types, a limit for the others.
    pub value: u64,
    /// Bit per lane number the restriction applies to.
    pub lanes: u64,
}

impl AccessRestriction {
    pub fn time_domain(&self) -> TimeDomain {
        TimeDomain::from_value(self.value)
    }

    pub fn applies_to_lane(&self, lane: u32) -> bool {
        lane < u64::BITS && self.lanes & (1 << lane) != 0
    }
}

/// Restriction spanning a chain of edges from `from_id` to `to_id`.
#[derive(Debug, Clone)]
pub struct ComplexRestriction {
    pub from_id: GraphId,
    pub to_id: GraphId,
    pub restriction_type: RestrictionType,
    pub modes: Access,
    pub vias: Vec<GraphId>,
    pub time_domain: Option<TimeDomain>,
}

impl ComplexRestriction {
    pub fn has_time_domain(&self) -> bool {
        self.time_domain.is_some()
    }

    /// Via edges in travel order.
    pub fn vias(&self) -> impl Iterator<Item = GraphId> + '_ {
        self.vias.iter().copied()
    }
}
