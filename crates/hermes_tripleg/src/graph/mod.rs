mod access;
mod directed_edge;
mod edge_info;
mod graph_constants;
mod graph_id;
mod graph_reader;
mod graph_tile;
mod node_info;
mod restriction;
mod transit;

pub use access::Access;
pub use directed_edge::DirectedEdge;
pub use edge_info::{EdgeInfo, LaneConnectivity, NameInfo, Sign, TrafficSpeed};
pub use graph_constants::{
    AccessType, CycleLane, IntersectionType, NodeType, RestrictionType, RoadClass, SideOfStreet,
    SignType, Surface, TransitType, Traversability, Use,
};
pub use graph_id::GraphId;
pub use graph_reader::{GraphReader, InMemoryGraphReader};
pub use graph_tile::{GraphTile, TileHeader};
pub use node_info::{NodeInfo, NodeTransition};
pub use restriction::{AccessRestriction, ComplexRestriction};
pub use transit::{TransitDeparture, TransitRoute, TransitSchedule, TransitStop};
