use geo::{Point, Rect};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::{
    cost::Cost,
    costing::{BicycleType, PedestrianType, TravelMode, VehicleType},
    graph::{
        AccessType, CycleLane, GraphId, NodeType, RoadClass, Surface, TransitType, Traversability,
        Use,
    },
    location::Location,
    restriction_evaluator::{ComplexRestrictionCheck, LaneRestrictionCheck},
    shape_attributes::ShapeAttributes,
};

/// Annotated result of one leg of a route.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripLeg {
    pub locations: Vec<Location>,
    /// One node per path edge plus a final node without edge.
    pub nodes: Vec<TripLegNode>,
    pub shape: Vec<Point<f64>>,
    pub shape_attributes: Option<ShapeAttributes>,
    pub bbox: Option<Rect<f64>>,
    pub admins: Vec<TripLegAdmin>,
    pub osm_changeset: Option<u64>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripLegNode {
    pub edge: Option<TripLegEdge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub intersecting_edges: Vec<IntersectingEdge>,
    pub cost: NodeCost,
    pub admin_index: Option<u32>,
    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
    pub fork: Option<bool>,
    pub time_zone: Option<String>,
    pub transit_platform_info: Option<TransitPlatformInfo>,
    pub transit_station_info: Option<TransitStopInfo>,
    pub transit_egress_info: Option<TransitStopInfo>,
    pub bss_info: Option<BssInfo>,
    /// One entry per alternate cost model, `None` when it rejected the leg.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recosts: Vec<Option<RecostEntry>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NodeCost {
    pub elapsed_cost: Option<Cost>,
    pub transition_cost: Option<Cost>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RecostEntry {
    pub elapsed_cost: Cost,
    pub transition_cost: Cost,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetName {
    pub value: String,
    pub is_route_number: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignElement {
    pub text: String,
    pub is_route_number: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EdgeSign {
    pub exit_numbers: Vec<SignElement>,
    pub exit_onto_streets: Vec<SignElement>,
    pub exit_toward_locations: Vec<SignElement>,
    pub exit_names: Vec<SignElement>,
    pub guide_onto_streets: Vec<SignElement>,
    pub guide_toward_locations: Vec<SignElement>,
    pub junction_names: Vec<SignElement>,
    pub guidance_view_junctions: Vec<SignElement>,
}

impl EdgeSign {
    pub fn is_empty(&self) -> bool {
        self.exit_numbers.is_empty()
            && self.exit_onto_streets.is_empty()
            && self.exit_toward_locations.is_empty()
            && self.exit_names.is_empty()
            && self.guide_onto_streets.is_empty()
            && self.guide_toward_locations.is_empty()
            && self.junction_names.is_empty()
            && self.guidance_view_junctions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneConnectivityRecord {
    pub from_way_id: u64,
    pub from_lanes: String,
    pub to_lanes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sidewalk {
    Left,
    Right,
    BothSides,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitRouteInfo {
    pub block_id: Option<u32>,
    pub trip_id: Option<u32>,
    pub headsign: Option<String>,
    pub onestop_id: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub color: Option<u32>,
    pub text_color: Option<u32>,
    pub description: Option<String>,
    pub operator_onestop_id: Option<String>,
    pub operator_name: Option<String>,
    pub operator_url: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripLegEdge {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<StreetName>,
    /// Kilometers.
    pub length: Option<f64>,
    /// Kilometers per hour.
    pub speed: Option<f64>,
    pub road_class: Option<RoadClass>,
    pub begin_heading: Option<u32>,
    pub end_heading: Option<u32>,
    pub begin_shape_index: Option<u32>,
    pub end_shape_index: Option<u32>,
    pub traversability: Option<Traversability>,
    #[serde(rename = "use")]
    pub edge_use: Option<Use>,
    pub toll: Option<bool>,
    pub unpaved: Option<bool>,
    pub tunnel: Option<bool>,
    pub bridge: Option<bool>,
    pub roundabout: Option<bool>,
    pub internal_intersection: Option<bool>,
    pub drive_on_right: Option<bool>,
    pub surface: Option<Surface>,
    pub destination_only: Option<bool>,
    pub sign: Option<EdgeSign>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub turn_lanes: Vec<u16>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lane_connectivity: Vec<LaneConnectivityRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lane_restrictions: Vec<LaneRestrictionCheck>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub complex_restrictions: Vec<ComplexRestrictionCheck>,
    pub restriction: Option<AccessType>,
    pub has_time_restrictions: Option<bool>,
    pub travel_mode: Option<TravelMode>,
    pub vehicle_type: Option<VehicleType>,
    pub pedestrian_type: Option<PedestrianType>,
    pub bicycle_type: Option<BicycleType>,
    pub transit_type: Option<TransitType>,
    pub id: Option<GraphId>,
    pub way_id: Option<u64>,
    pub weighted_grade: Option<f32>,
    pub max_upward_grade: Option<f32>,
    pub max_downward_grade: Option<f32>,
    pub mean_elevation: Option<f32>,
    pub lane_count: Option<u32>,
    pub cycle_lane: Option<CycleLane>,
    pub bicycle_network: Option<u32>,
    pub sidewalk: Option<Sidewalk>,
    pub density: Option<u32>,
    pub speed_limit: Option<u32>,
    pub default_speed: Option<u32>,
    pub truck_speed: Option<u32>,
    pub truck_route: Option<bool>,
    pub transit_route_info: Option<TransitRouteInfo>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IntersectingEdge {
    pub begin_heading: Option<u32>,
    pub walkability: Option<Traversability>,
    pub cyclability: Option<Traversability>,
    pub driveability: Option<Traversability>,
    pub prev_name_consistency: Option<bool>,
    pub curr_name_consistency: Option<bool>,
    #[serde(rename = "use")]
    pub edge_use: Option<Use>,
    pub road_class: Option<RoadClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitPlatformType {
    Stop,
    Station,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitPlatformInfo {
    #[serde(rename = "type")]
    pub platform_type: Option<TransitPlatformType>,
    pub onestop_id: Option<String>,
    pub name: Option<String>,
    pub station_onestop_id: Option<String>,
    pub station_name: Option<String>,
    pub lat_lng: Option<Point<f64>>,
    pub arrival_date_time: Option<String>,
    pub departure_date_time: Option<String>,
    pub assumed_schedule: Option<bool>,
}

/// Transit station or egress at a node.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransitStopInfo {
    pub onestop_id: Option<String>,
    pub name: Option<String>,
    pub lat_lng: Option<Point<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BssInfo {
    pub rent_cost: Cost,
    pub return_cost: Cost,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripLegAdmin {
    pub country_code: Option<String>,
    pub country_text: Option<String>,
    pub state_code: Option<String>,
    pub state_text: Option<String>,
}
