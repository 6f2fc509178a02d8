use std::str::FromStr;

use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::AttributeFilterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Edge,
    Node,
    Admin,
    ShapeAttributes,
    Leg,
}

impl Category {
    fn prefix(&self) -> &'static str {
        match self {
            Category::Edge => "edge",
            Category::Node => "node",
            Category::Admin => "admin",
            Category::ShapeAttributes => "shape_attributes",
            Category::Leg => "",
        }
    }
}

macro_rules! define_attributes {
    ($($variant:ident => $key:literal),* $(,)?) => {
        /// Output field of a trip leg that can be requested or filtered out.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Attribute {
            $($variant),*
        }

        impl Attribute {
            pub const ALL: &'static [Attribute] = &[$(Attribute::$variant),*];

            pub fn key(&self) -> &'static str {
                match self {
                    $(Attribute::$variant => $key),*
                }
            }
        }

        impl FromStr for Attribute {
            type Err = AttributeFilterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok(Attribute::$variant),)*
                    _ => Err(AttributeFilterError::UnknownAttribute(s.to_owned())),
                }
            }
        }
    };
}

define_attributes! {
    EdgeNames => "edge.names",
    EdgeLength => "edge.length",
    EdgeSpeed => "edge.speed",
    EdgeRoadClass => "edge.road_class",
    EdgeBeginHeading => "edge.begin_heading",
    EdgeEndHeading => "edge.end_heading",
    EdgeBeginShapeIndex => "edge.begin_shape_index",
    EdgeEndShapeIndex => "edge.end_shape_index",
    EdgeTraversability => "edge.traversability",
    EdgeUse => "edge.use",
    EdgeToll => "edge.toll",
    EdgeUnpaved => "edge.unpaved",
    EdgeTunnel => "edge.tunnel",
    EdgeBridge => "edge.bridge",
    EdgeRoundabout => "edge.roundabout",
    EdgeInternalIntersection => "edge.internal_intersection",
    EdgeDriveOnRight => "edge.drive_on_right",
    EdgeSurface => "edge.surface",
    EdgeDestinationOnly => "edge.destination_only",
    EdgeSignExitNumber => "edge.sign.exit_number",
    EdgeSignExitBranch => "edge.sign.exit_branch",
    EdgeSignExitToward => "edge.sign.exit_toward",
    EdgeSignExitName => "edge.sign.exit_name",
    EdgeSignGuideBranch => "edge.sign.guide_branch",
    EdgeSignGuideToward => "edge.sign.guide_toward",
    EdgeSignJunctionName => "edge.sign.junction_name",
    EdgeSignGuidanceViewJunction => "edge.sign.guidance_view_junction",
    EdgeTravelMode => "edge.travel_mode",
    EdgeVehicleType => "edge.vehicle_type",
    EdgePedestrianType => "edge.pedestrian_type",
    EdgeBicycleType => "edge.bicycle_type",
    EdgeTransitType => "edge.transit_type",
    EdgeId => "edge.id",
    EdgeWayId => "edge.way_id",
    EdgeWeightedGrade => "edge.weighted_grade",
    EdgeMaxUpwardGrade => "edge.max_upward_grade",
    EdgeMaxDownwardGrade => "edge.max_downward_grade",
    EdgeMeanElevation => "edge.mean_elevation",
    EdgeLaneCount => "edge.lane_count",
    EdgeTurnLanes => "edge.turn_lanes",
    EdgeLaneConnectivity => "edge.lane_connectivity",
    EdgeRestrictions => "edge.restrictions",
    EdgeCycleLane => "edge.cycle_lane",
    EdgeBicycleNetwork => "edge.bicycle_network",
    EdgeSidewalk => "edge.sidewalk",
    EdgeDensity => "edge.density",
    EdgeSpeedLimit => "edge.speed_limit",
    EdgeDefaultSpeed => "edge.default_speed",
    EdgeTruckSpeed => "edge.truck_speed",
    EdgeTruckRoute => "edge.truck_route",
    EdgeTransitRouteInfoBlockId => "edge.transit_route_info.block_id",
    EdgeTransitRouteInfoTripId => "edge.transit_route_info.trip_id",
    EdgeTransitRouteInfoHeadsign => "edge.transit_route_info.headsign",
    EdgeTransitRouteInfoOnestopId => "edge.transit_route_info.onestop_id",
    EdgeTransitRouteInfoShortName => "edge.transit_route_info.short_name",
    EdgeTransitRouteInfoLongName => "edge.transit_route_info.long_name",
    EdgeTransitRouteInfoColor => "edge.transit_route_info.color",
    EdgeTransitRouteInfoTextColor => "edge.transit_route_info.text_color",
    EdgeTransitRouteInfoDescription => "edge.transit_route_info.description",
    EdgeTransitRouteInfoOperatorOnestopId => "edge.transit_route_info.operator_onestop_id",
    EdgeTransitRouteInfoOperatorName => "edge.transit_route_info.operator_name",
    EdgeTransitRouteInfoOperatorUrl => "edge.transit_route_info.operator_url",

    NodeIntersectingEdgeBeginHeading => "node.intersecting_edge.begin_heading",
    NodeIntersectingEdgeFromEdgeNameConsistency => "node.intersecting_edge.from_edge_name_consistency",
    NodeIntersectingEdgeToEdgeNameConsistency => "node.intersecting_edge.to_edge_name_consistency",
    NodeIntersectingEdgeDriveability => "node.intersecting_edge.driveability",
    NodeIntersectingEdgeCyclability => "node.intersecting_edge.cyclability",
    NodeIntersectingEdgeWalkability => "node.intersecting_edge.walkability",
    NodeIntersectingEdgeUse => "node.intersecting_edge.use",
    NodeIntersectingEdgeRoadClass => "node.intersecting_edge.road_class",
    NodeElapsedTime => "node.elapsed_time",
    NodeTransitionTime => "node.transition_time",
    NodeAdminIndex => "node.admin_index",
    NodeType => "node.type",
    NodeFork => "node.fork",
    NodeTimeZone => "node.time_zone",
    NodeTransitPlatformInfoType => "node.transit_platform_info.type",
    NodeTransitPlatformInfoOnestopId => "node.transit_platform_info.onestop_id",
    NodeTransitPlatformInfoName => "node.transit_platform_info.name",
    NodeTransitPlatformInfoStationOnestopId => "node.transit_platform_info.station_onestop_id",
    NodeTransitPlatformInfoStationName => "node.transit_platform_info.station_name",
    NodeTransitPlatformInfoLatLon => "node.transit_platform_info.lat_lon",
    NodeTransitPlatformInfoArrivalDateTime => "node.transit_platform_info.arrival_date_time",
    NodeTransitPlatformInfoDepartureDateTime => "node.transit_platform_info.departure_date_time",
    NodeTransitPlatformInfoAssumedSchedule => "node.transit_platform_info.assumed_schedule",
    NodeTransitStationInfoOnestopId => "node.transit_station_info.onestop_id",
    NodeTransitStationInfoName => "node.transit_station_info.name",
    NodeTransitStationInfoLatLon => "node.transit_station_info.lat_lon",
    NodeTransitEgressInfoOnestopId => "node.transit_egress_info.onestop_id",
    NodeTransitEgressInfoName => "node.transit_egress_info.name",
    NodeTransitEgressInfoLatLon => "node.transit_egress_info.lat_lon",
    NodeBssInfo => "node.bss_info",

    AdminCountryCode => "admin.country_code",
    AdminCountryText => "admin.country_text",
    AdminStateCode => "admin.state_code",
    AdminStateText => "admin.state_text",

    ShapeAttributesTime => "shape_attributes.time",
    ShapeAttributesLength => "shape_attributes.length",
    ShapeAttributesSpeed => "shape_attributes.speed",

    Shape => "shape",
    OsmChangeset => "osm_changeset",
}

impl Attribute {
    pub fn category(&self) -> Category {
        let key = self.key();
        [
            Category::Edge,
            Category::Node,
            Category::Admin,
            Category::ShapeAttributes,
        ]
        .into_iter()
        .find(|category| {
            key.strip_prefix(category.prefix())
                .is_some_and(|rest| rest.starts_with('.'))
        })
        .unwrap_or(Category::Leg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterAction {
    Include,
    Exclude,
}

/// Attribute selection of a request. Keys are attribute keys or category
/// prefixes such as `edge` or `shape_attributes`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AttributeFilter {
    pub action: FilterAction,
    pub attributes: Vec<String>,
}

/// Decides which trip leg fields are computed.
#[derive(Debug, Clone)]
pub struct AttributesController {
    enabled: FxHashSet<Attribute>,
}

impl Default for AttributesController {
    fn default() -> Self {
        AttributesController {
            enabled: Attribute::ALL.iter().copied().collect(),
        }
    }
}

impl AttributesController {
    pub fn none() -> Self {
        AttributesController {
            enabled: FxHashSet::default(),
        }
    }

    pub fn from_filter(filter: &AttributeFilter) -> Result<Self, AttributeFilterError> {
        let mut selected = FxHashSet::default();
        for key in &filter.attributes {
            selected.extend(resolve_key(key)?);
        }

        let controller = match filter.action {
            FilterAction::Include => AttributesController { enabled: selected },
            FilterAction::Exclude => AttributesController {
                enabled: Attribute::ALL
                    .iter()
                    .copied()
                    .filter(|attribute| !selected.contains(attribute))
                    .collect(),
            },
        };
        Ok(controller)
    }

    pub fn with(mut self, attribute: Attribute) -> Self {
        self.enabled.insert(attribute);
        self
    }

    pub fn without(mut self, attribute: Attribute) -> Self {
        self.enabled.remove(&attribute);
        self
    }

    pub fn is_enabled(&self, attribute: Attribute) -> bool {
        self.enabled.contains(&attribute)
    }

    /// Whether any attribute of the category is enabled.
    pub fn category_enabled(&self, category: Category) -> bool {
        self.enabled
            .iter()
            .any(|attribute| attribute.category() == category)
    }
}

fn resolve_key(key: &str) -> Result<Vec<Attribute>, AttributeFilterError> {
    if let Ok(attribute) = key.parse::<Attribute>() {
        return Ok(vec![attribute]);
    }

    let prefix = format!("{key}.");
    let matching: Vec<Attribute> = Attribute::ALL
        .iter()
        .copied()
        .filter(|attribute| attribute.key().starts_with(&prefix))
        .collect();

    if matching.is_empty() {
        return Err(AttributeFilterError::UnknownAttribute(key.to_owned()));
    }
    Ok(matching)
}
