use jiff::tz::TimeZone;
use tracing::{trace, warn};

use crate::{
    attributes_controller::{Attribute, AttributesController},
    constants::NO_ELEVATION_DATA,
    costing::{BicycleType, DynamicCost, PedestrianType, TravelMode, VehicleType},
    graph::{
        Access, CycleLane, DirectedEdge, EdgeInfo, GraphId, GraphTile, NodeInfo, SignType, Use,
    },
    restriction_evaluator::RestrictionEvaluator,
    transit_resolver,
    trip_leg::{EdgeSign, LaneConnectivityRecord, Sidewalk, SignElement, StreetName, TripLegEdge},
};

/// Everything the projector reads about one path edge.
pub struct EdgeContext<'a> {
    pub edge_id: GraphId,
    pub edge: &'a DirectedEdge,
    pub tile: &'a GraphTile,
    /// Node the edge leaves from and the tile owning it.
    pub start_node_id: GraphId,
    pub start_node: &'a NodeInfo,
    pub start_tile: &'a GraphTile,
    pub mode: TravelMode,
    pub costing: &'a dyn DynamicCost,
    pub trip_id: u32,
    pub block_id: u32,
    pub restriction_index: Option<usize>,
    pub second_of_week: u32,
    pub local_time: Option<i64>,
    pub time_zone: Option<TimeZone>,
}

/// Builds the requested attributes of one path edge. Shape dependent fields
/// (length, headings, shape indices) are left to the caller.
pub fn project_edge(controller: &AttributesController, ctx: &EdgeContext<'_>) -> TripLegEdge {
    let edge = ctx.edge;
    let edge_info = ctx.tile.edge_info(edge);
    let mut trip_edge = TripLegEdge::default();

    if let Some(info) = edge_info {
        trace!(way_id = info.way_id, edge_id = %ctx.edge_id, "Projecting edge");
        if controller.is_enabled(Attribute::EdgeNames) {
            trip_edge.names = street_names(ctx.tile, info);
        }
    }

    let sign = edge_sign(controller, ctx);
    trip_edge.sign = (!sign.is_empty()).then_some(sign);

    if edge.has_turn_lanes && controller.is_enabled(Attribute::EdgeTurnLanes) {
        trip_edge.turn_lanes = ctx
            .tile
            .turn_lanes(ctx.edge_id.id())
            .map(<[u16]>::to_vec)
            .unwrap_or_default();
    }

    if controller.is_enabled(Attribute::EdgeRoadClass) {
        trip_edge.road_class = Some(edge.classification);
    }

    if controller.is_enabled(Attribute::EdgeSpeed) && ctx.mode != TravelMode::PublicTransit {
        let secs = ctx
            .costing
            .edge_cost(edge, ctx.tile, ctx.second_of_week)
            .secs;
        if secs > 0.0 {
            trip_edge.speed = Some(edge.length as f64 / secs * 3.6);
        }
    }

    if controller.is_enabled(Attribute::EdgeTraversability) {
        trip_edge.traversability = Some(edge.traversability(ctx.mode.access_bit(), edge.forward));
    }

    if controller.is_enabled(Attribute::EdgeLaneConnectivity) {
        project_lane_restrictions(ctx, &mut trip_edge);
    }

    if let Some(index) = ctx.restriction_index.filter(|_| edge.has_access_restriction) {
        let restrictions =
            ctx.tile
                .access_restrictions(ctx.edge_id.id(), ctx.costing.access_mode(), false);
        match restrictions.get(index) {
            Some(restriction) => trip_edge.restriction = Some(restriction.access_type),
            None => warn!(
                edge_id = %ctx.edge_id,
                index,
                count = restrictions.len(),
                "Restriction index out of range"
            ),
        }
    }
    trip_edge.has_time_restrictions = Some(ctx.restriction_index.is_some());

    if controller.is_enabled(Attribute::EdgeUse) {
        trip_edge.edge_use = Some(edge.edge_use);
    }

    let flag = |set: bool, attribute: Attribute| {
        (set && controller.is_enabled(attribute)).then_some(true)
    };
    trip_edge.toll = flag(edge.toll, Attribute::EdgeToll);
    trip_edge.unpaved = flag(edge.unpaved, Attribute::EdgeUnpaved);
    trip_edge.tunnel = flag(edge.tunnel, Attribute::EdgeTunnel);
    trip_edge.bridge = flag(edge.bridge, Attribute::EdgeBridge);
    trip_edge.roundabout = flag(edge.roundabout, Attribute::EdgeRoundabout);
    trip_edge.internal_intersection = flag(edge.internal, Attribute::EdgeInternalIntersection);
    trip_edge.destination_only = flag(edge.dest_only, Attribute::EdgeDestinationOnly);
    trip_edge.truck_route = flag(edge.truck_route, Attribute::EdgeTruckRoute);

    if controller.is_enabled(Attribute::EdgeDriveOnRight) {
        trip_edge.drive_on_right = Some(ctx.start_node.drive_on_right);
    }
    if controller.is_enabled(Attribute::EdgeSurface) {
        trip_edge.surface = Some(edge.surface);
    }

    project_travel_mode(controller, ctx, &mut trip_edge);

    if controller.is_enabled(Attribute::EdgeId) {
        trip_edge.id = Some(ctx.edge_id);
    }
    if controller.is_enabled(Attribute::EdgeWayId) {
        trip_edge.way_id = edge_info.map(|info| info.way_id);
    }

    if controller.is_enabled(Attribute::EdgeWeightedGrade) {
        trip_edge.weighted_grade = Some((edge.weighted_grade as f32 - 6.0) / 0.6);
    }
    let has_elevation = ctx.tile.header.has_elevation;
    let elevation = |value: f32| if has_elevation { value } else { NO_ELEVATION_DATA };
    if controller.is_enabled(Attribute::EdgeMaxUpwardGrade) {
        trip_edge.max_upward_grade = Some(elevation(edge.max_up_slope as f32));
    }
    if controller.is_enabled(Attribute::EdgeMaxDownwardGrade) {
        trip_edge.max_downward_grade = Some(elevation(edge.max_down_slope as f32));
    }
    if controller.is_enabled(Attribute::EdgeMeanElevation) {
        trip_edge.mean_elevation = edge_info.map(|info| elevation(info.mean_elevation));
    }

    if controller.is_enabled(Attribute::EdgeLaneCount) {
        trip_edge.lane_count = Some(edge.lane_count.into());
    }
    if edge.cycle_lane != CycleLane::None && controller.is_enabled(Attribute::EdgeCycleLane) {
        trip_edge.cycle_lane = Some(edge.cycle_lane);
    }
    if controller.is_enabled(Attribute::EdgeBicycleNetwork) {
        trip_edge.bicycle_network = Some(edge.bike_network.into());
    }
    if controller.is_enabled(Attribute::EdgeSidewalk) {
        trip_edge.sidewalk = match (edge.sidewalk_left, edge.sidewalk_right) {
            (true, true) => Some(Sidewalk::BothSides),
            (true, false) => Some(Sidewalk::Left),
            (false, true) => Some(Sidewalk::Right),
            (false, false) => None,
        };
    }
    if controller.is_enabled(Attribute::EdgeDensity) {
        trip_edge.density = Some(edge.density.into());
    }
    if controller.is_enabled(Attribute::EdgeSpeedLimit) {
        trip_edge.speed_limit = edge_info.map(|info| info.speed_limit.into());
    }
    if controller.is_enabled(Attribute::EdgeDefaultSpeed) {
        trip_edge.default_speed = Some(edge.speed.into());
    }
    if controller.is_enabled(Attribute::EdgeTruckSpeed) {
        trip_edge.truck_speed = Some(edge.truck_speed.into());
    }

    if let Some((route_info, transit_type)) = transit_resolver::route_info(
        controller,
        ctx.tile,
        edge,
        ctx.trip_id,
        ctx.block_id,
        ctx.second_of_week,
    ) {
        trip_edge.transit_route_info = Some(route_info);
        trip_edge.transit_type = transit_type;
    }

    trip_edge
}

fn street_names(tile: &GraphTile, info: &EdgeInfo) -> Vec<StreetName> {
    info.names
        .iter()
        .filter_map(|name| {
            Some(StreetName {
                value: tile.text(name.text_offset)?.to_owned(),
                is_route_number: name.is_route_number,
            })
        })
        .collect()
}

fn edge_sign(controller: &AttributesController, ctx: &EdgeContext<'_>) -> EdgeSign {
    let mut sign = EdgeSign::default();

    if ctx.edge.has_sign {
        for edge_sign in ctx.tile.edge_signs(ctx.edge_id.id()) {
            let (list, attribute) = match edge_sign.sign_type {
                SignType::ExitNumber => (&mut sign.exit_numbers, Attribute::EdgeSignExitNumber),
                SignType::ExitBranch => {
                    (&mut sign.exit_onto_streets, Attribute::EdgeSignExitBranch)
                }
                SignType::ExitToward => {
                    (&mut sign.exit_toward_locations, Attribute::EdgeSignExitToward)
                }
                SignType::ExitName => (&mut sign.exit_names, Attribute::EdgeSignExitName),
                SignType::GuideBranch => {
                    (&mut sign.guide_onto_streets, Attribute::EdgeSignGuideBranch)
                }
                SignType::GuideToward => {
                    (&mut sign.guide_toward_locations, Attribute::EdgeSignGuideToward)
                }
                SignType::GuidanceViewJunction => (
                    &mut sign.guidance_view_junctions,
                    Attribute::EdgeSignGuidanceViewJunction,
                ),
                SignType::JunctionName | SignType::TollName => continue,
            };
            if controller.is_enabled(attribute) {
                list.push(SignElement {
                    text: edge_sign.text.clone(),
                    is_route_number: edge_sign.is_route_number,
                });
            }
        }
    }

    if ctx.start_node.named_intersection && controller.is_enabled(Attribute::EdgeSignJunctionName)
    {
        sign.junction_names = ctx
            .start_tile
            .node_signs(ctx.start_node_id.id())
            .filter(|node_sign| node_sign.sign_type == SignType::JunctionName)
            .map(|node_sign| SignElement {
                text: node_sign.text.clone(),
                is_route_number: node_sign.is_route_number,
            })
            .collect();
    }

    sign
}

/// Lane connectivity with the informational lane restriction checks of the
/// edge. Checks never alter the path.
fn project_lane_restrictions(ctx: &EdgeContext<'_>, trip_edge: &mut TripLegEdge) {
    let edge = ctx.edge;
    let evaluator = RestrictionEvaluator::new(
        ctx.local_time,
        ctx.time_zone.clone(),
        ctx.costing.access_mode(),
    );

    if edge.has_lane_connectivity {
        let lane_restrictions = if edge.has_access_restriction {
            ctx.tile
                .access_restrictions(ctx.edge_id.id(), Access::all(), true)
        } else {
            Vec::new()
        };

        for connectivity in ctx.tile.lane_connectivity(ctx.edge_id.id()) {
            trace!(
                from_way_id = connectivity.from_way_id,
                from_lanes = %connectivity.from_lanes,
                to_lanes = %connectivity.to_lanes,
                "Lane connectivity"
            );
            trip_edge.lane_connectivity.push(LaneConnectivityRecord {
                from_way_id: connectivity.from_way_id,
                from_lanes: connectivity.from_lanes.clone(),
                to_lanes: connectivity.to_lanes.clone(),
            });

            for restriction in &lane_restrictions {
                trip_edge
                    .lane_restrictions
                    .extend(evaluator.lane_checks(restriction, &connectivity.to_lanes));
            }
        }
    }

    if !edge.end_restriction.is_empty() {
        trip_edge.complex_restrictions = ctx
            .tile
            .complex_restrictions_to(ctx.edge_id, Access::all(), true)
            .map(|restriction| evaluator.complex_check(restriction))
            .collect();
    }
}

fn project_travel_mode(
    controller: &AttributesController,
    ctx: &EdgeContext<'_>,
    trip_edge: &mut TripLegEdge,
) {
    let travel_type = ctx.costing.travel_type();
    let dismounted = ctx.edge.dismount || ctx.edge.edge_use == Use::Steps;

    let travel_mode = match ctx.mode {
        TravelMode::Bicycle if dismounted => {
            if controller.is_enabled(Attribute::EdgePedestrianType) {
                trip_edge.pedestrian_type = Some(PedestrianType::Foot);
            }
            TravelMode::Pedestrian
        }
        TravelMode::Bicycle => {
            if controller.is_enabled(Attribute::EdgeBicycleType) {
                trip_edge.bicycle_type = Some(BicycleType::from(travel_type));
            }
            TravelMode::Bicycle
        }
        TravelMode::Drive => {
            if controller.is_enabled(Attribute::EdgeVehicleType) {
                trip_edge.vehicle_type = Some(VehicleType::from(travel_type));
            }
            TravelMode::Drive
        }
        TravelMode::Pedestrian => {
            if controller.is_enabled(Attribute::EdgePedestrianType) {
                trip_edge.pedestrian_type = Some(PedestrianType::from(travel_type));
            }
            TravelMode::Pedestrian
        }
        TravelMode::PublicTransit => TravelMode::PublicTransit,
    };

    if controller.is_enabled(Attribute::EdgeTravelMode) {
        trip_edge.travel_mode = Some(travel_mode);
    }
}
