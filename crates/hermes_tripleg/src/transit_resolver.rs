use jiff::civil;

use crate::{
    attributes_controller::{Attribute, AttributesController},
    constants::SECONDS_PER_DAY,
    costing::{ModeCosting, TravelMode},
    datetime::{time_info::TimeInfo, timezone_db::TimezoneDb},
    graph::{DirectedEdge, GraphReader, GraphTile, NodeInfo, NodeType, TransitType, Use},
    trip_leg::{BssInfo, TransitPlatformInfo, TransitPlatformType, TransitRouteInfo, TransitStopInfo},
};

/// Reads a tile string when the attribute is enabled and the offset is set.
pub(crate) fn gated_text(
    controller: &AttributesController,
    attribute: Attribute,
    tile: &GraphTile,
    offset: u32,
) -> Option<String> {
    if !controller.is_enabled(attribute) {
        return None;
    }
    tile.text(offset).map(str::to_owned)
}

/// Route details of a transit edge. Returns `None` unless the edge is a rail
/// or bus line ridden on a trip.
pub fn route_info(
    controller: &AttributesController,
    tile: &GraphTile,
    edge: &DirectedEdge,
    trip_id: u32,
    block_id: u32,
    second_of_week: u32,
) -> Option<(TransitRouteInfo, Option<TransitType>)> {
    if trip_id == 0 || !matches!(edge.edge_use, Use::Rail | Use::Bus) {
        return None;
    }

    let mut info = TransitRouteInfo {
        block_id: controller
            .is_enabled(Attribute::EdgeTransitRouteInfoBlockId)
            .then_some(block_id),
        trip_id: controller
            .is_enabled(Attribute::EdgeTransitRouteInfoTripId)
            .then_some(trip_id),
        ..Default::default()
    };

    let Some(departure) =
        tile.transit_departure(edge.line_id, trip_id, second_of_week % SECONDS_PER_DAY)
    else {
        return Some((info, None));
    };
    info.headsign = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoHeadsign,
        tile,
        departure.headsign_offset,
    );

    let Some(route) = tile.transit_route(departure.route_index) else {
        return Some((info, None));
    };

    info.onestop_id = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoOnestopId,
        tile,
        route.one_stop_offset,
    );
    info.short_name = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoShortName,
        tile,
        route.short_name_offset,
    );
    info.long_name = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoLongName,
        tile,
        route.long_name_offset,
    );
    info.color = controller
        .is_enabled(Attribute::EdgeTransitRouteInfoColor)
        .then_some(route.route_color);
    info.text_color = controller
        .is_enabled(Attribute::EdgeTransitRouteInfoTextColor)
        .then_some(route.route_text_color);
    info.description = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoDescription,
        tile,
        route.desc_offset,
    );
    info.operator_onestop_id = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoOperatorOnestopId,
        tile,
        route.op_by_onestop_id_offset,
    );
    info.operator_name = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoOperatorName,
        tile,
        route.op_by_name_offset,
    );
    info.operator_url = gated_text(
        controller,
        Attribute::EdgeTransitRouteInfoOperatorUrl,
        tile,
        route.op_by_website_offset,
    );

    let transit_type = controller
        .is_enabled(Attribute::EdgeTransitType)
        .then_some(route.route_type);
    Some((info, transit_type))
}

/// A transit platform node together with the edge the path leaves it on.
pub struct PlatformVisit<'a> {
    pub node_tile: &'a GraphTile,
    pub node: &'a NodeInfo,
    pub edge_tile: &'a GraphTile,
    pub edge: &'a DirectedEdge,
    pub trip_id: u32,
}

/// Schedule state carried from one transit platform to the next.
#[derive(Debug, Clone)]
pub struct TransitCarry {
    prev_platform_type: TransitPlatformType,
    arrival_time: Option<String>,
    block_id: u32,
    assumed_schedule: bool,
}

impl Default for TransitCarry {
    fn default() -> Self {
        TransitCarry {
            prev_platform_type: TransitPlatformType::Stop,
            arrival_time: None,
            block_id: 0,
            assumed_schedule: false,
        }
    }
}

impl TransitCarry {
    /// Block of the trip departing from the last visited platform.
    pub fn block_id(&self) -> u32 {
        self.block_id
    }

    /// Resolves the platform info of a transit platform node and advances
    /// the carried arrival time, block id and assumed schedule flag.
    pub fn platform_info<R: GraphReader + ?Sized>(
        &mut self,
        controller: &AttributesController,
        reader: &R,
        visit: &PlatformVisit<'_>,
        time_info: &TimeInfo,
        tz_db: &TimezoneDb,
    ) -> TransitPlatformInfo {
        let mut info = TransitPlatformInfo::default();

        let platform_type = match visit.edge.edge_use {
            Use::Rail => TransitPlatformType::Station,
            Use::PlatformConnection => self.prev_platform_type,
            _ => TransitPlatformType::Stop,
        };
        self.prev_platform_type = platform_type;
        info.platform_type = controller
            .is_enabled(Attribute::NodeTransitPlatformInfoType)
            .then_some(platform_type);

        if let Some(stop) = visit.node_tile.transit_stop(visit.node.stop_index) {
            info.onestop_id = gated_text(
                controller,
                Attribute::NodeTransitPlatformInfoOnestopId,
                visit.node_tile,
                stop.one_stop_offset,
            );
            info.name = gated_text(
                controller,
                Attribute::NodeTransitPlatformInfoName,
                visit.node_tile,
                stop.name_offset,
            );

            // A platform links to exactly one station.
            let station = visit
                .node_tile
                .node_edges(visit.node)
                .find(|(_, edge)| edge.edge_use == Use::PlatformConnection)
                .and_then(|(_, edge)| reader.node_info(edge.end_node))
                .and_then(|(tile, node)| Some((tile, tile.transit_stop(node.stop_index)?)));
            if let Some((station_tile, station)) = station {
                info.station_onestop_id = gated_text(
                    controller,
                    Attribute::NodeTransitPlatformInfoStationOnestopId,
                    station_tile,
                    station.one_stop_offset,
                );
                info.station_name = gated_text(
                    controller,
                    Attribute::NodeTransitPlatformInfoStationName,
                    station_tile,
                    station.name_offset,
                );
            }

            info.lat_lng = controller
                .is_enabled(Attribute::NodeTransitPlatformInfoLatLon)
                .then(|| visit.node_tile.node_lat_lng(visit.node));
        }

        if controller.is_enabled(Attribute::NodeTransitPlatformInfoArrivalDateTime) {
            info.arrival_date_time = self.arrival_time.clone();
        }

        if visit.trip_id == 0 {
            self.arrival_time = None;
            self.block_id = 0;
            if self.assumed_schedule
                && controller.is_enabled(Attribute::NodeTransitPlatformInfoAssumedSchedule)
            {
                info.assumed_schedule = Some(true);
            }
            self.assumed_schedule = false;
            return info;
        }

        let time_of_day = time_info.second_of_week() % SECONDS_PER_DAY;
        let departure =
            visit
                .edge_tile
                .transit_departure(visit.edge.line_id, visit.trip_id, time_of_day);

        self.assumed_schedule = false;
        if let Some(days) = time_info.origin_date().and_then(days_from_pivot) {
            let date_created = i64::from(visit.edge_tile.header.date_created);
            let assumed = date_created > days
                || departure
                    .and_then(|d| visit.edge_tile.transit_schedule(d.schedule_index))
                    .is_some_and(|schedule| days - date_created > i64::from(schedule.end_day));
            if assumed {
                self.assumed_schedule = true;
                if controller.is_enabled(Attribute::NodeTransitPlatformInfoAssumedSchedule) {
                    info.assumed_schedule = Some(true);
                }
            }
        }

        if let Some(departure) = departure {
            let time_zone = tz_db.time_zone(time_info.timezone_index());
            let wall_clock = |seconds: i64| {
                time_zone
                    .as_ref()
                    .and_then(|tz| time_info.format_after_origin(seconds, tz))
                    .map(strip_zone_abbreviation)
            };

            let wait = i64::from(departure.departure_time) - i64::from(time_of_day);
            if controller.is_enabled(Attribute::NodeTransitPlatformInfoDepartureDateTime) {
                info.departure_date_time = wall_clock(wait);
            }
            self.arrival_time = wall_clock(wait + i64::from(departure.elapsed_time));
            self.block_id = departure.block_id;
        }

        info
    }
}

/// Days from 2014-01-01, the epoch of tile creation dates.
fn days_from_pivot(date: civil::Date) -> Option<i64> {
    let span = civil::date(2014, 1, 1).until(date).ok()?;
    Some(i64::from(span.get_days()))
}

fn strip_zone_abbreviation(formatted: String) -> String {
    match formatted.rsplit_once(' ') {
        Some((date_time, _)) => date_time.to_owned(),
        None => formatted,
    }
}

/// Station or egress details of a transit node, `None` for other nodes.
pub fn stop_info(
    controller: &AttributesController,
    tile: &GraphTile,
    node: &NodeInfo,
) -> (Option<TransitStopInfo>, Option<TransitStopInfo>) {
    let attributes = match node.node_type {
        NodeType::TransitStation => [
            Attribute::NodeTransitStationInfoOnestopId,
            Attribute::NodeTransitStationInfoName,
            Attribute::NodeTransitStationInfoLatLon,
        ],
        NodeType::TransitEgress => [
            Attribute::NodeTransitEgressInfoOnestopId,
            Attribute::NodeTransitEgressInfoName,
            Attribute::NodeTransitEgressInfoLatLon,
        ],
        _ => return (None, None),
    };
    let [onestop_id, name, lat_lon] = attributes;

    let info = tile.transit_stop(node.stop_index).map(|stop| TransitStopInfo {
        onestop_id: gated_text(controller, onestop_id, tile, stop.one_stop_offset),
        name: gated_text(controller, name, tile, stop.name_offset),
        lat_lng: controller
            .is_enabled(lat_lon)
            .then(|| tile.node_lat_lng(node)),
    });

    match node.node_type {
        NodeType::TransitStation => (info, None),
        _ => (None, info),
    }
}

/// Rent and return costs at a bike share station. Needs both the pedestrian
/// and the bicycle model.
pub fn bss_info(
    controller: &AttributesController,
    node: &NodeInfo,
    mode_costing: &ModeCosting,
) -> Option<BssInfo> {
    if node.node_type != NodeType::BikeShare || !controller.is_enabled(Attribute::NodeBssInfo) {
        return None;
    }

    let pedestrian = mode_costing.get(TravelMode::Pedestrian)?;
    let bicycle = mode_costing.get(TravelMode::Bicycle)?;
    Some(BssInfo {
        rent_cost: pedestrian.bss_cost(),
        return_cost: bicycle.bss_cost(),
    })
}
