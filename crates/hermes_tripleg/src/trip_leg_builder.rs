use geo::Point;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::{
    admin_index::{AdminIndex, AdminInfo},
    attributes_controller::{Attribute, AttributeFilter, AttributesController, Category},
    constants::{
        DEFAULT_HEADING_OFFSET, HIGHWAY_HEADING_OFFSET, MIN_EDGE_LENGTH_KM, SHORT_HEADING_OFFSET,
    },
    cost::Cost,
    costing::{BoxedCost, DynamicCost, ModeCosting, TravelMode},
    datetime::{time_info::TimeInfo, timezone_db::TimezoneDb},
    edge_projector::{EdgeContext, project_edge},
    error::{AttributeFilterError, TripLegError},
    geometry::{bounding_box, heading_along_polyline, heading_at_end_of_polyline, trim_shape},
    graph::{DirectedEdge, GraphId, GraphReader, GraphTile, NodeInfo, RoadClass, SideOfStreet, Use},
    intersection_walker::{PathAtNode, intersecting_edges},
    location::{EdgeTrimming, EdgeTrimmingInfo, Location, PathEdgeCandidate},
    path_info::PathInfo,
    recost::accumulate_recosts,
    shape_attributes::{EdgeSection, ShapeAttributes, cut_shape_attributes, speed_breakpoints},
    transit_resolver::{PlatformVisit, TransitCarry, bss_info, stop_info},
    trip_leg::{TripLeg, TripLegAdmin, TripLegEdge, TripLegNode},
};

/// Request settings of a leg build.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TripLegOptions {
    /// Local `YYYY-MM-DDTHH:MM` at the origin. A date time set on the origin
    /// location takes precedence.
    pub date_time: Option<String>,
    pub filter_attributes: Option<AttributeFilter>,
}

impl TripLegOptions {
    pub fn attributes_controller(&self) -> Result<AttributesController, AttributeFilterError> {
        match &self.filter_attributes {
            Some(filter) => AttributesController::from_filter(filter),
            None => Ok(AttributesController::default()),
        }
    }
}

pub type Interrupt<'a> = &'a dyn Fn() -> Result<(), TripLegError>;

/// Snap fractions and vertices at both ends of the leg.
#[derive(Debug, Clone, Copy)]
struct LegEnds {
    start_pct: f64,
    start_vertex: Point<f64>,
    end_pct: f64,
    end_vertex: Point<f64>,
}

/// State carried from one path edge to the next.
#[derive(Default)]
struct LegState<'a> {
    admins: AdminIndex,
    transit: TransitCarry,
    /// Opposing edge of the previous path edge.
    prev_edge: Option<&'a DirectedEdge>,
    prior_opp_local_index: Option<u32>,
    osm_changeset: Option<u64>,
}

/// Turns a computed path into an annotated [`TripLeg`].
pub struct TripLegBuilder<'a, R: GraphReader + ?Sized> {
    reader: &'a R,
    tz_db: &'a TimezoneDb,
    mode_costing: &'a ModeCosting,
    controller: AttributesController,
    date_time: Option<String>,
    recostings: &'a [BoxedCost],
    interrupt: Option<Interrupt<'a>>,
}

impl<'a, R: GraphReader + ?Sized> TripLegBuilder<'a, R> {
    pub fn new(reader: &'a R, tz_db: &'a TimezoneDb, mode_costing: &'a ModeCosting) -> Self {
        TripLegBuilder {
            reader,
            tz_db,
            mode_costing,
            controller: AttributesController::default(),
            date_time: None,
            recostings: &[],
            interrupt: None,
        }
    }

    pub fn from_options(
        reader: &'a R,
        tz_db: &'a TimezoneDb,
        mode_costing: &'a ModeCosting,
        options: &TripLegOptions,
    ) -> Result<Self, AttributeFilterError> {
        let mut builder = Self::new(reader, tz_db, mode_costing)
            .with_controller(options.attributes_controller()?);
        builder.date_time = options.date_time.clone();
        Ok(builder)
    }

    pub fn with_controller(mut self, controller: AttributesController) -> Self {
        self.controller = controller;
        self
    }

    pub fn with_date_time(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }

    /// Alternate cost models replayed over the finished leg, in request order.
    pub fn with_recostings(mut self, recostings: &'a [BoxedCost]) -> Self {
        self.recostings = recostings;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt<'a>) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    fn enabled(&self, attribute: Attribute) -> bool {
        self.controller.is_enabled(attribute)
    }

    fn costing(&self, mode: TravelMode) -> Result<&'a dyn DynamicCost, TripLegError> {
        match self.mode_costing.get(mode) {
            Some(costing) => Ok(costing),
            None => Err(TripLegError::MissingCosting(mode)),
        }
    }

    fn directed_edge(&self, id: GraphId) -> Result<(&'a GraphTile, &'a DirectedEdge), TripLegError> {
        self.reader
            .directed_edge(id)
            .ok_or(TripLegError::MissingTile(id))
    }

    fn node_info(&self, id: GraphId) -> Result<(&'a GraphTile, &'a NodeInfo), TripLegError> {
        self.reader.node_info(id).ok_or(TripLegError::MissingTile(id))
    }

    fn start_node(&self, edge: &DirectedEdge) -> Result<GraphId, TripLegError> {
        self.reader
            .edge_start_node(edge)
            .ok_or(TripLegError::MissingTile(edge.end_node))
    }

    /// Edge shape in travel direction.
    fn edge_shape(
        &self,
        tile: &GraphTile,
        edge_id: GraphId,
        edge: &DirectedEdge,
    ) -> Result<Vec<Point<f64>>, TripLegError> {
        let info = tile
            .edge_info(edge)
            .ok_or(TripLegError::InvalidGraphId(edge_id, "edge info"))?;
        let mut shape = info.shape.clone();
        if !edge.forward {
            shape.reverse();
        }
        Ok(shape)
    }

    /// Builds the leg over `path`. The locations are narrowed to the path
    /// edge each of them was reached on.
    #[instrument(skip_all, fields(edges = path.len()))]
    pub fn build(
        &self,
        path: &[PathInfo],
        origin: &mut Location,
        throughs: &mut [Location],
        dest: &mut Location,
        edge_trimming: Option<&mut EdgeTrimming>,
    ) -> Result<TripLeg, TripLegError> {
        if let Some(interrupt) = self.interrupt {
            interrupt()?;
        }

        let (Some(first), Some(last)) = (path.first(), path.last()) else {
            return Err(TripLegError::EmptyPath);
        };

        let (_, first_edge) = self.directed_edge(first.edge_id)?;
        let start_node = self.start_node(first_edge)?;
        let (_, first_node) = self.node_info(start_node)?;

        let (locations, ends) = copy_locations(path, origin, throughs, dest)?;
        let mut leg = TripLeg {
            locations,
            shape_attributes: self
                .controller
                .category_enabled(Category::ShapeAttributes)
                .then(ShapeAttributes::default),
            ..Default::default()
        };

        let date_time = origin.date_time.as_deref().or(self.date_time.as_deref());
        let time_info = TimeInfo::make(date_time, first_node.timezone, self.tz_db);

        let mut state = LegState::default();
        let (edge_ids, ends) = if path.len() == 1 {
            self.build_single_edge(first, ends, &time_info, &mut leg, &mut state)?
        } else {
            self.build_path(
                path,
                start_node,
                &ends,
                &time_info,
                edge_trimming,
                &mut leg,
                &mut state,
            )?;
            let (_, last_edge) = self.directed_edge(last.edge_id)?;
            let final_node = self.final_node(&mut state.admins, last_edge.end_node, last.elapsed_cost)?;
            leg.nodes.push(final_node);
            let edge_ids: Vec<GraphId> = path.iter().map(|info| info.edge_id).collect();
            (edge_ids, ends)
        };

        if self.controller.category_enabled(Category::Admin) {
            leg.admins = state
                .admins
                .into_admins()
                .into_iter()
                .map(|admin| self.trip_admin(admin))
                .collect();
        }

        leg.bbox = bounding_box(&leg.shape);
        if !self.enabled(Attribute::Shape) {
            leg.shape.clear();
        }
        if self.enabled(Attribute::OsmChangeset) {
            leg.osm_changeset = state.osm_changeset;
        }

        accumulate_recosts(
            self.reader,
            self.recostings,
            &edge_ids,
            ends.start_pct,
            ends.end_pct,
            &time_info,
            self.tz_db,
            &mut leg.nodes,
        );

        debug!(
            nodes = leg.nodes.len(),
            shape = leg.shape.len(),
            admins = leg.admins.len(),
            "Built trip leg"
        );
        Ok(leg)
    }

    /// A path of one edge, possibly travelled against the edge direction.
    /// Returns the edge actually travelled and the snap fractions along it.
    fn build_single_edge(
        &self,
        info: &PathInfo,
        mut ends: LegEnds,
        time_info: &TimeInfo,
        leg: &mut TripLeg,
        state: &mut LegState<'a>,
    ) -> Result<(Vec<GraphId>, LegEnds), TripLegError> {
        let costing = self.costing(info.mode)?;
        let (mut tile, mut edge) = self.directed_edge(info.edge_id)?;
        let mut edge_id = info.edge_id;

        let mut shape = tile
            .edge_info(edge)
            .ok_or(TripLegError::InvalidGraphId(edge_id, "edge info"))?
            .shape
            .clone();
        if edge.forward != (ends.start_pct < ends.end_pct) {
            shape.reverse();
        }

        if ends.start_pct > ends.end_pct {
            ends.start_pct = 1.0 - ends.start_pct;
            ends.end_pct = 1.0 - ends.end_pct;
            let (opposing_id, opposing_tile, opposing) = self
                .reader
                .opposing_edge(edge)
                .ok_or(TripLegError::MissingTile(edge.end_node))?;
            edge_id = opposing_id;
            tile = opposing_tile;
            edge = opposing;
            if let Some(dest) = leg.locations.last_mut() {
                dest.side_of_street = dest.side_of_street.map(|side| side.flipped());
            }
        }

        let length = edge.length as f64;
        trim_shape(
            &mut shape,
            ends.start_pct * length,
            ends.start_vertex,
            ends.end_pct * length,
            ends.end_vertex,
        );

        let start_node_id = self.start_node(edge)?;
        let (start_tile, start_node) = self.node_info(start_node_id)?;
        let node_time = time_info.forward(0.0, start_node.timezone, self.tz_db);
        state.osm_changeset = Some(tile.header.dataset_id);

        let mut trip_edge = project_edge(
            &self.controller,
            &EdgeContext {
                edge_id,
                edge,
                tile,
                start_node_id,
                start_node,
                start_tile,
                mode: info.mode,
                costing,
                trip_id: info.trip_id,
                block_id: 0,
                restriction_index: info.restriction_index,
                second_of_week: node_time.second_of_week(),
                local_time: node_time.local_time(),
                time_zone: self.tz_db.time_zone(start_node.timezone),
            },
        );

        if self.enabled(Attribute::EdgeLength) {
            trip_edge.length = Some(
                (length * 0.001 * (ends.end_pct - ends.start_pct).abs()).max(MIN_EDGE_LENGTH_KM),
            );
        }

        self.cut_shape(
            costing,
            tile,
            edge_id,
            &mut shape,
            leg.shape_attributes.as_mut(),
            0,
            EdgeSection {
                length,
                source_pct: ends.start_pct,
                target_pct: ends.end_pct,
                seconds: info.elapsed_cost.secs - info.transition_cost.secs,
            },
        );
        self.set_shape_fields(&mut trip_edge, edge, &shape, 0);

        let mut first = TripLegNode {
            edge: Some(trip_edge),
            ..Default::default()
        };
        if self.enabled(Attribute::NodeAdminIndex) {
            first.admin_index = Some(admin_index(&mut state.admins, start_tile, start_node));
        }
        if self.enabled(Attribute::NodeElapsedTime) {
            first.cost.elapsed_cost = Some(Cost::zero());
        }
        leg.nodes.push(first);

        let last = self.final_node(&mut state.admins, edge.end_node, info.elapsed_cost)?;
        leg.nodes.push(last);
        leg.shape = shape;

        Ok((vec![edge_id], ends))
    }

    #[allow(clippy::too_many_arguments)]
    fn build_path(
        &self,
        path: &[PathInfo],
        mut start_node_id: GraphId,
        ends: &LegEnds,
        time_info: &TimeInfo,
        mut edge_trimming: Option<&mut EdgeTrimming>,
        leg: &mut TripLeg,
        state: &mut LegState<'a>,
    ) -> Result<(), TripLegError> {
        let last_index = path.len() - 1;
        let mut prev_elapsed = Cost::zero();

        for (index, info) in path.iter().enumerate() {
            let is_first = index == 0;
            let is_last = index == last_index;

            let (tile, edge) = self.directed_edge(info.edge_id)?;
            let costing = self.costing(info.mode)?;
            let (start_tile, start_node) = self.node_info(start_node_id)?;

            if state.osm_changeset.is_none() {
                state.osm_changeset = Some(start_tile.header.dataset_id);
            }

            // Timezones may change along the path, so every node re-projects
            // the elapsed time from the origin.
            let node_time = time_info.forward(prev_elapsed.secs, start_node.timezone, self.tz_db);

            let mut trip_node = self.node_attributes(
                start_tile,
                start_node,
                info.transition_cost,
                prev_elapsed,
                &mut state.admins,
            );

            if start_node.is_transit_platform() {
                trip_node.transit_platform_info = Some(state.transit.platform_info(
                    &self.controller,
                    self.reader,
                    &PlatformVisit {
                        node_tile: start_tile,
                        node: start_node,
                        edge_tile: tile,
                        edge,
                        trip_id: info.trip_id,
                    },
                    &node_time,
                    self.tz_db,
                ));
            }

            let mut trip_edge = project_edge(
                &self.controller,
                &EdgeContext {
                    edge_id: info.edge_id,
                    edge,
                    tile,
                    start_node_id,
                    start_node,
                    start_tile,
                    mode: info.mode,
                    costing,
                    trip_id: info.trip_id,
                    block_id: state.transit.block_id(),
                    restriction_index: info.restriction_index,
                    second_of_week: node_time.second_of_week(),
                    local_time: node_time.local_time(),
                    time_zone: self.tz_db.time_zone(start_node.timezone),
                },
            );

            let mut edge_shape = self.edge_shape(tile, info.edge_id, edge)?;
            let length = edge.length as f64;
            let mut begin_index = if is_first { 0 } else { leg.shape.len() - 1 };
            let mut source_pct = if is_first { ends.start_pct } else { 0.0 };
            let mut target_pct = if is_last { ends.end_pct } else { 1.0 };

            let trimming = edge_trimming
                .as_deref_mut()
                .and_then(|trimming| trimming.get_mut(&index));
            match trimming {
                Some((begin, end)) => {
                    if is_first && !begin.trim {
                        *begin = EdgeTrimmingInfo {
                            trim: true,
                            distance_along: ends.start_pct,
                            vertex: ends.start_vertex,
                        };
                    }
                    if is_last && !end.trim {
                        *end = EdgeTrimmingInfo {
                            trim: true,
                            distance_along: ends.end_pct,
                            vertex: ends.end_vertex,
                        };
                    }

                    // An unset side keeps the edge's own end.
                    let (begin_pct, begin_vertex) = match (begin.trim, edge_shape.first()) {
                        (false, Some(&first)) => (0.0, first),
                        _ => (begin.distance_along, begin.vertex),
                    };
                    let (end_pct, end_vertex) = match (end.trim, edge_shape.last()) {
                        (false, Some(&last)) => (1.0, last),
                        _ => (end.distance_along, end.vertex),
                    };
                    source_pct = begin_pct;
                    target_pct = end_pct;

                    trim_shape(
                        &mut edge_shape,
                        begin_pct * length,
                        begin_vertex,
                        end_pct * length,
                        end_vertex,
                    );
                    let skip = usize::from(!(begin.trim || is_first));
                    leg.shape.extend(edge_shape.iter().skip(skip));

                    // The previous edge's end and this edge's begin are
                    // distinct points of the leg shape.
                    if begin.trim && !is_first {
                        begin_index += 1;
                        if let Some(attributes) = leg.shape_attributes.as_mut() {
                            attributes.push_gap(&self.controller);
                        }
                    }
                }
                None if is_first => {
                    if let Some(&last) = edge_shape.last() {
                        trim_shape(
                            &mut edge_shape,
                            ends.start_pct * length,
                            ends.start_vertex,
                            length,
                            last,
                        );
                    }
                    leg.shape.extend(edge_shape);
                }
                None if is_last => {
                    if let Some(&first) = edge_shape.first() {
                        trim_shape(
                            &mut edge_shape,
                            0.0,
                            first,
                            ends.end_pct * length,
                            ends.end_vertex,
                        );
                    }
                    leg.shape.extend(edge_shape.into_iter().skip(1));
                }
                None => leg.shape.extend(edge_shape.into_iter().skip(1)),
            }

            if self.enabled(Attribute::EdgeLength) {
                trip_edge.length =
                    Some((length * 0.001 * (target_pct - source_pct)).max(MIN_EDGE_LENGTH_KM));
            }

            self.cut_shape(
                costing,
                tile,
                info.edge_id,
                &mut leg.shape,
                leg.shape_attributes.as_mut(),
                begin_index,
                EdgeSection {
                    length,
                    source_pct,
                    target_pct,
                    seconds: info.elapsed_cost.secs
                        - info.transition_cost.secs
                        - prev_elapsed.secs,
                },
            );
            self.set_shape_fields(&mut trip_edge, edge, &leg.shape, begin_index);

            trip_node.intersecting_edges = intersecting_edges(
                &self.controller,
                self.reader,
                start_tile,
                start_node,
                &PathAtNode {
                    path_edge: edge,
                    prev_edge: state.prev_edge,
                    prior_opp_local_index: state.prior_opp_local_index,
                },
            );
            trip_node.edge = Some(trip_edge);
            leg.nodes.push(trip_node);

            start_node_id = edge.end_node;
            if !edge.is_transit_line() {
                match self.reader.opposing_edge(edge) {
                    Some((_, _, opposing)) => state.prev_edge = Some(opposing),
                    None => warn!(edge_id = %info.edge_id, "No opposing edge, keeping the previous one"),
                }
            }
            state.prior_opp_local_index = Some(edge.opp_local_index);
            prev_elapsed = info.elapsed_cost;
        }

        Ok(())
    }

    /// Attributes of a node the path leaves on an edge.
    fn node_attributes(
        &self,
        tile: &GraphTile,
        node: &NodeInfo,
        transition_cost: Cost,
        elapsed_cost: Cost,
        admins: &mut AdminIndex,
    ) -> TripLegNode {
        let mut trip_node = TripLegNode::default();

        if self.enabled(Attribute::NodeType) {
            trip_node.node_type = Some(node.node_type);
        }
        if node.is_fork() && self.enabled(Attribute::NodeFork) {
            trip_node.fork = Some(true);
        }
        if self.enabled(Attribute::NodeElapsedTime) {
            trip_node.cost.elapsed_cost = Some(elapsed_cost);
        }
        if self.enabled(Attribute::NodeAdminIndex) {
            trip_node.admin_index = Some(admin_index(admins, tile, node));
        }
        if self.enabled(Attribute::NodeTimeZone) {
            trip_node.time_zone = self.tz_db.name(node.timezone).map(str::to_owned);
        }
        if self.enabled(Attribute::NodeTransitionTime) {
            trip_node.cost.transition_cost = Some(transition_cost);
        }

        trip_node.bss_info = bss_info(&self.controller, node, self.mode_costing);
        let (station, egress) = stop_info(&self.controller, tile, node);
        trip_node.transit_station_info = station;
        trip_node.transit_egress_info = egress;

        trip_node
    }

    /// Terminal node of the leg, without an outgoing edge.
    fn final_node(
        &self,
        admins: &mut AdminIndex,
        end_node: GraphId,
        elapsed_cost: Cost,
    ) -> Result<TripLegNode, TripLegError> {
        let mut trip_node = TripLegNode::default();
        if self.enabled(Attribute::NodeAdminIndex) {
            let (tile, node) = self.node_info(end_node)?;
            trip_node.admin_index = Some(admin_index(admins, tile, node));
        }
        if self.enabled(Attribute::NodeElapsedTime) {
            trip_node.cost.elapsed_cost = Some(elapsed_cost);
        }
        if self.enabled(Attribute::NodeTransitionTime) {
            trip_node.cost.transition_cost = Some(Cost::zero());
        }
        Ok(trip_node)
    }

    #[allow(clippy::too_many_arguments)]
    fn cut_shape(
        &self,
        costing: &dyn DynamicCost,
        tile: &GraphTile,
        edge_id: GraphId,
        shape: &mut Vec<Point<f64>>,
        attributes: Option<&mut ShapeAttributes>,
        begin_index: usize,
        section: EdgeSection,
    ) {
        let Some(attributes) = attributes else {
            return;
        };

        let traffic = if costing.uses_live_traffic() {
            tile.traffic_speed(edge_id.id())
        } else {
            None
        };
        let breakpoints = speed_breakpoints(&section, traffic);
        cut_shape_attributes(
            &self.controller,
            shape,
            begin_index,
            &section,
            &breakpoints,
            attributes,
        );
    }

    /// Shape indices and headings of an edge whose shape starts at
    /// `begin_index` and runs to the end of the leg shape.
    fn set_shape_fields(
        &self,
        trip_edge: &mut TripLegEdge,
        edge: &DirectedEdge,
        shape: &[Point<f64>],
        begin_index: usize,
    ) {
        if self.enabled(Attribute::EdgeBeginShapeIndex) {
            trip_edge.begin_shape_index = Some(begin_index as u32);
        }
        if self.enabled(Attribute::EdgeEndShapeIndex) {
            trip_edge.end_shape_index = Some(shape.len().saturating_sub(1) as u32);
        }

        let edge_shape = shape.get(begin_index..).unwrap_or_default();
        let offset = heading_offset(edge);
        if self.enabled(Attribute::EdgeBeginHeading) {
            trip_edge.begin_heading = heading_along_polyline(edge_shape, offset).map(round_heading);
        }
        if self.enabled(Attribute::EdgeEndHeading) {
            trip_edge.end_heading =
                heading_at_end_of_polyline(edge_shape, offset).map(round_heading);
        }
    }

    fn trip_admin(&self, admin: AdminInfo) -> TripLegAdmin {
        TripLegAdmin {
            country_code: self
                .enabled(Attribute::AdminCountryCode)
                .then_some(admin.country_code),
            country_text: self
                .enabled(Attribute::AdminCountryText)
                .then_some(admin.country_text),
            state_code: self
                .enabled(Attribute::AdminStateCode)
                .then_some(admin.state_code),
            state_text: self
                .enabled(Attribute::AdminStateText)
                .then_some(admin.state_text),
        }
    }
}

/// Copies the locations into the leg, narrowing each of them to the path
/// edge it was reached on. Through locations are matched in path order.
fn copy_locations(
    path: &[PathInfo],
    origin: &mut Location,
    throughs: &mut [Location],
    dest: &mut Location,
) -> Result<(Vec<Location>, LegEnds), TripLegError> {
    let (Some(first), Some(last)) = (path.first(), path.last()) else {
        return Err(TripLegError::EmptyPath);
    };
    let start = origin
        .candidate(first.edge_id)
        .cloned()
        .ok_or(TripLegError::MissingPathEdge(first.edge_id))?;
    let end = dest
        .candidate(last.edge_id)
        .cloned()
        .ok_or(TripLegError::MissingPathEdge(last.edge_id))?;

    let mut locations = Vec::with_capacity(throughs.len() + 2);
    origin.retain_path_edge(first.edge_id);
    locations.push(projected(origin, &start));

    let mut cursor = 0;
    for through in throughs.iter_mut() {
        let found = path[cursor..]
            .iter()
            .position(|info| through.candidate(info.edge_id).is_some());
        match found {
            Some(offset) => {
                cursor += offset;
                through.retain_path_edge(path[cursor].edge_id);
            }
            None => {
                warn!(lat_lng = ?through.lat_lng, "Through location is not on the path");
                through.path_edges.clear();
            }
        }
        locations.push(through.clone());
    }

    dest.retain_path_edge(last.edge_id);
    locations.push(projected(dest, &end));

    let ends = LegEnds {
        start_pct: start.percent_along,
        start_vertex: start.projected,
        end_pct: end.percent_along,
        end_vertex: end.projected,
    };
    Ok((locations, ends))
}

fn projected(location: &Location, candidate: &PathEdgeCandidate) -> Location {
    let mut location = location.clone();
    location.projected_lat_lng = Some(candidate.projected);
    location.side_of_street =
        (candidate.side_of_street != SideOfStreet::None).then_some(candidate.side_of_street);
    location
}

fn admin_index(admins: &mut AdminIndex, tile: &GraphTile, node: &NodeInfo) -> u32 {
    match tile.admin(node.admin_index) {
        Some(admin) => admins.index_of(admin),
        None => admins.index_of(&AdminInfo::default()),
    }
}

/// Meters along the shape used to measure an edge heading.
fn heading_offset(edge: &DirectedEdge) -> f64 {
    if matches!(edge.edge_use, Use::Ramp | Use::TurnChannel) || edge.edge_use.is_pedestrian_way() {
        SHORT_HEADING_OFFSET
    } else if matches!(edge.classification, RoadClass::Motorway | RoadClass::Trunk) {
        HIGHWAY_HEADING_OFFSET
    } else {
        DEFAULT_HEADING_OFFSET
    }
}

fn round_heading(heading: f64) -> u32 {
    heading.round() as u32 % 360
}
