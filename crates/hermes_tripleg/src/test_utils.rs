#[cfg(test)]
pub mod test_graph {

    use geo::{Coord, Point};

    use crate::{
        admin_index::AdminInfo,
        constants::DEFAULT_HEADING_OFFSET,
        cost::Cost,
        costing::{BoxedCost, DynamicCost, TravelMode},
        datetime::timezone_db::TimezoneDb,
        geometry::{heading_along_polyline, point_along_segment, polyline_length, segment_length},
        graph::{
            Access, DirectedEdge, EdgeInfo, GraphId, GraphReader, GraphTile, InMemoryGraphReader,
            NameInfo, NodeInfo, RoadClass, SideOfStreet, TileHeader, Use,
        },
        location::{Location, PathEdgeCandidate},
        path_info::PathInfo,
    };

    pub const TEST_TILE: GraphId = GraphId::new(2, 4242, 0);

    /// Timezone index of every test node.
    pub const BRUSSELS: u32 = 1;

    pub fn test_tz_db() -> TimezoneDb {
        TimezoneDb::new(["Europe/Brussels", "Europe/London"])
    }

    /// Road segment added in both directions between two nodes.
    #[derive(Debug, Clone)]
    pub struct Road {
        pub name: Option<&'static str>,
        pub classification: RoadClass,
        pub edge_use: Use,
        pub access: Access,
        pub oneway: bool,
        pub speed: u8,
        /// Intermediate shape points, from the first node to the second.
        pub via: Vec<Point<f64>>,
    }

    impl Default for Road {
        fn default() -> Self {
            Road {
                name: None,
                classification: RoadClass::Residential,
                edge_use: Use::Road,
                access: Access::AUTO | Access::PEDESTRIAN | Access::BICYCLE,
                oneway: false,
                speed: 36,
                via: Vec::new(),
            }
        }
    }

    impl Road {
        pub fn named(name: &'static str) -> Self {
            Road {
                name: Some(name),
                ..Default::default()
            }
        }
    }

    struct PendingEdge {
        start: usize,
        end: usize,
        pair: usize,
        name: Option<&'static str>,
        edge: DirectedEdge,
    }

    /// Lays out nodes and roads into one tile. Edges get their final ids at
    /// build time, grouped by start node in insertion order.
    pub struct TestGraphBuilder {
        tile: GraphTile,
        nodes: Vec<NodeInfo>,
        edges: Vec<PendingEdge>,
    }

    impl TestGraphBuilder {
        pub fn new() -> Self {
            Self::with_tile(TEST_TILE)
        }

        pub fn with_tile(tile_id: GraphId) -> Self {
            let mut header = TileHeader::new(tile_id);
            header.base_ll = Point::new(4.35, 50.85);
            header.dataset_id = 1_234;

            let mut tile = GraphTile::new(header);
            tile.admins = vec![AdminInfo::new("BE", "Belgium", "BRU", "Brussels")];

            TestGraphBuilder {
                tile,
                nodes: Vec::new(),
                edges: Vec::new(),
            }
        }

        /// Adds a node at the given offset in degrees from the tile base.
        pub fn add_node(&mut self, x: f64, y: f64) -> usize {
            self.nodes.push(NodeInfo {
                offset: Coord { x, y },
                timezone: BRUSSELS,
                drive_on_right: true,
                ..Default::default()
            });
            self.nodes.len() - 1
        }

        pub fn node_mut(&mut self, node: usize) -> &mut NodeInfo {
            &mut self.nodes[node]
        }

        /// Adds both directions of a road and returns the insertion indices
        /// of the edge from `from` to `to` and of its opposing edge.
        pub fn add_road(&mut self, from: usize, to: usize, road: Road) -> (usize, usize) {
            let mut shape = vec![self.node_point(from)];
            shape.extend(road.via.iter().copied());
            shape.push(self.node_point(to));
            let length = polyline_length(&shape).round() as u32;

            let names = road
                .name
                .map(|name| {
                    vec![NameInfo {
                        text_offset: self.tile.add_text(name),
                        is_route_number: false,
                    }]
                })
                .unwrap_or_default();
            self.tile.edge_infos.push(EdgeInfo {
                way_id: 1_000 + self.tile.edge_infos.len() as u64,
                mean_elevation: 42.0,
                speed_limit: road.speed,
                names,
                shape,
            });
            let edge_info_index = (self.tile.edge_infos.len() - 1) as u32;

            let forward_index = self.edges.len();
            let reverse_access = if road.oneway {
                Access::PEDESTRIAN
            } else {
                road.access
            };
            let edge = |forward: bool| DirectedEdge {
                edge_info_index,
                length,
                forward,
                forward_access: if forward { road.access } else { reverse_access },
                reverse_access: if forward { reverse_access } else { road.access },
                classification: road.classification,
                edge_use: road.edge_use,
                speed: road.speed,
                lane_count: 1,
                weighted_grade: 6,
                ..Default::default()
            };

            self.edges.push(PendingEdge {
                start: from,
                end: to,
                pair: forward_index + 1,
                name: road.name,
                edge: edge(true),
            });
            self.edges.push(PendingEdge {
                start: to,
                end: from,
                pair: forward_index,
                name: road.name,
                edge: edge(false),
            });
            (forward_index, forward_index + 1)
        }

        pub fn edge_mut(&mut self, edge: usize) -> &mut DirectedEdge {
            &mut self.edges[edge].edge
        }

        fn node_point(&self, node: usize) -> Point<f64> {
            self.nodes[node].lat_lng(self.tile.header.base_ll)
        }

        pub fn build_tile(self) -> (GraphTile, Vec<GraphId>) {
            let TestGraphBuilder {
                mut tile,
                mut nodes,
                edges,
            } = self;
            let tile_id = tile.id();

            let mut order: Vec<usize> = (0..edges.len()).collect();
            order.sort_by_key(|&i| edges[i].start);

            let mut final_index = vec![0u32; edges.len()];
            let mut local_index = vec![0u32; edges.len()];
            for (position, &i) in order.iter().enumerate() {
                let node = &mut nodes[edges[i].start];
                if node.edge_count == 0 {
                    node.edge_index = position as u32;
                }
                local_index[i] = node.edge_count;
                node.edge_count += 1;
                final_index[i] = position as u32;
            }

            for &i in &order {
                let pending = &edges[i];
                let mut edge = pending.edge.clone();
                edge.end_node = tile_id.with_id(pending.end as u32);
                edge.local_edge_index = local_index[i];
                edge.opp_index = local_index[pending.pair];
                edge.opp_local_index = local_index[pending.pair];
                edge.name_consistency = edges
                    .iter()
                    .enumerate()
                    .filter(|(j, other)| {
                        other.start == pending.start
                            && other.name.is_some()
                            && other.name == pending.name
                            && *j != i
                    })
                    .fold(0u8, |bits, (j, _)| bits | (1 << local_index[j]));

                let info = &tile.edge_infos[edge.edge_info_index as usize];
                let mut shape = info.shape.clone();
                if !edge.forward {
                    shape.reverse();
                }
                let node = &mut nodes[pending.start];
                node.headings.push(
                    heading_along_polyline(&shape, DEFAULT_HEADING_OFFSET)
                        .map(|h| h.round() as u16 % 360)
                        .unwrap_or_default(),
                );
                node.local_driveability
                    .push(edge.traversability(Access::AUTO, true));

                tile.directed_edges.push(edge);
            }

            tile.nodes = nodes;
            let ids = final_index.iter().map(|&i| tile_id.with_id(i)).collect();
            (tile, ids)
        }

        pub fn build(self) -> TestGraph {
            let (tile, edge_ids) = self.build_tile();
            TestGraph {
                reader: [tile].into_iter().collect(),
                edge_ids,
            }
        }
    }

    pub struct TestGraph {
        pub reader: InMemoryGraphReader,
        edge_ids: Vec<GraphId>,
    }

    impl TestGraph {
        /// Graph id of the edge with the given insertion index.
        pub fn edge(&self, index: usize) -> GraphId {
            self.edge_ids[index]
        }

        pub fn tile(&self) -> &GraphTile {
            self.reader.graph_tile(TEST_TILE).unwrap()
        }

        pub fn tile_mut(&mut self) -> &mut GraphTile {
            self.reader.tile_mut(TEST_TILE).unwrap()
        }

        pub fn directed_edge(&self, index: usize) -> &DirectedEdge {
            self.reader.directed_edge(self.edge(index)).unwrap().1
        }

        /// Path over the given edges with the elapsed cost of `costing`,
        /// counting the partial first and last edges.
        pub fn path(
            &self,
            edges: &[usize],
            mode: TravelMode,
            costing: &dyn DynamicCost,
            start_pct: f64,
            end_pct: f64,
        ) -> Vec<PathInfo> {
            let mut elapsed = Cost::zero();
            edges
                .iter()
                .enumerate()
                .map(|(i, &index)| {
                    let (tile, edge) = self.reader.directed_edge(self.edge(index)).unwrap();
                    let mut fraction = 1.0;
                    if i == 0 {
                        fraction -= start_pct;
                    }
                    if i == edges.len() - 1 {
                        fraction -= 1.0 - end_pct;
                    }
                    elapsed += costing.edge_cost(edge, tile, 0) * fraction;
                    PathInfo::new(self.edge(index), mode, elapsed)
                })
                .collect()
        }

        /// Point `pct` along an edge in its travel direction.
        pub fn point_along(&self, index: usize, pct: f64) -> Point<f64> {
            let (tile, edge) = self.reader.directed_edge(self.edge(index)).unwrap();
            let mut shape = tile.edge_info(edge).unwrap().shape.clone();
            if !edge.forward {
                shape.reverse();
            }

            let target = polyline_length(&shape) * pct;
            let mut along = 0.0;
            for pair in shape.windows(2) {
                let segment = segment_length(pair[0], pair[1]);
                if along + segment >= target && segment > 0.0 {
                    return point_along_segment(pair[0], pair[1], (target - along) / segment);
                }
                along += segment;
            }
            *shape.last().unwrap()
        }

        /// Location snapped `pct` along each of the given edges.
        pub fn location(&self, candidates: &[(usize, f64)]) -> Location {
            let path_edges: Vec<PathEdgeCandidate> = candidates
                .iter()
                .map(|&(index, pct)| PathEdgeCandidate {
                    graph_id: self.edge(index),
                    percent_along: pct,
                    projected: self.point_along(index, pct),
                    side_of_street: SideOfStreet::Right,
                })
                .collect();
            let lat_lng = path_edges
                .first()
                .map(|candidate| candidate.projected)
                .unwrap_or(Point::new(0.0, 0.0));
            Location::new(lat_lng, path_edges)
        }
    }

    /// Cost model travelling every allowed edge at a fixed speed.
    pub struct TestCosting {
        pub access: Access,
        pub speed_kph: f64,
        pub turn_cost: f64,
        pub travel_type: u8,
    }

    impl TestCosting {
        /// 10 m/s by car.
        pub fn auto() -> Self {
            TestCosting {
                access: Access::AUTO,
                speed_kph: 36.0,
                turn_cost: 0.0,
                travel_type: 0,
            }
        }

        /// 1 m/s on foot.
        pub fn pedestrian() -> Self {
            TestCosting {
                access: Access::PEDESTRIAN,
                speed_kph: 3.6,
                turn_cost: 0.0,
                travel_type: 0,
            }
        }

        /// 5 m/s by bicycle.
        pub fn bicycle() -> Self {
            TestCosting {
                access: Access::BICYCLE,
                speed_kph: 18.0,
                turn_cost: 0.0,
                travel_type: 2,
            }
        }

        pub fn with_turn_cost(mut self, turn_cost: f64) -> Self {
            self.turn_cost = turn_cost;
            self
        }

        pub fn boxed(self) -> BoxedCost {
            Box::new(self)
        }
    }

    impl DynamicCost for TestCosting {
        fn access_mode(&self) -> Access {
            self.access
        }

        fn travel_type(&self) -> u8 {
            self.travel_type
        }

        fn edge_cost(&self, edge: &DirectedEdge, _tile: &GraphTile, _second_of_week: u32) -> Cost {
            let secs = edge.length as f64 / (self.speed_kph / 3.6);
            Cost::new(secs, secs)
        }

        fn transition_cost(&self, _edge: &DirectedEdge, _node: &NodeInfo, _pred: &DirectedEdge) -> Cost {
            Cost::new(self.turn_cost, self.turn_cost)
        }

        fn bss_cost(&self) -> Cost {
            Cost::new(120.0, 60.0)
        }
    }

    /// Four nodes along an east-west street with a side street at node 1:
    ///
    /// ```text
    ///          4
    ///          |
    ///  0 ----- 1 ----- 2 ----- 3
    /// ```
    ///
    /// Returns the graph and the insertion indices of the eastbound edges
    /// 0->1, 1->2, 2->3 followed by the side street edge 1->4.
    pub fn main_street() -> (TestGraph, [usize; 4]) {
        let mut builder = TestGraphBuilder::new();
        let nodes: Vec<usize> = [(0.0, 0.0), (0.002, 0.0), (0.004, 0.0), (0.006, 0.0)]
            .into_iter()
            .map(|(x, y)| builder.add_node(x, y))
            .collect();
        let side = builder.add_node(0.002, 0.001);

        let (a, _) = builder.add_road(nodes[0], nodes[1], Road::named("Rue Royale"));
        let (b, _) = builder.add_road(nodes[1], nodes[2], Road::named("Rue Royale"));
        let (c, _) = builder.add_road(nodes[2], nodes[3], Road::named("Rue Royale"));
        let (d, _) = builder.add_road(nodes[1], side, Road::named("Rue de la Loi"));

        (builder.build(), [a, b, c, d])
    }
}
