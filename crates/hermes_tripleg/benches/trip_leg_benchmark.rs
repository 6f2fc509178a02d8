use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use geo::{Coord, Point};
use hermes_tripleg::{
    admin_index::AdminInfo,
    attributes_controller::{Attribute, AttributesController},
    cost::Cost,
    costing::{DynamicCost, ModeCosting, TravelMode},
    datetime::timezone_db::TimezoneDb,
    geometry::polyline_length,
    graph::{
        Access, DirectedEdge, EdgeInfo, GraphId, GraphReader, GraphTile, InMemoryGraphReader,
        NameInfo, NodeInfo, SideOfStreet, TileHeader,
    },
    location::{Location, PathEdgeCandidate},
    path_info::PathInfo,
    trip_leg_builder::TripLegBuilder,
};

const NODE_SPACING: f64 = 0.001;

struct BenchCosting;

impl DynamicCost for BenchCosting {
    fn access_mode(&self) -> Access {
        Access::AUTO
    }

    fn travel_type(&self) -> u8 {
        0
    }

    fn edge_cost(&self, edge: &DirectedEdge, _tile: &GraphTile, _second_of_week: u32) -> Cost {
        let secs = edge.length as f64 / 13.9;
        Cost::new(secs, secs)
    }
}

/// Straight two-way street of `node_count` nodes. Returns the reader and the
/// eastbound edge ids in travel order.
fn long_street(node_count: usize) -> (InMemoryGraphReader, Vec<GraphId>) {
    let tile_id = GraphId::new(2, 1, 0);
    let mut header = TileHeader::new(tile_id);
    header.base_ll = Point::new(4.35, 50.85);
    let mut tile = GraphTile::new(header);
    tile.admins = vec![AdminInfo::new("BE", "Belgium", "BRU", "Brussels")];
    let name = tile.add_text("Boulevard Anspach");

    for segment in 0..node_count - 1 {
        let shape = vec![
            Point::new(4.35 + segment as f64 * NODE_SPACING, 50.85),
            Point::new(4.35 + (segment + 1) as f64 * NODE_SPACING, 50.85),
        ];
        tile.edge_infos.push(EdgeInfo {
            way_id: segment as u64,
            names: vec![NameInfo {
                text_offset: name,
                is_route_number: false,
            }],
            shape,
            ..Default::default()
        });
    }

    let edge = |end: usize, segment: usize, forward: bool, local: u32, opp: u32| {
        let info = &tile.edge_infos[segment];
        DirectedEdge {
            end_node: tile_id.with_id(end as u32),
            edge_info_index: segment as u32,
            opp_index: opp,
            local_edge_index: local,
            opp_local_index: opp,
            length: polyline_length(&info.shape).round() as u32,
            forward,
            forward_access: Access::AUTO | Access::PEDESTRIAN,
            reverse_access: Access::AUTO | Access::PEDESTRIAN,
            speed: 50,
            lane_count: 2,
            name_consistency: 0b11,
            ..Default::default()
        }
    };

    let mut nodes = Vec::with_capacity(node_count);
    let mut edges = Vec::with_capacity(2 * node_count);
    let mut eastbound = Vec::with_capacity(node_count);
    for i in 0..node_count {
        let mut node = NodeInfo {
            offset: Coord {
                x: i as f64 * NODE_SPACING,
                y: 0.0,
            },
            edge_index: edges.len() as u32,
            timezone: 1,
            drive_on_right: true,
            ..Default::default()
        };

        if i > 0 {
            let east_local_at_prev = u32::from(i - 1 > 0);
            edges.push(edge(i - 1, i - 1, false, 0, east_local_at_prev));
            node.headings.push(270);
        }
        if i + 1 < node_count {
            let local = u32::from(i > 0);
            eastbound.push(tile_id.with_id(edges.len() as u32));
            edges.push(edge(i + 1, i, true, local, 0));
            node.headings.push(90);
        }
        node.edge_count = edges.len() as u32 - node.edge_index;
        nodes.push(node);
    }
    tile.nodes = nodes;
    tile.directed_edges = edges;

    let mut reader = InMemoryGraphReader::new();
    reader.add_tile(tile);
    (reader, eastbound)
}

fn location(edge_id: GraphId, lat_lng: Point<f64>, pct: f64) -> Location {
    Location::new(
        lat_lng,
        vec![PathEdgeCandidate {
            graph_id: edge_id,
            percent_along: pct,
            projected: lat_lng,
            side_of_street: SideOfStreet::None,
        }],
    )
}

fn trip_leg_benchmark(c: &mut Criterion) {
    let (reader, edge_ids) = long_street(500);
    let tz_db = TimezoneDb::new(["Europe/Brussels"]);
    let mode_costing = ModeCosting::new().with(TravelMode::Drive, Box::new(BenchCosting));

    let mut elapsed = Cost::zero();
    let path: Vec<PathInfo> = edge_ids
        .iter()
        .map(|&id| {
            let (tile, edge) = reader.directed_edge(id).unwrap();
            elapsed += BenchCosting.edge_cost(edge, tile, 0);
            PathInfo::new(id, TravelMode::Drive, elapsed)
        })
        .collect();

    let first = *edge_ids.first().unwrap();
    let last = *edge_ids.last().unwrap();
    let end_x = 4.35 + edge_ids.len() as f64 * NODE_SPACING;
    let origin = location(first, Point::new(4.35, 50.85), 0.0);
    let dest = location(last, Point::new(end_x, 50.85), 1.0);

    let full = TripLegBuilder::new(&reader, &tz_db, &mode_costing).with_date_time("2026-03-02T08:00");
    c.bench_function("trip leg 500 edges (all attributes)", |b| {
        b.iter(|| {
            let mut origin = origin.clone();
            let mut dest = dest.clone();
            full.build(black_box(&path), &mut origin, &mut [], &mut dest, None)
                .unwrap()
        })
    });

    let minimal = TripLegBuilder::new(&reader, &tz_db, &mode_costing).with_controller(
        AttributesController::none()
            .with(Attribute::Shape)
            .with(Attribute::EdgeLength),
    );
    c.bench_function("trip leg 500 edges (shape and length)", |b| {
        b.iter(|| {
            let mut origin = origin.clone();
            let mut dest = dest.clone();
            minimal
                .build(black_box(&path), &mut origin, &mut [], &mut dest, None)
                .unwrap()
        })
    });
}

criterion_group!(benches, trip_leg_benchmark);
criterion_main!(benches);
