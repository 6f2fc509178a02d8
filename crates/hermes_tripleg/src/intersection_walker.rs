use tracing::warn;

use crate::{
    attributes_controller::{Attribute, AttributesController},
    graph::{Access, DirectedEdge, GraphReader, GraphTile, NodeInfo},
    trip_leg::IntersectingEdge,
};

const INTERSECTING_EDGE_ATTRIBUTES: [Attribute; 8] = [
    Attribute::NodeIntersectingEdgeBeginHeading,
    Attribute::NodeIntersectingEdgeFromEdgeNameConsistency,
    Attribute::NodeIntersectingEdgeToEdgeNameConsistency,
    Attribute::NodeIntersectingEdgeDriveability,
    Attribute::NodeIntersectingEdgeCyclability,
    Attribute::NodeIntersectingEdgeWalkability,
    Attribute::NodeIntersectingEdgeUse,
    Attribute::NodeIntersectingEdgeRoadClass,
];

/// The path around a node: the edge leaving it and the edge that arrived.
pub struct PathAtNode<'a> {
    pub path_edge: &'a DirectedEdge,
    /// Opposing edge of the previous path edge, leaving this node.
    pub prev_edge: Option<&'a DirectedEdge>,
    /// Local index of the previous path edge's opposing edge at this node.
    pub prior_opp_local_index: Option<u32>,
}

impl PathAtNode<'_> {
    fn is_on_path(&self, edge: &DirectedEdge) -> bool {
        edge.is_shortcut
            || Some(edge.local_edge_index) == self.prior_opp_local_index
            || edge.local_edge_index == self.path_edge.local_edge_index
    }
}

/// Edges leaving `node` that the path does not take: first those of the
/// node's own level, then those reached through each level transition.
pub fn intersecting_edges<R: GraphReader + ?Sized>(
    controller: &AttributesController,
    reader: &R,
    tile: &GraphTile,
    node: &NodeInfo,
    path: &PathAtNode<'_>,
) -> Vec<IntersectingEdge> {
    if !INTERSECTING_EDGE_ATTRIBUTES
        .iter()
        .any(|attribute| controller.is_enabled(*attribute))
    {
        return Vec::new();
    }

    let mut intersecting: Vec<IntersectingEdge> = tile
        .node_edges(node)
        .map(|(_, edge)| edge)
        .filter(|edge| !path.is_on_path(edge) && !edge.superseded_by(path.path_edge))
        .map(|edge| describe(controller, path, node, edge))
        .collect();

    for transition in tile.node_transitions(node) {
        let Some((other_tile, other_node)) = reader.node_info(transition.end_node) else {
            warn!(node = %transition.end_node, "Missing tile for node transition");
            continue;
        };

        intersecting.extend(
            other_tile
                .node_edges(other_node)
                .map(|(_, edge)| edge)
                .filter(|edge| !path.is_on_path(edge))
                .map(|edge| describe(controller, path, other_node, edge)),
        );
    }

    intersecting
}

fn describe(
    controller: &AttributesController,
    path: &PathAtNode<'_>,
    node: &NodeInfo,
    edge: &DirectedEdge,
) -> IntersectingEdge {
    let local_index = edge.local_edge_index;
    let enabled = |attribute| controller.is_enabled(attribute);

    IntersectingEdge {
        begin_heading: enabled(Attribute::NodeIntersectingEdgeBeginHeading)
            .then(|| node.heading(local_index).into()),
        walkability: enabled(Attribute::NodeIntersectingEdgeWalkability)
            .then(|| edge.traversability(Access::PEDESTRIAN, true)),
        cyclability: enabled(Attribute::NodeIntersectingEdgeCyclability)
            .then(|| edge.traversability(Access::BICYCLE, true)),
        driveability: enabled(Attribute::NodeIntersectingEdgeDriveability)
            .then(|| node.local_driveability(local_index)),
        prev_name_consistency: enabled(Attribute::NodeIntersectingEdgeFromEdgeNameConsistency)
            .then(|| {
                path.prev_edge
                    .is_some_and(|prev| prev.name_consistency(local_index))
            }),
        curr_name_consistency: enabled(Attribute::NodeIntersectingEdgeToEdgeNameConsistency)
            .then(|| path.path_edge.name_consistency(local_index)),
        edge_use: enabled(Attribute::NodeIntersectingEdgeUse).then_some(edge.edge_use),
        road_class: enabled(Attribute::NodeIntersectingEdgeRoadClass)
            .then_some(edge.classification),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        graph::{GraphId, InMemoryGraphReader, NodeTransition, RoadClass, Traversability},
        test_utils::test_graph::{Road, TEST_TILE, TestGraph, TestGraphBuilder},
    };

    /// Crossing at node 1 of an east-west street (0-1-2) with a northbound
    /// side street to 3 and a southbound continuation of the main name to 4.
    fn crossing() -> (TestGraph, usize, usize, usize, usize) {
        let mut builder = TestGraphBuilder::new();
        let west = builder.add_node(0.0, 0.0);
        let center = builder.add_node(0.002, 0.0);
        let east = builder.add_node(0.004, 0.0);
        let north = builder.add_node(0.002, 0.002);
        let south = builder.add_node(0.002, -0.002);

        let (arrive, _) = builder.add_road(west, center, Road::named("Chaussée de Wavre"));
        let (leave, _) = builder.add_road(center, east, Road::named("Avenue Louise"));
        let (side, _) = builder.add_road(
            center,
            north,
            Road {
                access: Access::PEDESTRIAN,
                classification: RoadClass::ServiceOther,
                ..Road::named("Rue Haute")
            },
        );
        let (same_name, _) = builder.add_road(center, south, Road::named("Chaussée de Wavre"));

        (builder.build(), arrive, leave, side, same_name)
    }

    fn walk(graph: &TestGraph, arrive: usize, leave: usize) -> Vec<IntersectingEdge> {
        let reader = &graph.reader;
        let arrived = graph.directed_edge(arrive);
        let (_, _, prev_edge) = reader.opposing_edge(arrived).unwrap();
        let path_edge = graph.directed_edge(leave);
        let (tile, node) = reader.node_info(arrived.end_node).unwrap();

        let path = PathAtNode {
            path_edge,
            prev_edge: Some(prev_edge),
            prior_opp_local_index: Some(arrived.opp_local_index),
        };
        intersecting_edges(&AttributesController::default(), reader, tile, node, &path)
    }

    #[test]
    fn test_skips_path_edges() {
        let (graph, arrive, leave, _, _) = crossing();
        let edges = walk(&graph, arrive, leave);

        assert_eq!(edges.len(), 2);

        let side = &edges[0];
        assert_eq!(side.begin_heading, Some(0));
        assert_eq!(side.walkability, Some(Traversability::Both));
        assert_eq!(side.cyclability, Some(Traversability::None));
        assert_eq!(side.driveability, Some(Traversability::None));
        assert_eq!(side.road_class, Some(RoadClass::ServiceOther));
        assert_eq!(side.prev_name_consistency, Some(false));
        assert_eq!(side.curr_name_consistency, Some(false));

        let same_name = &edges[1];
        assert_eq!(same_name.begin_heading, Some(180));
        assert_eq!(same_name.driveability, Some(Traversability::Both));
        assert_eq!(same_name.prev_name_consistency, Some(true));
        assert_eq!(same_name.curr_name_consistency, Some(false));
    }

    #[test]
    fn test_skips_shortcuts_and_superseded_edges() {
        let (mut graph, arrive, leave, side, same_name) = crossing();
        let side_id = graph.edge(side).id() as usize;
        let same_name_id = graph.edge(same_name).id() as usize;
        let leave_id = graph.edge(leave).id() as usize;

        let tile = graph.tile_mut();
        tile.directed_edges[side_id].is_shortcut = true;
        tile.directed_edges[same_name_id].superseded = 0b10;
        let edges = walk(&graph, arrive, leave);
        assert_eq!(edges.len(), 1);

        let tile = graph.tile_mut();
        tile.directed_edges[leave_id].is_shortcut = true;
        tile.directed_edges[leave_id].shortcut = 0b10;
        let edges = walk(&graph, arrive, leave);
        assert!(edges.is_empty());
    }

    #[test]
    fn test_follows_node_transitions() {
        let (graph, arrive, leave, _, _) = crossing();
        let arrived_end = graph.directed_edge(arrive).end_node;
        let mut base_tile = graph.tile().clone();

        let other_level = GraphId::new(1, 77, 0);
        let mut builder = TestGraphBuilder::with_tile(other_level);
        let hub = builder.add_node(0.002, 0.0);
        for (x, y) in [(0.0, 0.0), (0.004, 0.0), (0.002, 0.002)] {
            let end = builder.add_node(x, y);
            builder.add_road(
                hub,
                end,
                Road {
                    classification: RoadClass::Primary,
                    ..Default::default()
                },
            );
        }
        let (other_tile, _) = builder.build_tile();

        base_tile.transitions = vec![
            NodeTransition {
                end_node: other_level.with_id(hub as u32),
                up: true,
            },
            NodeTransition {
                end_node: GraphId::new(0, 5, 0),
                up: true,
            },
        ];
        let node = &mut base_tile.nodes[arrived_end.index()];
        node.transition_index = 0;
        node.transition_count = 2;

        let reader: InMemoryGraphReader = [base_tile, other_tile].into_iter().collect();
        let graph_edges: Vec<_> = [arrive, leave]
            .into_iter()
            .map(|index| reader.directed_edge(graph.edge(index)).unwrap().1)
            .collect();
        let (_, _, prev_edge) = reader.opposing_edge(graph_edges[0]).unwrap();
        let (tile, node) = reader.node_info(arrived_end).unwrap();
        assert_eq!(tile.id(), TEST_TILE);

        let path = PathAtNode {
            path_edge: graph_edges[1],
            prev_edge: Some(prev_edge),
            prior_opp_local_index: Some(graph_edges[0].opp_local_index),
        };
        let edges = intersecting_edges(&AttributesController::default(), &reader, tile, node, &path);

        // Two same level edges, then the only upper level edge whose local
        // index is neither the arriving nor the leaving one. The missing
        // tile is skipped.
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[2].road_class, Some(RoadClass::Primary));
        assert_eq!(edges[2].begin_heading, Some(0));
    }

    #[test]
    fn test_nothing_requested() {
        let (graph, arrive, leave, _, _) = crossing();
        let arrived = graph.directed_edge(arrive);
        let (tile, node) = graph.reader.node_info(arrived.end_node).unwrap();
        let path = PathAtNode {
            path_edge: graph.directed_edge(leave),
            prev_edge: None,
            prior_opp_local_index: None,
        };

        let controller = AttributesController::none().with(Attribute::EdgeNames);
        assert!(intersecting_edges(&controller, &graph.reader, tile, node, &path).is_empty());

        let controller = AttributesController::none().with(Attribute::NodeIntersectingEdgeUse);
        let edges = intersecting_edges(&controller, &graph.reader, tile, node, &path);
        // Without an arriving edge only the leaving edge is skipped.
        assert_eq!(edges.len(), 3);
        assert!(edges.iter().all(|edge| edge.road_class.is_none() && edge.edge_use.is_some()));
    }
}
