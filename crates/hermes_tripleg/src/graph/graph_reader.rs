use fxhash::FxHashMap;

use super::{directed_edge::DirectedEdge, graph_id::GraphId, graph_tile::GraphTile, node_info::NodeInfo};

/// Random access to graph tiles. Tiles borrowed from a reader are only held
/// for the duration of one step of the caller.
pub trait GraphReader {
    fn graph_tile(&self, id: GraphId) -> Option<&GraphTile>;

    fn directed_edge(&self, id: GraphId) -> Option<(&GraphTile, &DirectedEdge)> {
        let tile = self.graph_tile(id)?;
        let edge = tile.directed_edge(id)?;
        Some((tile, edge))
    }

    fn node_info(&self, id: GraphId) -> Option<(&GraphTile, &NodeInfo)> {
        let tile = self.graph_tile(id)?;
        let node = tile.node(id)?;
        Some((tile, node))
    }

    /// Id of the edge running opposite to `edge`, found through the tile
    /// that owns its end node.
    fn opposing_edge_id(&self, edge: &DirectedEdge) -> Option<GraphId> {
        let (_, node) = self.node_info(edge.end_node)?;
        Some(edge.end_node.with_id(node.edge_index + edge.opp_index))
    }

    fn opposing_edge(&self, edge: &DirectedEdge) -> Option<(GraphId, &GraphTile, &DirectedEdge)> {
        let id = self.opposing_edge_id(edge)?;
        let (tile, opposing) = self.directed_edge(id)?;
        Some((id, tile, opposing))
    }

    /// Node an edge starts from, which is the end node of its opposing edge.
    fn edge_start_node(&self, edge: &DirectedEdge) -> Option<GraphId> {
        self.opposing_edge(edge)
            .map(|(_, _, opposing)| opposing.end_node)
    }
}

/// Reader over tiles held in memory.
#[derive(Debug, Default)]
pub struct InMemoryGraphReader {
    tiles: FxHashMap<GraphId, GraphTile>,
}

impl InMemoryGraphReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tile(&mut self, tile: GraphTile) {
        self.tiles.insert(tile.id(), tile);
    }

    pub fn tile_mut(&mut self, id: GraphId) -> Option<&mut GraphTile> {
        self.tiles.get_mut(&id.tile_base())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl FromIterator<GraphTile> for InMemoryGraphReader {
    fn from_iter<T: IntoIterator<Item = GraphTile>>(iter: T) -> Self {
        let mut reader = InMemoryGraphReader::new();
        for tile in iter {
            reader.add_tile(tile);
        }
        reader
    }
}

impl GraphReader for InMemoryGraphReader {
    fn graph_tile(&self, id: GraphId) -> Option<&GraphTile> {
        if !id.is_valid() {
            return None;
        }
        self.tiles.get(&id.tile_base())
    }
}
