use tracing::{instrument, warn};

use crate::{
    cost::Cost,
    costing::{BoxedCost, DynamicCost},
    datetime::{time_info::TimeInfo, timezone_db::TimezoneDb},
    error::RecostError,
    graph::{DirectedEdge, GraphId, GraphReader},
    trip_leg::{RecostEntry, TripLegNode},
};

/// Cost of one path edge replayed through an alternate cost model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecostLabel {
    /// Elapsed cost at the end of the edge, transition included.
    pub cost: Cost,
    /// Cost of entering the edge from the previous one.
    pub transition_cost: Cost,
}

/// Replays `edge_ids` through `costing`. Only the first and last edges are
/// partial, cut at `src_pct` and `tgt_pct`.
pub fn recost_forward<R: GraphReader + ?Sized>(
    reader: &R,
    costing: &dyn DynamicCost,
    edge_ids: &[GraphId],
    src_pct: f64,
    tgt_pct: f64,
    time_info: &TimeInfo,
    tz_db: &TimezoneDb,
) -> Result<Vec<RecostLabel>, RecostError> {
    let mut labels = Vec::with_capacity(edge_ids.len());
    let mut elapsed = Cost::zero();
    let mut pred: Option<&DirectedEdge> = None;

    for (i, &edge_id) in edge_ids.iter().enumerate() {
        let (tile, edge) = reader
            .directed_edge(edge_id)
            .ok_or(RecostError::MissingTile(edge_id))?;
        if !costing.allowed(edge, tile) {
            return Err(RecostError::NotAllowed(edge_id));
        }

        let start_node = reader
            .edge_start_node(edge)
            .ok_or(RecostError::MissingTile(edge.end_node))?;
        let (_, node) = reader
            .node_info(start_node)
            .ok_or(RecostError::MissingTile(start_node))?;

        let transition_cost = match pred {
            Some(pred) => {
                if !connects(reader, pred.end_node, start_node) {
                    return Err(RecostError::Discontinuous(edge_id));
                }
                costing.transition_cost(edge, node, pred)
            }
            None => Cost::zero(),
        };
        elapsed += transition_cost;

        let second_of_week = time_info
            .forward(elapsed.secs, node.timezone, tz_db)
            .second_of_week();

        let mut fraction = 1.0;
        if i == 0 {
            fraction -= src_pct;
        }
        if i == edge_ids.len() - 1 {
            fraction -= 1.0 - tgt_pct;
        }
        elapsed += costing.edge_cost(edge, tile, second_of_week) * fraction;

        labels.push(RecostLabel {
            cost: elapsed,
            transition_cost,
        });
        pred = Some(edge);
    }

    Ok(labels)
}

/// Whether a path may continue from `end_node` at `start_node`, directly or
/// through a hierarchy transition.
fn connects<R: GraphReader + ?Sized>(reader: &R, end_node: GraphId, start_node: GraphId) -> bool {
    if end_node == start_node {
        return true;
    }
    reader.node_info(end_node).is_some_and(|(tile, node)| {
        tile.node_transitions(node)
            .iter()
            .any(|transition| transition.end_node == start_node)
    })
}

/// Appends one recost entry per alternate cost model to every node. A model
/// that cannot replay the leg gets an empty entry on every node, so entry
/// positions always match the order of `recostings`.
#[instrument(skip_all, fields(recostings = recostings.len(), edges = edge_ids.len()))]
#[allow(clippy::too_many_arguments)]
pub fn accumulate_recosts<R: GraphReader + ?Sized>(
    reader: &R,
    recostings: &[BoxedCost],
    edge_ids: &[GraphId],
    src_pct: f64,
    tgt_pct: f64,
    time_info: &TimeInfo,
    tz_db: &TimezoneDb,
    nodes: &mut [TripLegNode],
) {
    if nodes.is_empty() {
        return;
    }

    for (index, costing) in recostings.iter().enumerate() {
        let labels = recost_forward(
            reader,
            costing.as_ref(),
            edge_ids,
            src_pct,
            tgt_pct,
            time_info,
            tz_db,
        )
        .and_then(|labels| {
            if labels.len() + 1 == nodes.len() {
                Ok(labels)
            } else {
                Err(RecostError::Discontinuous(GraphId::INVALID))
            }
        });

        match labels {
            Ok(labels) => {
                let mut elapsed_cost = Cost::zero();
                for (i, node) in nodes.iter_mut().enumerate() {
                    let transition_cost = labels
                        .get(i)
                        .map_or(Cost::zero(), |label| label.transition_cost);
                    node.recosts.push(Some(RecostEntry {
                        elapsed_cost,
                        transition_cost,
                    }));
                    if let Some(label) = labels.get(i) {
                        elapsed_cost = label.cost;
                    }
                }
            }
            Err(error) => {
                warn!(recosting = index, %error, "Leg could not be recosted");
                for node in nodes.iter_mut() {
                    node.recosts.push(None);
                }
            }
        }
    }
}
