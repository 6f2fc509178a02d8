use thiserror::Error;

use crate::{costing::TravelMode, graph::GraphId};

#[derive(Error, Debug)]
pub enum TripLegError {
    #[error("Trip leg has no path edges")]
    EmptyPath,

    #[error("No tile loaded for graph id {0}")]
    MissingTile(GraphId),

    #[error("Graph id {0} does not reference a {1} in its tile")]
    InvalidGraphId(GraphId, &'static str),

    #[error("No cost model configured for travel mode {0:?}")]
    MissingCosting(TravelMode),

    #[error("Location has no candidate for path edge {0}")]
    MissingPathEdge(GraphId),

    #[error("Trip leg assembly interrupted: {0}")]
    Interrupted(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum RecostError {
    #[error("No tile loaded for graph id {0}")]
    MissingTile(GraphId),

    #[error("Edge {0} is not allowed by the cost model")]
    NotAllowed(GraphId),

    #[error("Edge {0} does not start where the previous edge ended")]
    Discontinuous(GraphId),
}

#[derive(Error, Debug, PartialEq)]
pub enum AttributeFilterError {
    #[error("Unknown attribute key: {0}")]
    UnknownAttribute(String),
}
