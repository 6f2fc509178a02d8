pub mod admin_index;
pub mod attributes_controller;
mod constants;
pub mod cost;
pub mod costing;
pub mod datetime;
pub mod edge_projector;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod intersection_walker;
pub mod location;
pub mod path_info;
pub mod recost;
pub mod restriction_evaluator;
pub mod shape_attributes;
pub mod transit_resolver;
pub mod trip_leg;
pub mod trip_leg_builder;

#[cfg(test)]
pub(crate) mod test_utils;
