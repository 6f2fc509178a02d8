use serde::{Deserialize, Serialize};

use crate::{
    cost::Cost,
    graph::{Access, DirectedEdge, GraphTile, NodeInfo},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Pedestrian = 0,
    Bicycle = 1,
    Drive = 2,
    PublicTransit = 3,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Pedestrian,
        TravelMode::Bicycle,
        TravelMode::Drive,
        TravelMode::PublicTransit,
    ];

    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Access bit tested for traversability. Transit shares the pedestrian bit.
    pub fn access_bit(&self) -> Access {
        match self {
            TravelMode::Bicycle => Access::BICYCLE,
            TravelMode::Drive => Access::AUTO,
            TravelMode::Pedestrian | TravelMode::PublicTransit => Access::PEDESTRIAN,
        }
    }
}

/// Cost model of one travel mode.
pub trait DynamicCost {
    /// Access bits this model travels with.
    fn access_mode(&self) -> Access;

    /// Sub type of the travel mode (vehicle, pedestrian or bicycle type).
    fn travel_type(&self) -> u8;

    fn uses_live_traffic(&self) -> bool {
        false
    }

    fn allowed(&self, edge: &DirectedEdge, _tile: &GraphTile) -> bool {
        edge.forward_access.intersects(self.access_mode())
    }

    fn edge_cost(&self, edge: &DirectedEdge, tile: &GraphTile, second_of_week: u32) -> Cost;

    fn transition_cost(&self, _edge: &DirectedEdge, _node: &NodeInfo, _pred: &DirectedEdge) -> Cost {
        Cost::zero()
    }

    /// Cost of renting or returning a shared bike.
    fn bss_cost(&self) -> Cost {
        Cost::zero()
    }
}

pub type BoxedCost = Box<dyn DynamicCost + Send + Sync>;

/// Cost models of the modes a path may use, indexed by travel mode.
#[derive(Default)]
pub struct ModeCosting {
    costings: [Option<BoxedCost>; 4],
}

impl ModeCosting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, mode: TravelMode, costing: BoxedCost) -> Self {
        self.costings[mode.index()] = Some(costing);
        self
    }

    pub fn get(&self, mode: TravelMode) -> Option<&(dyn DynamicCost + Send + Sync)> {
        self.costings[mode.index()].as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleType {
    Car,
    Motorcycle,
    AutoBus,
    TractorTrailer,
    MotorScooter,
}

impl From<u8> for VehicleType {
    fn from(value: u8) -> Self {
        match value {
            1 => VehicleType::Motorcycle,
            2 => VehicleType::AutoBus,
            3 => VehicleType::TractorTrailer,
            4 => VehicleType::MotorScooter,
            _ => VehicleType::Car,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PedestrianType {
    Foot,
    Wheelchair,
    Blind,
}

impl From<u8> for PedestrianType {
    fn from(value: u8) -> Self {
        match value {
            1 => PedestrianType::Wheelchair,
            2 => PedestrianType::Blind,
            _ => PedestrianType::Foot,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BicycleType {
    Road,
    Cross,
    Hybrid,
    Mountain,
}

impl From<u8> for BicycleType {
    fn from(value: u8) -> Self {
        match value {
            1 => BicycleType::Cross,
            2 => BicycleType::Hybrid,
            3 => BicycleType::Mountain,
            _ => BicycleType::Road,
        }
    }
}
