use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    Residential,
    #[default]
    ServiceOther,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Use {
    #[default]
    Road,
    Ramp,
    TurnChannel,
    Track,
    Driveway,
    Alley,
    ParkingAisle,
    EmergencyAccess,
    DriveThru,
    Culdesac,
    LivingStreet,
    ServiceRoad,
    Cycleway,
    MountainBike,
    Sidewalk,
    Footway,
    Steps,
    Path,
    Pedestrian,
    Bridleway,
    PedestrianCrossing,
    Elevator,
    Escalator,
    Platform,
    RestArea,
    ServiceArea,
    Other,
    Ferry,
    RailFerry,
    Construction,
    Rail,
    Bus,
    EgressConnection,
    PlatformConnection,
    TransitConnection,
}

impl Use {
    pub fn is_transit_line(&self) -> bool {
        matches!(self, Use::Rail | Use::Bus)
    }

    pub fn is_pedestrian_way(&self) -> bool {
        matches!(
            self,
            Use::Sidewalk
                | Use::Footway
                | Use::Steps
                | Use::Path
                | Use::Pedestrian
                | Use::PedestrianCrossing
                | Use::Elevator
                | Use::Escalator
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    #[default]
    PavedSmooth,
    Paved,
    PavedRough,
    Compacted,
    Dirt,
    Gravel,
    Path,
    Impassable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleLane {
    #[default]
    None,
    Shared,
    Dedicated,
    Separated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    #[default]
    StreetIntersection,
    Gate,
    Bollard,
    TollBooth,
    TransitEgress,
    TransitStation,
    MultiUseTransitPlatform,
    BikeShare,
    Parking,
    MotorwayJunction,
    BorderControl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntersectionType {
    #[default]
    Regular,
    False,
    DeadEnd,
    Fork,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Traversability {
    #[default]
    None,
    Forward,
    Backward,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignType {
    ExitNumber,
    ExitBranch,
    ExitToward,
    ExitName,
    GuideBranch,
    GuideToward,
    JunctionName,
    GuidanceViewJunction,
    TollName,
}

/// Kind of a per-edge access restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Hazmat,
    MaxHeight,
    MaxWidth,
    MaxLength,
    MaxWeight,
    MaxAxleLoad,
    TimedAllowed,
    TimedDenied,
    DestinationAllowed,
    MaxAxles,
    CenterLane,
    LaneTimedAllowed,
    LaneTimedDenied,
    LaneAllowed,
    LaneDenied,
}

impl AccessType {
    pub fn is_lane_restriction(&self) -> bool {
        matches!(
            self,
            AccessType::CenterLane
                | AccessType::LaneTimedAllowed
                | AccessType::LaneTimedDenied
                | AccessType::LaneAllowed
                | AccessType::LaneDenied
        )
    }
}

/// Kind of a complex restriction ending at an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    NoLeftTurn,
    NoRightTurn,
    NoStraightOn,
    NoUTurn,
    OnlyRightTurn,
    OnlyLeftTurn,
    OnlyStraightOn,
    NoEntry,
    NoExit,
    NoTurn,
    ComplexLane,
    LaneRestriction,
}

impl RestrictionType {
    pub fn is_lane_restriction(&self) -> bool {
        matches!(
            self,
            RestrictionType::ComplexLane | RestrictionType::LaneRestriction
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitType {
    Tram,
    Metro,
    #[default]
    Rail,
    Bus,
    Ferry,
    CableCar,
    Gondola,
    Funicular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideOfStreet {
    #[default]
    None,
    Left,
    Right,
}

impl SideOfStreet {
    pub fn flipped(&self) -> Self {
        match self {
            SideOfStreet::Left => SideOfStreet::Right,
            SideOfStreet::Right => SideOfStreet::Left,
            SideOfStreet::None => SideOfStreet::None,
        }
    }
}
