pub(crate) const SECONDS_PER_DAY: u32 = 86_400;
pub(crate) const SECONDS_PER_WEEK: u32 = 7 * SECONDS_PER_DAY;

/// Second of week used when the request carries no date time: Monday at noon.
pub(crate) const DEFAULT_SECOND_OF_WEEK: u32 = SECONDS_PER_DAY + 12 * 3600;

/// Reported in place of grades and elevation when a tile has no elevation data.
pub const NO_ELEVATION_DATA: f32 = 32768.0;

pub(crate) const MIN_EDGE_LENGTH_KM: f64 = 0.001;

pub(crate) const UNKNOWN_TRAFFIC_SPEED: u8 = u8::MAX;

pub(crate) const DEFAULT_HEADING_OFFSET: f64 = 30.0;
pub(crate) const HIGHWAY_HEADING_OFFSET: f64 = 60.0;
pub(crate) const SHORT_HEADING_OFFSET: f64 = 15.0;
