use super::graph_constants::TransitType;

#[derive(Debug, Clone, Default)]
pub struct TransitDeparture {
    pub line_id: u32,
    pub trip_id: u32,
    pub route_index: u32,
    pub block_id: u32,
    pub headsign_offset: u32,
    /// Seconds from midnight.
    pub departure_time: u32,
    /// Scheduled seconds to the next stop.
    pub elapsed_time: u32,
    pub schedule_index: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TransitRoute {
    pub route_type: TransitType,
    pub one_stop_offset: u32,
    pub short_name_offset: u32,
    pub long_name_offset: u32,
    pub desc_offset: u32,
    pub op_by_onestop_id_offset: u32,
    pub op_by_name_offset: u32,
    pub op_by_website_offset: u32,
    pub route_color: u32,
    pub route_text_color: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TransitStop {
    pub one_stop_offset: u32,
    pub name_offset: u32,
}

#[derive(Debug, Clone, Default)]
pub struct TransitSchedule {
    /// Bit per day from the tile creation date.
    pub days: u64,
    pub days_of_week: u8,
    /// Last valid day, counted from the tile creation date.
    pub end_day: u32,
}
