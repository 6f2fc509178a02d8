use bitflags::bitflags;

bitflags! {
    /// Travel modes allowed on an edge or targeted by a restriction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Access: u16 {
        const AUTO = 1;
        const PEDESTRIAN = 1 << 1;
        const BICYCLE = 1 << 2;
        const TRUCK = 1 << 3;
        const EMERGENCY = 1 << 4;
        const TAXI = 1 << 5;
        const BUS = 1 << 6;
        const HOV = 1 << 7;
        const WHEELCHAIR = 1 << 8;
        const MOPED = 1 << 9;
        const MOTORCYCLE = 1 << 10;
    }
}
