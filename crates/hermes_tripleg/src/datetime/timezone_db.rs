use jiff::tz::TimeZone;

/// Timezone names addressed by the index stored on graph nodes. Index 0
/// means the node has no timezone.
#[derive(Debug, Clone, Default)]
pub struct TimezoneDb {
    names: Vec<String>,
}

impl TimezoneDb {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TimezoneDb {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self, index: u32) -> Option<&str> {
        let slot = (index as usize).checked_sub(1)?;
        self.names.get(slot).map(String::as_str)
    }

    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| i as u32 + 1)
    }

    pub fn time_zone(&self, index: u32) -> Option<TimeZone> {
        TimeZone::get(self.name(index)?).ok()
    }
}
