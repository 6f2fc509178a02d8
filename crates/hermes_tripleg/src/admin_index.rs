use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Country and state of a graph node. Equal values are the same admin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdminInfo {
    pub country_code: String,
    pub country_text: String,
    pub state_code: String,
    pub state_text: String,
}

impl AdminInfo {
    pub fn new(country_code: &str, country_text: &str, state_code: &str, state_text: &str) -> Self {
        AdminInfo {
            country_code: country_code.to_owned(),
            country_text: country_text.to_owned(),
            state_code: state_code.to_owned(),
            state_text: state_text.to_owned(),
        }
    }
}

/// Deduplicates admins in insertion order.
#[derive(Debug, Default)]
pub struct AdminIndex {
    indices: FxHashMap<AdminInfo, u32>,
    admins: Vec<AdminInfo>,
}

impl AdminIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index_of(&mut self, admin: &AdminInfo) -> u32 {
        if let Some(&index) = self.indices.get(admin) {
            return index;
        }

        let index = self.admins.len() as u32;
        self.indices.insert(admin.clone(), index);
        self.admins.push(admin.clone());
        index
    }

    pub fn len(&self) -> usize {
        self.admins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }

    pub fn admins(&self) -> &[AdminInfo] {
        &self.admins
    }

    pub fn into_admins(self) -> Vec<AdminInfo> {
        self.admins
    }
}
