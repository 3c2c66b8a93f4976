//! Project serialization root

use serde::{Deserialize, Serialize};

use crate::collection::Group;
use crate::environment::Environment;

/// Everything the user saves: groups and environments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Project {
    /// Request groups in display order
    pub groups: Vec<Group>,
    /// Environments in display order
    pub environments: Vec<Environment>,
}

impl Project {
    /// Creates a project from its parts.
    #[must_use]
    pub const fn new(groups: Vec<Group>, environments: Vec<Environment>) -> Self {
        Self {
            groups,
            environments,
        }
    }

    /// Returns the total number of requests across all groups.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.groups.iter().map(|g| g.requests.len()).sum()
    }
}
