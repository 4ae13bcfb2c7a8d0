use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one activation of the catalog page.
///
/// Load results are tagged with the visit that requested them so a view only
/// ever applies the response it asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitId(pub Uuid);

impl VisitId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VisitId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "visit-{}", self.0)
    }
}
