use serde::{Deserialize, Serialize};

/// One identifier → target mapping, exactly as it is stored in the link log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub target: String,
}

impl LinkRecord {
    pub fn new(id: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
        }
    }
}
