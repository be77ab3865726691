use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked delivery worker. Riders are created once and never edited;
/// entries reference them by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Rider {
    pub id: Uuid,
    pub name: String,
}

impl Rider {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
        }
    }
}
