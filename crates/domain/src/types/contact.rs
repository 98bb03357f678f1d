//! Contact lookup type

use serde::{Deserialize, Serialize};

/// A sevDesk contact, reduced to what invoice creation needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    /// Organisation name, or "familyname surename" for persons.
    pub label: String,
}
