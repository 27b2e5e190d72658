use serde::{Deserialize, Serialize};

use crate::domain::ids::Id;

/// Identifier as external systems actually send it: sometimes a JSON
/// string, sometimes a bare number for the same entity.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum IdDto {
    Number(u64),
    Text(String),
}

impl IdDto {
    /// Normalizes into the canonical string-backed id. Past this point the
    /// engine never deals with the string-or-number ambiguity again.
    pub fn normalize<T>(self) -> Id<T> {
        match self {
            IdDto::Number(n) => Id::new(n.to_string()),
            IdDto::Text(s) => Id::new(s),
        }
    }
}
