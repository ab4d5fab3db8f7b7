use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse a single sort token: `-field` sorts descending, anything else ascending.
    ///
    /// Returns `None` for an empty token or a bare `-`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        let sort = match token.strip_prefix('-') {
            Some(field) => Sort::desc(field),
            None => Sort::asc(token),
        };
        (!sort.field.is_empty()).then_some(sort)
    }
}
