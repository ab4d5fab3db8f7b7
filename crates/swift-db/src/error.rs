use std::fmt;

#[derive(Debug)]
pub enum DbError {
    CollectionNotFound(String),
    InvalidQuery(String),
    Storage(String),
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbError::CollectionNotFound(name) => write!(f, "collection not found: {name}"),
            DbError::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            DbError::Storage(msg) => write!(f, "storage error: {msg}"),
        }
    }
}

impl std::error::Error for DbError {}
