use swift_db::DbError;
use swift_query::ParamError;

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Param(#[from] ParamError),

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("store error: {0}")]
    Store(#[from] DbError),
}

impl QueryError {
    /// Whether the request itself was at fault (as opposed to the store).
    pub fn is_client_error(&self) -> bool {
        match self {
            QueryError::Param(_) | QueryError::UnknownQuestion(_) => true,
            QueryError::Store(_) => false,
        }
    }
}
