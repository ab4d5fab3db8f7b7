use bson::Document;
use swift_query::Sort;

use crate::collation::Collation;
use crate::error::DbError;
use crate::expression::Expression;
use crate::pipeline::Stage;

/// A find-style query: filter, then sort, then skip/limit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindQuery {
    pub filter: Option<Expression>,
    pub sort: Vec<Sort>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

/// Read access to a document store.
///
/// Implementations must be safe to share between request handlers; every
/// call is independent and read-only.
pub trait DocumentStore: Send + Sync {
    /// Documents of `collection` matching `query`, in sort order (natural
    /// order when no sort is given).
    fn find(
        &self,
        collection: &str,
        query: &FindQuery,
        collation: Collation,
    ) -> Result<Vec<Document>, DbError>;

    /// Run an aggregation pipeline over every document of `collection`.
    fn aggregate(
        &self,
        collection: &str,
        pipeline: &[Stage],
        collation: Collation,
    ) -> Result<Vec<Document>, DbError>;
}
