use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::sort::Sort;

/// A reference to a named catalog question, e.g. `title(love)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRef {
    pub name: String,
    pub param: Option<String>,
}

/// Structured form of one request's query parameters.
///
/// Every part is independently optional. `None` always means "not given";
/// in particular a zero `skip`/`limit` is reported as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryDescriptor {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
    pub sort: Option<Vec<Sort>>,
    pub filter: Option<Filter>,
    pub question: Option<QuestionRef>,
}
