mod error;
mod filter;
mod operator;
mod params;
mod parse;
mod query;
mod sort;
mod value;

pub use error::ParamError;
pub use filter::{Filter, Predicate};
pub use operator::{FilterExpression, Operator, split_expression};
pub use params::RawParams;
pub use parse::parse_query;
pub use query::{QueryDescriptor, QuestionRef};
pub use sort::{Sort, SortDirection};
pub use value::{FieldType, FieldTypes, cast};
