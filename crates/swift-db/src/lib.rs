mod collation;
mod compare;
mod error;
mod eval;
mod expression;
mod memory;
mod pipeline;
mod store;

pub use bson::{Bson, Document};
pub use collation::Collation;
pub use error::DbError;
pub use expression::Expression;
pub use memory::MemoryStore;
pub use pipeline::{Accumulator, Expr, Group, Stage};
pub use store::{DocumentStore, FindQuery};
