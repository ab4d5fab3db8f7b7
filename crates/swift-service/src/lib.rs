mod catalog;
mod config;
mod error;
mod resolver;
mod service;

pub use catalog::{QuestionCatalog, QuestionFn, QuestionQuery};
pub use config::ServiceConfig;
pub use error::QueryError;
pub use resolver::{Resolved, resolve_album, resolve_song, translate_filter};
pub use service::SongQueryService;
