use std::sync::Arc;

use bson::Document;
use swift_db::{Collation, DocumentStore};
use swift_query::{RawParams, parse_query};
use tracing::debug;

use crate::catalog::QuestionCatalog;
use crate::config::ServiceConfig;
use crate::error::QueryError;
use crate::resolver::{Resolved, resolve_album, resolve_song};

/// Every query compares strings case-insensitively.
const COLLATION: Collation = Collation::CaseInsensitive;

pub struct SongQueryService<S: DocumentStore> {
    store: Arc<S>,
    catalog: Arc<QuestionCatalog>,
    config: ServiceConfig,
}

impl<S: DocumentStore> SongQueryService<S> {
    pub fn new(store: Arc<S>, catalog: Arc<QuestionCatalog>, config: ServiceConfig) -> Self {
        Self {
            store,
            catalog,
            config,
        }
    }

    /// Song records matching the request, in resolved order.
    pub fn query_song(&self, params: &RawParams) -> Result<Vec<Document>, QueryError> {
        let descriptor = parse_query(params, &self.config.field_types)?;
        let collection = &self.config.collection;

        let records = match resolve_song(&descriptor, &self.catalog)? {
            Resolved::Find(query) => {
                debug!(collection, ?query, "song find");
                self.store.find(collection, &query, COLLATION)?
            }
            Resolved::Aggregate(stages) => {
                debug!(collection, stages = stages.len(), "song pipeline");
                self.store.aggregate(collection, &stages, COLLATION)?
            }
        };

        debug!(collection, count = records.len(), "song query done");
        Ok(records)
    }

    /// One `{album, song-count, <field>}` record per album.
    pub fn query_album(&self, params: &RawParams) -> Result<Vec<Document>, QueryError> {
        let descriptor = parse_query(params, &self.config.field_types)?;
        let collection = &self.config.collection;

        let stages = resolve_album(&descriptor, &self.catalog, &self.config.album_sum_field)?;
        debug!(collection, stages = stages.len(), "album pipeline");

        let records = self.store.aggregate(collection, &stages, COLLATION)?;
        debug!(collection, count = records.len(), "album query done");
        Ok(records)
    }
}
