use axum::Json;
use axum::extract::{Query, State};
use bson::Document;
use swift_query::RawParams;

use crate::error::ApiError;
use crate::state::AppState;

/// Query pairs are kept in arrival order so repeated keys (`sort=a&sort=b`)
/// reach the parser intact. `year<=2003` decodes as key `year<`, value `2003`.
type Pairs = Query<Vec<(String, String)>>;

pub async fn songs(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> Result<Json<Vec<Document>>, ApiError> {
    let params = RawParams::from_pairs(pairs);
    tokio::task::spawn_blocking(move || {
        let records = state.service.query_song(&params)?;
        Ok(Json(records))
    })
    .await?
}

pub async fn albums(
    State(state): State<AppState>,
    Query(pairs): Pairs,
) -> Result<Json<Vec<Document>>, ApiError> {
    let params = RawParams::from_pairs(pairs);
    tokio::task::spawn_blocking(move || {
        let records = state.service.query_album(&params)?;
        Ok(Json(records))
    })
    .await?
}
