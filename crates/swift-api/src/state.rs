use std::sync::Arc;

use swift_db::MemoryStore;
use swift_service::SongQueryService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<SongQueryService<MemoryStore>>,
}
