#![allow(dead_code)]

use std::sync::Arc;

use bson::{Document, doc};
use swift_db::MemoryStore;
use swift_query::RawParams;
use swift_service::{QuestionCatalog, ServiceConfig, SongQueryService};

pub const COLLECTION: &str = "taylorsongs";

fn song(
    song: &str,
    artist: &str,
    writer: &str,
    album: &str,
    year: i32,
    months: [i32; 3],
    plays: i32,
) -> Document {
    let [june, july, august] = months;
    doc! {
        "song": song,
        "artist": artist,
        "writer": writer,
        "album": album,
        "year": year,
        "plays-june": june,
        "plays-july": july,
        "plays-august": august,
        "plays": plays,
    }
}

pub fn fixture() -> Vec<Document> {
    vec![
        song("song 1", "artist1", "writer1", "album 1", 2000, [19, 38, 55], 112),
        song("song 2", "artist1", "writer1", "album 1", 2000, [10, 15, 21], 46),
        song("song 3", "artist1", "writer1", "album 1", 2000, [10, 15, 21], 46),
        song("song 4", "artist2", "writer1, writer2", "album 2", 2001, [28, 138, 19], 185),
        song("song 5", "artist3", "writer1, writer3", "album 2", 2001, [100, 100, 105], 305),
        song("song 6", "artist3", "writer1", "album 3", 2002, [30, 35, 20], 85),
        song("song 7", "artist4", "writer1, writer4", "album 4", 2003, [20, 25, 40], 85),
        song("songsong 8", "artist5", "writer1, writer5", "album 5", 2005, [11, 13, 15], 39),
        song("song 9", "artist5", "writer1, writer6", "album 5", 2005, [9, 10, 11], 30),
    ]
}

pub fn service() -> SongQueryService<MemoryStore> {
    let store = MemoryStore::new();
    store.insert_many(COLLECTION, fixture()).unwrap();
    SongQueryService::new(
        Arc::new(store),
        Arc::new(QuestionCatalog::builtin()),
        ServiceConfig::default(),
    )
}

/// Parameters exactly as the HTTP layer delivers them: the operator may sit
/// inside the key, with or without a value after it.
pub fn params(pairs: &[(&str, &str)]) -> RawParams {
    RawParams::from_pairs(pairs.iter().copied())
}

pub fn songs(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.get_str("song").unwrap()).collect()
}
