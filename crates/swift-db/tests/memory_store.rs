use bson::{Bson, Document, doc};
use swift_db::*;
use swift_query::Sort;

const COLLECTION: &str = "songs";

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    store
        .insert_many(
            COLLECTION,
            vec![
                doc! { "song": "Love Story", "album": "Fearless", "year": 2008_i32, "plays": 120_i32 },
                doc! { "song": "You Belong With Me", "album": "fearless", "year": 2008_i32, "plays": 95_i32 },
                doc! { "song": "Style", "album": "1989", "year": 2014_i32, "plays": 150_i32 },
                doc! { "song": "Blank Space", "album": "1989", "year": 2014_i32, "plays": 180_i32 },
                doc! { "song": "all too well", "album": "Red", "year": 2012_i32, "plays": 60_i32 },
            ],
        )
        .unwrap();
    store
}

fn songs(docs: &[Document]) -> Vec<&str> {
    docs.iter().map(|d| d.get_str("song").unwrap()).collect()
}

#[test]
fn find_without_query_returns_natural_order() {
    let store = seeded_store();
    let docs = store
        .find(COLLECTION, &FindQuery::default(), Collation::CaseInsensitive)
        .unwrap();
    assert_eq!(
        songs(&docs),
        vec![
            "Love Story",
            "You Belong With Me",
            "Style",
            "Blank Space",
            "all too well"
        ]
    );
}

#[test]
fn find_filters_sorts_and_paginates() {
    let store = seeded_store();
    let query = FindQuery {
        filter: Some(Expression::Gte("year".into(), Bson::Int64(2008))),
        sort: vec![Sort::desc("plays")],
        skip: Some(1),
        limit: Some(2),
    };
    let docs = store
        .find(COLLECTION, &query, Collation::CaseInsensitive)
        .unwrap();
    assert_eq!(songs(&docs), vec!["Style", "Love Story"]);
}

#[test]
fn find_sorts_strings_case_insensitively() {
    let store = seeded_store();
    let query = FindQuery {
        sort: vec![Sort::asc("song")],
        limit: Some(2),
        ..Default::default()
    };

    let docs = store
        .find(COLLECTION, &query, Collation::CaseInsensitive)
        .unwrap();
    assert_eq!(songs(&docs), vec!["all too well", "Blank Space"]);

    let docs = store.find(COLLECTION, &query, Collation::Simple).unwrap();
    assert_eq!(songs(&docs), vec!["Blank Space", "Love Story"]);
}

#[test]
fn find_prefix_match() {
    let store = seeded_store();
    let query = FindQuery {
        filter: Some(Expression::IStartsWith("song".into(), "ALL".into())),
        ..Default::default()
    };
    let docs = store
        .find(COLLECTION, &query, Collation::CaseInsensitive)
        .unwrap();
    assert_eq!(songs(&docs), vec!["all too well"]);
}

#[test]
fn aggregate_groups_albums_case_insensitively() {
    let store = seeded_store();
    let pipeline = [
        Stage::Group(Group {
            key: "album".into(),
            accumulators: vec![
                ("song-count".into(), Accumulator::Count),
                ("plays".into(), Accumulator::Sum("plays".into())),
            ],
        }),
        Stage::Sort(vec![Sort::desc("plays")]),
    ];
    let docs = store
        .aggregate(COLLECTION, &pipeline, Collation::CaseInsensitive)
        .unwrap();
    assert_eq!(
        docs,
        vec![
            doc! { "album": "1989", "song-count": 2_i64, "plays": 330_i64 },
            doc! { "album": "Fearless", "song-count": 2_i64, "plays": 215_i64 },
            doc! { "album": "Red", "song-count": 1_i64, "plays": 60_i64 },
        ]
    );
}

#[test]
fn unknown_collection_errors() {
    let store = MemoryStore::new();
    let err = store
        .find("missing", &FindQuery::default(), Collation::Simple)
        .unwrap_err();
    assert!(matches!(err, DbError::CollectionNotFound(ref name) if name == "missing"));
    assert_eq!(err.to_string(), "collection not found: missing");
}

#[test]
fn insert_appends_and_counts() {
    let store = seeded_store();
    assert_eq!(store.count(COLLECTION).unwrap(), 5);

    let inserted = store
        .insert_many(COLLECTION, vec![doc! { "song": "Anti-Hero", "year": 2022_i32 }])
        .unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(store.count(COLLECTION).unwrap(), 6);

    store.create_collection("empty").unwrap();
    assert_eq!(store.count("empty").unwrap(), 0);
}

#[test]
fn snapshot_readers_are_unaffected_by_later_writes() {
    let store = std::sync::Arc::new(seeded_store());
    let before = store
        .find(COLLECTION, &FindQuery::default(), Collation::Simple)
        .unwrap();

    let writer = {
        let store = store.clone();
        std::thread::spawn(move || {
            store
                .insert_many(COLLECTION, vec![doc! { "song": "Karma" }])
                .unwrap()
        })
    };
    writer.join().unwrap();

    assert_eq!(before.len(), 5);
    assert_eq!(store.count(COLLECTION).unwrap(), 6);
}
