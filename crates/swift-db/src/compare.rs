use std::cmp::Ordering;

use bson::{Bson, Document};

use crate::collation::Collation;

/// Look up a possibly dotted field path (`a.b.c`) in a document.
pub(crate) fn get_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Bson> {
    let mut parts = path.split('.');
    let mut current = doc.get(parts.next()?)?;
    for part in parts {
        match current {
            Bson::Document(inner) => current = inner.get(part)?,
            _ => return None,
        }
    }
    Some(current)
}

pub(crate) fn as_f64(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(n) => Some(*n as f64),
        Bson::Int64(n) => Some(*n as f64),
        Bson::Double(f) => Some(*f),
        _ => None,
    }
}

pub(crate) fn as_i64(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(n) => Some(*n as i64),
        Bson::Int64(n) => Some(*n),
        _ => None,
    }
}

/// Ordering of two values of the same type bracket, `None` when they cannot
/// be compared (different brackets, or NaN).
pub(crate) fn compare_bracketed(a: &Bson, b: &Bson, collation: Collation) -> Option<Ordering> {
    match (a, b) {
        (Bson::String(a), Bson::String(b)) => Some(collation.compare(a, b)),
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => {
            Some(a.timestamp_millis().cmp(&b.timestamp_millis()))
        }
        _ => match (as_i64(a), as_i64(b)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => as_f64(a)?.partial_cmp(&as_f64(b)?),
        },
    }
}

pub(crate) fn values_equal(stored: &Bson, query: &Bson, collation: Collation) -> bool {
    match (stored, query) {
        (Bson::Null, Bson::Null) => true,
        (Bson::Array(a), Bson::Array(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| values_equal(x, y, collation))
        }
        (Bson::Document(a), Bson::Document(b)) => a == b,
        _ => compare_bracketed(stored, query, collation) == Some(Ordering::Equal),
    }
}

/// Rank of a value's type when ordering mixed types: missing/null first,
/// then numbers, strings, documents, arrays, booleans and dates.
fn bracket_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null | Bson::Undefined => 0,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 1,
        Bson::String(_) | Bson::Symbol(_) => 2,
        Bson::Document(_) => 3,
        Bson::Array(_) => 4,
        Bson::Boolean(_) => 5,
        Bson::DateTime(_) | Bson::Timestamp(_) => 6,
        _ => 7,
    }
}

/// Total ordering used by sort stages. Missing fields sort with nulls.
pub(crate) fn compare_field_values(
    a: Option<&Bson>,
    b: Option<&Bson>,
    collation: Collation,
) -> Ordering {
    let a = a.unwrap_or(&Bson::Null);
    let b = b.unwrap_or(&Bson::Null);
    let (rank_a, rank_b) = (bracket_rank(a), bracket_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    compare_bracketed(a, b, collation).unwrap_or(Ordering::Equal)
}
