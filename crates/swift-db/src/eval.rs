use std::cmp::Ordering;

use bson::{Bson, Document};

use crate::collation::Collation;
use crate::compare::{compare_bracketed, get_path, values_equal};
use crate::expression::Expression;

/// Evaluate whether a document matches the given expression.
pub(crate) fn matches(doc: &Document, expr: &Expression, collation: Collation) -> bool {
    match expr {
        Expression::And(children) => children.iter().all(|c| matches(doc, c, collation)),
        Expression::Eq(field, val) => field_eq(doc, field, val, collation),
        // $ne / $nin also match documents that lack the field
        Expression::Ne(field, val) => !field_eq(doc, field, val, collation),
        Expression::In(field, vals) => vals.iter().any(|v| field_eq(doc, field, v, collation)),
        Expression::Nin(field, vals) => !vals.iter().any(|v| field_eq(doc, field, v, collation)),
        Expression::Gt(field, val)
        | Expression::Gte(field, val)
        | Expression::Lt(field, val)
        | Expression::Lte(field, val) => {
            let predicate: fn(Ordering) -> bool = match expr {
                Expression::Gt(..) => |o| o == Ordering::Greater,
                Expression::Gte(..) => |o| o != Ordering::Less,
                Expression::Lt(..) => |o| o == Ordering::Less,
                Expression::Lte(..) => |o| o != Ordering::Greater,
                _ => unreachable!(),
            };
            any_element(get_path(doc, field), |stored| {
                compare_bracketed(stored, val, collation).is_some_and(predicate)
            })
        }
        Expression::IStartsWith(field, prefix) => {
            let prefix = prefix.to_lowercase();
            any_element(get_path(doc, field), |stored| match stored {
                Bson::String(s) => s.to_lowercase().starts_with(&prefix),
                _ => false,
            })
        }
    }
}

/// `$eq`: null matches missing fields and explicit nulls; arrays match when
/// any element (or the whole array) is equal.
fn field_eq(doc: &Document, field: &str, val: &Bson, collation: Collation) -> bool {
    match (get_path(doc, field), val) {
        (None, Bson::Null) => true,
        (None, _) => false,
        (Some(stored @ Bson::Array(arr)), _) => {
            values_equal(stored, val, collation)
                || arr.iter().any(|elem| values_equal(elem, val, collation))
        }
        (Some(stored), _) => values_equal(stored, val, collation),
    }
}

fn any_element(value: Option<&Bson>, test: impl Fn(&Bson) -> bool) -> bool {
    match value {
        Some(Bson::Array(arr)) => arr.iter().any(test),
        Some(v) => test(v),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    fn song() -> Document {
        doc! {
            "song": "Love Story",
            "album": "Fearless",
            "year": 2008_i32,
            "plays": 120_i64,
            "writers": ["Taylor Swift", "Liz Rose"],
        }
    }

    const CI: Collation = Collation::CaseInsensitive;

    #[test]
    fn eq_uses_collation() {
        let expr = Expression::Eq("album".into(), Bson::String("fearless".into()));
        assert!(matches(&song(), &expr, CI));
        assert!(!matches(&song(), &expr, Collation::Simple));
    }

    #[test]
    fn eq_matches_array_elements() {
        let expr = Expression::Eq("writers".into(), Bson::String("liz rose".into()));
        assert!(matches(&song(), &expr, CI));
    }

    #[test]
    fn eq_null_matches_missing() {
        let expr = Expression::Eq("producer".into(), Bson::Null);
        assert!(matches(&song(), &expr, CI));
    }

    #[test]
    fn ne_and_nin_match_missing_fields() {
        assert!(matches(
            &song(),
            &Expression::Ne("producer".into(), Bson::String("x".into())),
            CI
        ));
        assert!(matches(
            &song(),
            &Expression::Nin("producer".into(), vec![Bson::String("x".into())]),
            CI
        ));
        assert!(!matches(
            &song(),
            &Expression::Nin(
                "album".into(),
                vec![Bson::String("red".into()), Bson::String("FEARLESS".into())]
            ),
            CI
        ));
    }

    #[test]
    fn range_across_integer_widths() {
        let doc = song();
        assert!(matches(&doc, &Expression::Gt("year".into(), Bson::Int64(2002)), CI));
        assert!(matches(&doc, &Expression::Gte("year".into(), Bson::Int64(2008)), CI));
        assert!(!matches(&doc, &Expression::Lt("year".into(), Bson::Int64(2008)), CI));
        assert!(matches(&doc, &Expression::Lte("plays".into(), Bson::Double(120.0)), CI));
    }

    #[test]
    fn range_against_other_type_never_matches() {
        let doc = song();
        assert!(!matches(
            &doc,
            &Expression::Gt("year".into(), Bson::String("2002".into())),
            CI
        ));
        assert!(!matches(
            &doc,
            &Expression::Lt("year".into(), Bson::Double(f64::NAN)),
            CI
        ));
    }

    #[test]
    fn in_matches_any() {
        let expr = Expression::In("year".into(), vec![Bson::Int64(2006), Bson::Int64(2008)]);
        assert!(matches(&song(), &expr, CI));
    }

    #[test]
    fn istarts_with_is_literal_and_case_insensitive() {
        let doc = song();
        assert!(matches(&doc, &Expression::IStartsWith("song".into(), "love".into()), CI));
        assert!(matches(&doc, &Expression::IStartsWith("song".into(), String::new()), CI));
        assert!(!matches(&doc, &Expression::IStartsWith("song".into(), "l.ve".into()), CI));
        assert!(!matches(&doc, &Expression::IStartsWith("year".into(), "2".into()), CI));
    }

    #[test]
    fn and_requires_all() {
        let expr = Expression::And(vec![
            Expression::Eq("album".into(), Bson::String("fearless".into())),
            Expression::Gt("year".into(), Bson::Int64(2010)),
        ]);
        assert!(!matches(&song(), &expr, CI));
    }
}
