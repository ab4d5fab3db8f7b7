use bson::Bson;
use swift_db::{Accumulator, Expression, FindQuery, Group, Stage};
use swift_query::{Filter, Operator, ParamError, Predicate, QueryDescriptor, Sort, SortDirection};

use crate::catalog::{QuestionCatalog, QuestionQuery};
use crate::error::QueryError;

/// The only field whose equality value may end in the prefix marker.
const PREFIX_FIELD: &str = "song";
const PREFIX_MARKER: char = '%';

const ALBUM_FIELD: &str = "album";
const SONG_COUNT_FIELD: &str = "song-count";

/// An executable query.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Find(FindQuery),
    Aggregate(Vec<Stage>),
}

/// Turn parsed filter predicates into a store expression.
///
/// `song=abc%` becomes a case-insensitive prefix match on `abc`; every other
/// value is compared literally.
pub fn translate_filter(filter: Option<&Filter>) -> Result<Option<Expression>, ParamError> {
    let Some(filter) = filter else {
        return Ok(None);
    };

    let mut conditions = Vec::with_capacity(filter.len());
    for (field, predicate) in filter {
        let field = field.clone();
        let expr = match predicate {
            Predicate::In(values) => Expression::In(field, values.clone()),
            Predicate::NotIn(values) => Expression::Nin(field, values.clone()),
            Predicate::Compare { operator, value } => match operator {
                Operator::Eq => match prefix_of(&field, value) {
                    Some(prefix) => Expression::IStartsWith(field, prefix.to_string()),
                    None => Expression::Eq(field, value.clone()),
                },
                Operator::Ne => Expression::Ne(field, value.clone()),
                Operator::Gt => Expression::Gt(field, value.clone()),
                Operator::Gte => Expression::Gte(field, value.clone()),
                Operator::Lt => Expression::Lt(field, value.clone()),
                Operator::Lte => Expression::Lte(field, value.clone()),
                Operator::Other(_) => {
                    return Err(ParamError::UnsupportedOperator {
                        field,
                        operator: operator.as_token().to_string(),
                    });
                }
            },
        };
        conditions.push(expr);
    }

    Ok(Expression::all(conditions))
}

fn prefix_of<'a>(field: &str, value: &'a Bson) -> Option<&'a str> {
    if field != PREFIX_FIELD {
        return None;
    }
    match value {
        Bson::String(s) => s.strip_suffix(PREFIX_MARKER),
        _ => None,
    }
}

/// Resolve a song request.
///
/// A question replaces the request's own filter and sort; the request's
/// skip/limit apply either way.
pub fn resolve_song(
    descriptor: &QueryDescriptor,
    catalog: &QuestionCatalog,
) -> Result<Resolved, QueryError> {
    let Some(question) = &descriptor.question else {
        return Ok(Resolved::Find(FindQuery {
            filter: translate_filter(descriptor.filter.as_ref())?,
            sort: descriptor.sort.clone().unwrap_or_default(),
            skip: descriptor.skip,
            limit: descriptor.limit,
        }));
    };

    match catalog.lookup(&question.name, question.param.as_deref())? {
        QuestionQuery::Find { filter, sort } => Ok(Resolved::Find(FindQuery {
            filter,
            sort,
            skip: descriptor.skip,
            limit: descriptor.limit,
        })),
        QuestionQuery::Pipeline(mut stages) => {
            push_pagination(&mut stages, descriptor);
            Ok(Resolved::Aggregate(stages))
        }
    }
}

/// Resolve an album roll-up: one record per album with its song count and
/// the sum of one numeric field, ordered by that sum.
///
/// The summed field and direction come from the first sort entry, falling
/// back to `default_sum_field` descending. Sorting by `album` or
/// `song-count` sums `default_sum_field` instead.
pub fn resolve_album(
    descriptor: &QueryDescriptor,
    catalog: &QuestionCatalog,
    default_sum_field: &str,
) -> Result<Vec<Stage>, QueryError> {
    let mut stages = match &descriptor.question {
        Some(question) => match catalog.lookup(&question.name, question.param.as_deref())? {
            QuestionQuery::Find { filter, .. } => filter.map(Stage::Match).into_iter().collect(),
            QuestionQuery::Pipeline(stages) => stages,
        },
        None => translate_filter(descriptor.filter.as_ref())?
            .map(Stage::Match)
            .into_iter()
            .collect(),
    };

    // Sorting by the group key or the count orders by that column and sums
    // the default field; any other field is summed and sorted on.
    let (sum_field, order) = match descriptor.sort.as_deref() {
        Some([first, ..]) if first.field == ALBUM_FIELD => (
            default_sum_field.to_string(),
            vec![first.clone()],
        ),
        Some([first, ..]) if first.field == SONG_COUNT_FIELD => (
            default_sum_field.to_string(),
            vec![first.clone(), Sort::asc(ALBUM_FIELD)],
        ),
        Some([first, ..]) => (
            first.field.clone(),
            vec![first.clone(), Sort::asc(ALBUM_FIELD)],
        ),
        _ => (
            default_sum_field.to_string(),
            vec![
                Sort {
                    field: default_sum_field.to_string(),
                    direction: SortDirection::Desc,
                },
                Sort::asc(ALBUM_FIELD),
            ],
        ),
    };

    stages.push(Stage::Group(Group {
        key: ALBUM_FIELD.into(),
        accumulators: vec![
            (SONG_COUNT_FIELD.into(), Accumulator::Count),
            (sum_field.clone(), Accumulator::Sum(sum_field.clone())),
        ],
    }));
    stages.push(Stage::Sort(order));
    stages.push(Stage::Project(vec![
        ALBUM_FIELD.into(),
        SONG_COUNT_FIELD.into(),
        sum_field,
    ]));
    push_pagination(&mut stages, descriptor);

    Ok(stages)
}

fn push_pagination(stages: &mut Vec<Stage>, descriptor: &QueryDescriptor) {
    if let Some(skip) = descriptor.skip {
        stages.push(Stage::Skip(skip));
    }
    if let Some(limit) = descriptor.limit {
        stages.push(Stage::Limit(limit));
    }
}
