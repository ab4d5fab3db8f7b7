use std::sync::LazyLock;

use regex::Regex;

use crate::error::ParamError;
use crate::filter::{Filter, Predicate};
use crate::operator::{Operator, split_expression};
use crate::params::RawParams;
use crate::query::{QueryDescriptor, QuestionRef};
use crate::sort::Sort;
use crate::value::{FieldTypes, cast};

const SORT: &str = "sort";
const SKIP: &str = "skip";
const LIMIT: &str = "limit";
const QUESTION: &str = "question";

const RESERVED: [&str; 4] = [SORT, SKIP, LIMIT, QUESTION];

static QUESTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^(]+)(\([^)]+\))?$").expect("question pattern is valid")
});

/// Translate request parameters into a [`QueryDescriptor`].
///
/// Supported syntax (operator characters may sit in the key or the value,
/// since `year<=2003` arrives as key `year<` and value `2003`):
/// - `sort=field,-other` (repeatable): ascending, `-` for descending
/// - `skip=n`, `limit=n`: at most once each
/// - `question=name` or `question=name(param)`: at most once
/// - any other key is a filter: `field=v`, `field!=v`, `field>v`, `field>=v`,
///   `field<v`, `field<=v`; `field=a,b` and `field!=a,b` test membership
///
/// Values of fields listed in `field_types` are cast before comparison.
pub fn parse_query(
    params: &RawParams,
    field_types: &FieldTypes,
) -> Result<QueryDescriptor, ParamError> {
    Ok(QueryDescriptor {
        limit: parse_count(params, LIMIT)?,
        skip: parse_count(params, SKIP)?,
        sort: parse_sort(params),
        filter: parse_filter(params, field_types)?,
        question: parse_question(params)?,
    })
}

fn single_value<'a>(params: &'a RawParams, keyword: &str) -> Result<Option<&'a str>, ParamError> {
    match params.get(keyword) {
        None => Ok(None),
        Some([value]) => Ok(Some(value.as_str())),
        Some(_) => Err(ParamError::Duplicated {
            keyword: keyword.to_string(),
        }),
    }
}

/// `skip`/`limit`. Zero is indistinguishable from absent and yields `None`.
fn parse_count(params: &RawParams, keyword: &str) -> Result<Option<u64>, ParamError> {
    let Some(raw) = single_value(params, keyword)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let not_a_number = || ParamError::NotANumber {
        keyword: keyword.to_string(),
    };
    let value = raw.parse::<f64>().map_err(|_| not_a_number())?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(not_a_number());
    }

    let count = value as u64;
    Ok((count != 0).then_some(count))
}

/// Flatten every `sort` value into comma-separated tokens, then fold them in
/// order. A field named again keeps its first position but takes the later
/// direction.
fn parse_sort(params: &RawParams) -> Option<Vec<Sort>> {
    let values = params.get(SORT)?;

    let mut sorts: Vec<Sort> = Vec::new();
    for token in values.iter().flat_map(|v| v.trim().split(',')) {
        let Some(sort) = Sort::from_token(token) else {
            continue;
        };
        match sorts.iter_mut().find(|s| s.field == sort.field) {
            Some(existing) => existing.direction = sort.direction,
            None => sorts.push(sort),
        }
    }

    (!sorts.is_empty()).then_some(sorts)
}

fn parse_filter(params: &RawParams, field_types: &FieldTypes) -> Result<Option<Filter>, ParamError> {
    let mut keys = params
        .iter()
        .filter(|(key, _)| !RESERVED.contains(key))
        .peekable();
    if keys.peek().is_none() {
        return Ok(None);
    }

    let mut filter = Filter::new();
    for (key, values) in keys {
        let [value] = values else {
            return Err(ParamError::MultipleValues {
                field: key.to_string(),
            });
        };

        // The operator is split between key and value on the wire; put the
        // `=` back wherever the query string parser consumed one.
        let full = if value.is_empty() {
            key.to_string()
        } else {
            format!("{key}={value}")
        };
        let Some(expr) = split_expression(&full) else {
            continue;
        };

        let field = expr.field.trim();
        if filter.contains_key(field) {
            return Err(ParamError::MultipleValues {
                field: field.to_string(),
            });
        }

        let field_type = field_types.get(field).copied();
        let parts: Vec<&str> = expr.value.split(',').collect();
        let predicate = match expr.operator {
            Operator::Eq if parts.len() > 1 => {
                Predicate::In(parts.iter().map(|v| cast(v.trim(), field_type)).collect())
            }
            Operator::Ne if parts.len() > 1 => {
                Predicate::NotIn(parts.iter().map(|v| cast(v.trim(), field_type)).collect())
            }
            operator => Predicate::Compare {
                operator,
                value: cast(expr.value.trim(), field_type),
            },
        };
        filter.insert(field.to_string(), predicate);
    }

    Ok(Some(filter))
}

fn parse_question(params: &RawParams) -> Result<Option<QuestionRef>, ParamError> {
    let Some(raw) = single_value(params, QUESTION)? else {
        return Ok(None);
    };
    if raw.is_empty() {
        return Ok(None);
    }

    let captures = QUESTION_PATTERN
        .captures(raw)
        .ok_or_else(|| ParamError::MalformedQuestion {
            value: raw.to_string(),
        })?;
    let name = captures.get(1).map_or("", |m| m.as_str());
    let param = captures.get(2).map(|m| {
        let wrapped = m.as_str();
        wrapped[1..wrapped.len() - 1].to_string()
    });

    Ok(Some(QuestionRef {
        name: name.to_string(),
        param,
    }))
}
