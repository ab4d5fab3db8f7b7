use std::cmp::Ordering;

use bson::{Bson, Document};
use swift_query::{Sort, SortDirection};

use crate::collation::Collation;
use crate::compare::{as_f64, as_i64, compare_field_values, get_path, values_equal};
use crate::error::DbError;
use crate::eval;
use crate::expression::Expression;

/// A computed value inside a pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Field(String),
    Literal(Bson),
    Subtract(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn field(name: impl Into<String>) -> Self {
        Expr::Field(name.into())
    }

    pub fn subtract(minuend: Expr, subtrahend: Expr) -> Self {
        Expr::Subtract(Box::new(minuend), Box::new(subtrahend))
    }

    fn evaluate(&self, doc: &Document) -> Result<Bson, DbError> {
        match self {
            Expr::Field(name) => Ok(get_path(doc, name).cloned().unwrap_or(Bson::Null)),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Subtract(a, b) => subtract(&a.evaluate(doc)?, &b.evaluate(doc)?),
        }
    }
}

/// Null or missing operands give null; integers stay integers unless the
/// result overflows.
fn subtract(a: &Bson, b: &Bson) -> Result<Bson, DbError> {
    if matches!(a, Bson::Null) || matches!(b, Bson::Null) {
        return Ok(Bson::Null);
    }
    if let (Some(x), Some(y)) = (as_i64(a), as_i64(b)) {
        if let Some(diff) = x.checked_sub(y) {
            return Ok(Bson::Int64(diff));
        }
    }
    match (as_f64(a), as_f64(b)) {
        (Some(x), Some(y)) => Ok(Bson::Double(x - y)),
        _ => Err(DbError::InvalidQuery(format!(
            "cannot subtract {:?} from {:?}",
            b.element_type(),
            a.element_type()
        ))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Accumulator {
    /// Number of documents in the group.
    Count,
    /// Sum of a numeric field; non-numeric and missing values are ignored.
    Sum(String),
}

/// Group documents by the value of `key`. Each output document holds the key
/// under its own name followed by one field per accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: String,
    pub accumulators: Vec<(String, Accumulator)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    Match(Expression),
    AddFields(Vec<(String, Expr)>),
    Group(Group),
    Sort(Vec<Sort>),
    Project(Vec<String>),
    Skip(u64),
    Limit(u64),
}

pub(crate) fn run(
    mut docs: Vec<Document>,
    stages: &[Stage],
    collation: Collation,
) -> Result<Vec<Document>, DbError> {
    for stage in stages {
        docs = match stage {
            Stage::Match(expr) => docs
                .into_iter()
                .filter(|d| eval::matches(d, expr, collation))
                .collect(),
            Stage::AddFields(fields) => {
                for doc in &mut docs {
                    for (name, expr) in fields {
                        let value = expr.evaluate(doc)?;
                        doc.insert(name.clone(), value);
                    }
                }
                docs
            }
            Stage::Group(group) => group_documents(&docs, group, collation),
            Stage::Sort(sorts) => {
                sort_documents(&mut docs, sorts, collation);
                docs
            }
            Stage::Project(fields) => docs.iter().map(|d| project(d, fields)).collect(),
            Stage::Skip(n) => paginate(docs, Some(*n), None),
            Stage::Limit(n) => paginate(docs, None, Some(*n)),
        };
    }
    Ok(docs)
}

/// Stable multi-key sort; documents that tie keep their incoming order.
pub(crate) fn sort_documents(docs: &mut [Document], sorts: &[Sort], collation: Collation) {
    if sorts.is_empty() {
        return;
    }
    docs.sort_by(|a, b| {
        for sort in sorts {
            let ord = compare_field_values(
                get_path(a, &sort.field),
                get_path(b, &sort.field),
                collation,
            );
            let ord = match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}

pub(crate) fn paginate(docs: Vec<Document>, skip: Option<u64>, limit: Option<u64>) -> Vec<Document> {
    let skip = skip.map_or(0, |n| usize::try_from(n).unwrap_or(usize::MAX));
    let iter = docs.into_iter().skip(skip);
    match limit {
        Some(n) => iter.take(usize::try_from(n).unwrap_or(usize::MAX)).collect(),
        None => iter.collect(),
    }
}

fn project(doc: &Document, fields: &[String]) -> Document {
    let mut out = Document::new();
    for field in fields {
        if let Some(value) = doc.get(field) {
            out.insert(field.clone(), value.clone());
        }
    }
    out
}

struct GroupState {
    key: Bson,
    count: i64,
    sums: Vec<Sum>,
}

#[derive(Clone, Copy)]
enum Sum {
    Int(i64),
    Float(f64),
}

impl Sum {
    fn add(self, value: &Bson) -> Sum {
        match (self, as_i64(value), as_f64(value)) {
            (Sum::Int(acc), Some(n), _) => match acc.checked_add(n) {
                Some(total) => Sum::Int(total),
                None => Sum::Float(acc as f64 + n as f64),
            },
            (Sum::Int(acc), None, Some(f)) => Sum::Float(acc as f64 + f),
            (Sum::Float(acc), _, Some(f)) => Sum::Float(acc + f),
            (sum, _, None) => sum,
        }
    }

    fn into_bson(self) -> Bson {
        match self {
            Sum::Int(n) => Bson::Int64(n),
            Sum::Float(f) => Bson::Double(f),
        }
    }
}

/// Groups come out in the order their key was first seen, each keyed by the
/// first spelling encountered.
fn group_documents(docs: &[Document], group: &Group, collation: Collation) -> Vec<Document> {
    let mut groups: Vec<GroupState> = Vec::new();

    for doc in docs {
        let key = get_path(doc, &group.key).cloned().unwrap_or(Bson::Null);
        let index = match groups
            .iter()
            .position(|g| values_equal(&g.key, &key, collation))
        {
            Some(i) => i,
            None => {
                groups.push(GroupState {
                    key,
                    count: 0,
                    sums: vec![Sum::Int(0); group.accumulators.len()],
                });
                groups.len() - 1
            }
        };

        let state = &mut groups[index];
        state.count += 1;
        for (slot, (_, acc)) in state.sums.iter_mut().zip(&group.accumulators) {
            if let Accumulator::Sum(field) = acc {
                if let Some(value) = get_path(doc, field) {
                    *slot = slot.add(value);
                }
            }
        }
    }

    groups
        .into_iter()
        .map(|state| {
            let mut out = Document::new();
            out.insert(group.key.clone(), state.key);
            for ((name, acc), sum) in group.accumulators.iter().zip(state.sums) {
                let value = match acc {
                    Accumulator::Count => Bson::Int64(state.count),
                    Accumulator::Sum(_) => sum.into_bson(),
                };
                out.insert(name.clone(), value);
            }
            out
        })
        .collect()
}
