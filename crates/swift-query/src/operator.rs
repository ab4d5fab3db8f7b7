use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Comparison kind of a single filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// A token the grammar captured but has no canonical kind for. Carried
    /// through untouched; the resolver decides whether it can be executed.
    Other(String),
}

impl Operator {
    pub fn from_token(token: &str) -> Self {
        match token {
            "=" => Operator::Eq,
            "!=" => Operator::Ne,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            other => Operator::Other(other.to_string()),
        }
    }

    pub fn as_token(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Other(token) => token,
        }
    }
}

/// `field`, operator and raw value of one `field<op>value` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterExpression<'a> {
    pub field: &'a str,
    pub operator: Operator,
    pub value: &'a str,
}

// The field runs up to the first operator character; the operator is the
// longest of `>=`, `<=`, `!=`, `>`, `<`, `=` found there (or nothing).
static FILTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^><!=]+)([><]=?|!?=|)(.*)$").expect("filter pattern is valid")
});

/// Split `field<op>value` into its three parts.
///
/// Never fails loudly: input that does not fit the grammar (for example a
/// string starting with an operator character) yields `None` and the caller
/// produces no predicate for it.
pub fn split_expression(input: &str) -> Option<FilterExpression<'_>> {
    let captures = FILTER_PATTERN.captures(input)?;
    Some(FilterExpression {
        field: captures.get(1)?.as_str(),
        operator: Operator::from_token(captures.get(2).map_or("", |m| m.as_str())),
        value: captures.get(3).map_or("", |m| m.as_str()),
    })
}
