use std::collections::BTreeMap;

use bson::Bson;
use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// The condition attached to one filtered field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Compare { operator: Operator, value: Bson },
    /// `field=a,b,c`
    In(Vec<Bson>),
    /// `field!=a,b,c`
    NotIn(Vec<Bson>),
}

/// Field name → predicate. A field carries at most one predicate.
pub type Filter = BTreeMap<String, Predicate>;
