use bson::Bson;

/// A filter over documents in a collection.
///
/// Owns its field names and values so it can be built from parsed request
/// parameters and handed to any [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    // Logical
    And(Vec<Expression>),
    // Comparison
    Eq(String, Bson),
    Ne(String, Bson),
    Gt(String, Bson),
    Gte(String, Bson),
    Lt(String, Bson),
    Lte(String, Bson),
    // Membership
    In(String, Vec<Bson>),
    Nin(String, Vec<Bson>),
    // Pattern: case-insensitive literal prefix
    IStartsWith(String, String),
}

impl Expression {
    /// Combine conditions under a single AND, collapsing the trivial cases.
    pub fn all(mut children: Vec<Expression>) -> Option<Expression> {
        match children.len() {
            0 => None,
            1 => children.pop(),
            _ => Some(Expression::And(children)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_collapses() {
        assert_eq!(Expression::all(vec![]), None);

        let single = Expression::Eq("a".into(), Bson::Int32(1));
        assert_eq!(Expression::all(vec![single.clone()]), Some(single.clone()));

        let other = Expression::Gt("b".into(), Bson::Int32(2));
        assert_eq!(
            Expression::all(vec![single.clone(), other.clone()]),
            Some(Expression::And(vec![single, other]))
        );
    }
}
