use std::collections::HashMap;
use std::fmt;

use swift_db::{Expr, Expression, Stage};
use swift_query::Sort;

use crate::error::QueryError;

/// What a question expands to: either a plain filter/sort, or a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionQuery {
    Find {
        filter: Option<Expression>,
        sort: Vec<Sort>,
    },
    Pipeline(Vec<Stage>),
}

/// Builds a question's query from its optional parameter.
pub type QuestionFn = fn(Option<&str>) -> QuestionQuery;

/// Named, server-defined queries. Built once at startup and shared
/// read-only between requests.
#[derive(Clone, Default)]
pub struct QuestionCatalog {
    questions: HashMap<String, QuestionFn>,
}

impl fmt::Debug for QuestionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuestionCatalog")
            .field("questions", &self.names())
            .finish()
    }
}

impl QuestionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The questions every deployment answers: `title(prefix)` and `trending`.
    pub fn builtin() -> Self {
        Self::new()
            .register("title", title)
            .register("trending", trending)
    }

    /// Add a question. Names are matched case-insensitively, like every
    /// other request parameter.
    pub fn register(mut self, name: &str, question: QuestionFn) -> Self {
        self.questions.insert(name.to_lowercase(), question);
        self
    }

    pub fn lookup(&self, name: &str, param: Option<&str>) -> Result<QuestionQuery, QueryError> {
        let question = self
            .questions
            .get(name)
            .ok_or_else(|| QueryError::UnknownQuestion(name.to_string()))?;
        Ok(question(param))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.questions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Songs whose title starts with `param`, ignoring case. The parameter is a
/// literal prefix, not a pattern; no parameter matches every song.
fn title(param: Option<&str>) -> QuestionQuery {
    QuestionQuery::Find {
        filter: Some(Expression::IStartsWith(
            "song".into(),
            param.unwrap_or_default().to_string(),
        )),
        sort: Vec::new(),
    }
}

/// Songs ranked by how much their plays grew from July to August.
fn trending(_param: Option<&str>) -> QuestionQuery {
    QuestionQuery::Pipeline(vec![
        Stage::AddFields(vec![(
            "trend".into(),
            Expr::subtract(Expr::field("plays-august"), Expr::field("plays-july")),
        )]),
        Stage::Sort(vec![Sort::desc("trend")]),
    ])
}
