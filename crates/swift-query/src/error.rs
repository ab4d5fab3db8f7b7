use std::fmt;

/// A request parameter the query language cannot accept. Caused by the
/// client; reported back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    Duplicated { keyword: String },
    NotANumber { keyword: String },
    MultipleValues { field: String },
    MalformedQuestion { value: String },
    UnsupportedOperator { field: String, operator: String },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::Duplicated { keyword } => {
                write!(f, "Duplicated value for {keyword}, please check your query")
            }
            ParamError::NotANumber { keyword } => {
                write!(f, "{keyword} value is not a number, please check your query")
            }
            ParamError::MultipleValues { field } => {
                write!(f, "{field} cannot have multiple value, please check your query")
            }
            ParamError::MalformedQuestion { value } => write!(
                f,
                "question '{value}' is malformed, expected name or name(param)"
            ),
            ParamError::UnsupportedOperator { field, operator } => write!(
                f,
                "{field} has unsupported operator '{operator}', please check your query"
            ),
        }
    }
}

impl std::error::Error for ParamError {}
