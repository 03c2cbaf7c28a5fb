use crate::engine::Operator;
use thiserror::Error;

pub type CalcResult<T> = Result<T, CalcError>;

/// Every way an expression, or the session around it, can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("Memory allocation failed")]
    OutOfMemory,

    #[error("Stack capacity of {capacity} exhausted")]
    StackExhausted { capacity: usize },

    #[error("Not enough operands for '{operator}'")]
    ValueStackUnderflow { operator: Operator },

    #[error("Mismatched bracket")]
    BracketMismatch,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("'{left} {operator} {right}' needs non-negative integers with {left} >= {right}")]
    FactorialDomainError {
        operator: Operator,
        left: f64,
        right: f64,
    },

    #[error("'{operator}' is undefined for {value}")]
    DomainUndefined { operator: Operator, value: f64 },

    #[error("'{operator}' has no finite result for {value}")]
    RangeUndefined { operator: Operator, value: f64 },

    #[error("Invalid operands for '{operator}'")]
    InvalidOperator { operator: Operator },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid answer reference '{reference}'")]
    InvalidAnswerReference { reference: String },

    #[error("Answer count overflow")]
    CountOverflow,

    #[error("Malformed expression: {values} values left after evaluation")]
    MalformedExpression { values: usize },

    #[error("Invalid size: {what} must be greater than zero")]
    InvalidSize { what: &'static str },
}

impl CalcError {
    /// Only allocation failure ends a session; everything else aborts the
    /// current expression.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CalcError::OutOfMemory)
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        CalcError::ParseError {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_reference(reference: impl ToString) -> Self {
        CalcError::InvalidAnswerReference {
            reference: reference.to_string(),
        }
    }
}
