pub mod answers;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;

pub use answers::AnswerStore;
pub use config::{AngleMode, AnswerConfig, CalcConfig};
pub use driver::{Calculator, Token};
pub use engine::{Evaluator, Operator};
pub use error::{CalcError, CalcResult};

/// Evaluates a single expression in a fresh session with the default
/// configuration. Answer references can only resolve within a session, so use
/// [`Calculator`] to keep a history.
pub fn evaluate_expression(expression: &str) -> CalcResult<f64> {
    let mut calculator = Calculator::new(CalcConfig::default().with_store_answers(false))?;
    calculator.evaluate(expression)
}
