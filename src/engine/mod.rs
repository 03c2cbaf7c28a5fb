mod calculate;
mod evaluator;
mod operator;
mod stack;

pub use evaluator::Evaluator;
pub use operator::{Arity, Operator, Precedence};
pub use stack::BoundedStack;
