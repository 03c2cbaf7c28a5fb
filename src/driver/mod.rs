mod session;
mod tokenizer;

pub use session::Calculator;
pub use tokenizer::{tokenize, Token};
