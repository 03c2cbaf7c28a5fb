mod reference;
mod store;

pub use reference::ANSWER_PREFIXES;
pub use store::AnswerStore;
