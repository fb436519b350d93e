pub mod history;
pub mod tokenizer;

pub use history::types::{Expansion, HistoryError};
pub use history::History;
pub use tokenizer::{tokenize, Tokens};
