//! Flag Parser
//!
//! Turns a raw flag string into tokens ready for classification.

pub mod lexer;

pub use lexer::{FRAMEWORK, Token, TokenKind, tokenize};
