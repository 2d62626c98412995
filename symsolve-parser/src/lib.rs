//! Tokenizer and parser for algebraic expressions and equations.
//!
//! The parser produces a syntax tree that keeps the source spans of every node, so that errors
//! can be reported against the original input. Turning the tree into something that can be
//! manipulated algebraically is the job of the consumer.

pub mod parser;
pub mod tokenizer;

pub use parser::{error::Error, Parser};
