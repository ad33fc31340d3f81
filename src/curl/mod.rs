//! Transfer-command import pipeline.
//!
//! Converts a curl-style command string copied from a browser or terminal
//! into a canonical [`RequestItem`](crate::models::RequestItem): the
//! [`tokenizer`] lexes the command honoring shell quoting, and the [`parser`]
//! walks the tokens to populate method, URL, headers, body and auth.

pub mod parser;
pub mod tokenizer;

pub use parser::{parse_command, parse_command_with, ParseError};
pub use tokenizer::tokenize;
