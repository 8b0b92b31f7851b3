/// Option entry types produced by the parser.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for parsed documents.
pub mod dump;
/// Serializes option entries back to text.
pub mod emit;
/// Options lexer: tokenizes raw text into borrowed tokens.
pub mod lexer;
/// Entry parser: groups tokens into option entries.
pub mod parser;
