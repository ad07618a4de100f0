//! c4-lex — single-pass tokenizer.
//!
//! One token at a time, streaming straight from the source buffer: there is
//! no intermediate token vector, matching the source compiler's `next()`
//! being called directly from inside the parser rather than feeding it from
//! a pre-tokenized stream. This is the same architecture `faxc-lex` uses
//! (its `Lexer` is also pull-based), just without `faxc-util`'s string
//! interner — identifiers are interned straight into the shared
//! `c4_util::SymbolTable` that `c4-par` will go on to mutate during parsing.

mod cursor;
mod lexer;
mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::Token;
