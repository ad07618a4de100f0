//! Lexer module, split by token category the way the teacher crate splits
//! it:
//! - `core` - the `Lexer` struct and its main dispatch
//! - `identifier` - identifiers and keyword recognition
//! - `number` - decimal/hex/octal literals
//! - `string` - string and character literals
//! - `operator` - the three-way `!`/`<`/`>` operators
//! - `comment` - `#` directive lines and `//` comments

mod comment;
mod core;
mod identifier;
mod number;
mod operator;
mod string;

pub use core::Lexer;
