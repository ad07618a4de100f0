//! The three-way operators: `!`/`!=`, `<`/`<=`/`<<`, `>`/`>=`/`>>`.
//!
//! These don't fit [`Lexer::two_char`]'s binary shape (one alternate
//! spelling), so they get their own dispatch.

use crate::lexer::core::Lexer;
use crate::token::Token;

impl<'src, 'sym> Lexer<'src, 'sym> {
    /// A bare `!` (not followed by `=`) is returned as `Token::Raw(b'!')`
    /// rather than falling through unset, per spec.md §9's Open Questions —
    /// the source's `next()` leaves `tk` unset in that case and relies on
    /// the caller's own loop variable reuse to recover; we make the token
    /// explicit instead.
    pub(crate) fn lex_bang(&mut self) -> Token {
        if self.cursor.match_byte(b'=') {
            Token::Ne
        } else {
            Token::Raw(b'!')
        }
    }

    pub(crate) fn lex_less(&mut self) -> Token {
        if self.cursor.match_byte(b'=') {
            Token::Le
        } else if self.cursor.match_byte(b'<') {
            Token::Shl
        } else {
            Token::Lt
        }
    }

    pub(crate) fn lex_greater(&mut self) -> Token {
        if self.cursor.match_byte(b'=') {
            Token::Ge
        } else if self.cursor.match_byte(b'>') {
            Token::Shr
        } else {
            Token::Gt
        }
    }
}
