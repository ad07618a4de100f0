//! `#` preprocessor-directive lines and `//` comments: both are skipped to
//! end-of-line (or EOF) without producing a token.

use crate::lexer::core::Lexer;
use crate::token::Token;

impl<'src, 'sym> Lexer<'src, 'sym> {
    pub(crate) fn skip_directive_line(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current() != b'\n' {
            self.cursor.advance();
        }
    }

    /// `/` has already been consumed. Returns `None` if it started a `//`
    /// comment (fully consumed here), `Some(Div)` otherwise.
    pub(crate) fn lex_slash(&mut self) -> Option<Token> {
        if self.cursor.match_byte(b'/') {
            self.skip_directive_line();
            None
        } else {
            Some(Token::Div)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c4_util::SymbolTable;

    #[test]
    fn line_comment_is_skipped_entirely() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"// a comment\n1", &mut syms);
        assert_eq!(lex.advance(), Token::Num);
        assert_eq!(lex.ival(), 1);
    }

    #[test]
    fn bare_slash_is_div() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"/ 1", &mut syms);
        assert_eq!(lex.advance(), Token::Div);
    }

    #[test]
    fn directive_line_is_skipped() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"#include <foo>\n1", &mut syms);
        assert_eq!(lex.advance(), Token::Num);
    }
}
