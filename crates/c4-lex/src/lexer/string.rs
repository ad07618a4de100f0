//! String and character literal lexing.
//!
//! Both share one loop, distinguished only by the opening quote: a `'`
//! literal runs the loop once (or a few times for multi-char escapes like
//! `'\n'`) and reports `Num` with the last decoded byte as its value; a `"`
//! literal accumulates every decoded byte and reports the raw `"` token,
//! leaving the bytes for the caller to copy into the data segment (`c4-lex`
//! itself owns no data segment — see `c4-par`).

use crate::lexer::core::Lexer;
use crate::token::Token;

impl<'src, 'sym> Lexer<'src, 'sym> {
    pub(crate) fn lex_string_or_char(&mut self, quote: u8) -> Token {
        self.string_bytes.clear();
        let mut last: i64 = 0;
        while !self.cursor.is_at_end() && self.cursor.current() != quote {
            let mut byte = self.cursor.bump();
            if byte == b'\\' {
                let escaped = self.cursor.bump();
                // Only `\n` is special-cased; every other escaped byte
                // passes through literally (spec.md §9 "likely bugs").
                byte = if escaped == b'n' { b'\n' } else { escaped };
            }
            last = byte as i64;
            if quote == b'"' {
                self.string_bytes.push(byte);
            }
        }
        self.cursor.advance(); // closing quote

        if quote == b'"' {
            Token::Raw(b'"')
        } else {
            self.ival = last;
            Token::Num
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c4_util::SymbolTable;

    #[test]
    fn string_literal_decodes_newline_escape() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"\"a\\nb\"", &mut syms);
        assert_eq!(lex.advance(), Token::Raw(b'"'));
        assert_eq!(lex.take_string_bytes(), b"a\nb");
    }

    #[test]
    fn unknown_escape_is_literal() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"\"\\q\"", &mut syms);
        assert_eq!(lex.advance(), Token::Raw(b'"'));
        assert_eq!(lex.take_string_bytes(), b"q");
    }

    #[test]
    fn char_literal_yields_num_with_char_code() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"'a'", &mut syms);
        assert_eq!(lex.advance(), Token::Num);
        assert_eq!(lex.ival(), b'a' as i64);
    }

    #[test]
    fn char_literal_escape() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"'\\n'", &mut syms);
        assert_eq!(lex.advance(), Token::Num);
        assert_eq!(lex.ival(), b'\n' as i64);
    }
}
