//! Identifier and keyword lexing.

use crate::lexer::core::Lexer;
use crate::token::Token;

impl<'src, 'sym> Lexer<'src, 'sym> {
    /// `first` is the byte already consumed by [`Lexer::advance`]'s
    /// dispatch. Matches `[A-Za-z_][A-Za-z0-9_]*`.
    pub(crate) fn lex_identifier(&mut self, first: u8) -> Token {
        let start = self.cursor.position() - 1;
        while matches!(self.cursor.current(), b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_') {
            self.cursor.advance();
        }
        let end = self.cursor.position();
        let bytes = self.cursor.slice(start, end);
        debug_assert_eq!(bytes[0], first);
        // Source is guaranteed ASCII identifier bytes here.
        let name = std::str::from_utf8(bytes).expect("identifier bytes are ASCII");

        let id = self.symbols.lookup_or_insert(name, Token::Id.code() as u16);
        self.sym_id = Some(id);
        let tk = self.symbols.get(id).tk;
        // A previously-seeded keyword keeps its own `tk`; anything else
        // (a fresh name, or a builtin — whose `tk` seeding never touches
        // `Tk`) reports plain `Id`.
        if tk == Token::Id.code() as u16 {
            Token::Id
        } else {
            token_from_code(tk)
        }
    }
}

/// Inverse of [`Token::code`] for the keyword range, used to recover which
/// keyword a previously-seeded symbol-table record denotes.
fn token_from_code(code: u16) -> Token {
    match code as i32 {
        134 => Token::Char,
        135 => Token::Else,
        136 => Token::Enum,
        137 => Token::If,
        138 => Token::Int,
        139 => Token::Return,
        140 => Token::Sizeof,
        141 => Token::While,
        _ => Token::Id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c4_util::SymbolTable;

    #[test]
    fn plain_identifier_round_trips_through_symbol_table() {
        let mut syms = SymbolTable::new();
        let mut lex = Lexer::new(b"foo bar", &mut syms);
        assert_eq!(lex.advance(), Token::Id);
        let foo = lex.sym_id().unwrap();
        assert_eq!(lex.advance(), Token::Id);
        let bar = lex.sym_id().unwrap();
        assert_ne!(foo, bar);
    }

    #[test]
    fn seeded_keyword_is_recognized() {
        let mut syms = SymbolTable::new();
        syms.seed_keyword("while", Token::While.code() as u16);
        let mut lex = Lexer::new(b"while", &mut syms);
        assert_eq!(lex.advance(), Token::While);
    }
}
