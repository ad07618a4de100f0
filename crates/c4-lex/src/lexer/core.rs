//! The `Lexer` struct and its main dispatch.

use c4_util::SymbolTable;

use crate::cursor::Cursor;
use crate::token::Token;

/// Tokenizes one source buffer, interning identifiers directly into a
/// caller-owned [`SymbolTable`] as it goes — there is no separate
/// "intern everything up front" pass, matching the single-pass `next()` the
/// source compiler drives straight from the parser.
pub struct Lexer<'src, 'sym> {
    pub(crate) cursor: Cursor<'src>,
    pub(crate) symbols: &'sym mut SymbolTable,
    /// Numeric value for the last `Num` token, or the data-segment-relative
    /// start offset for the last string-literal token (the caller adds the
    /// data segment's base address; see `c4-par`).
    pub(crate) ival: i64,
    /// Symbol-table id for the last `Id` token.
    pub(crate) sym_id: Option<c4_util::SymId>,
    /// Decoded bytes of the last string literal (escapes already applied).
    pub(crate) string_bytes: Vec<u8>,
}

impl<'src, 'sym> Lexer<'src, 'sym> {
    pub fn new(source: &'src [u8], symbols: &'sym mut SymbolTable) -> Self {
        Self {
            cursor: Cursor::new(source),
            symbols,
            ival: 0,
            sym_id: None,
            string_bytes: Vec::new(),
        }
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        self.symbols
    }

    pub fn current_line_text(&self) -> &'src [u8] {
        self.cursor.current_line_text()
    }

    pub fn ival(&self) -> i64 {
        self.ival
    }

    pub fn sym_id(&self) -> Option<c4_util::SymId> {
        self.sym_id
    }

    /// Takes ownership of the decoded string-literal bytes collected by the
    /// last token, leaving the lexer's buffer empty for the next one.
    pub fn take_string_bytes(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.string_bytes)
    }

    /// Reads and returns the next token. Whitespace, `#` directive lines,
    /// and `//` comments are consumed silently — the outer loop simply
    /// restarts without producing a token for them, the same way the source
    /// compiler's `while (tk = *p)` loop falls through.
    pub fn advance(&mut self) -> Token {
        loop {
            if self.cursor.is_at_end() {
                return Token::Eof;
            }
            let c = self.cursor.bump();
            match c {
                b'#' => self.skip_directive_line(),
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => return self.lex_identifier(c),
                b'0'..=b'9' => return self.lex_number(c),
                b'/' => {
                    if let Some(tok) = self.lex_slash() {
                        return tok;
                    }
                    // else: was a `//` comment, loop continues
                }
                b'\'' | b'"' => return self.lex_string_or_char(c),
                b'=' => return self.two_char(b'=', Token::Eq, Token::Assign),
                b'+' => return self.two_char(b'+', Token::Inc, Token::Add),
                b'-' => return self.two_char(b'-', Token::Dec, Token::Sub),
                b'!' => return self.lex_bang(),
                b'<' => return self.lex_less(),
                b'>' => return self.lex_greater(),
                b'|' => return self.two_char(b'|', Token::Lor, Token::Or),
                b'&' => return self.two_char(b'&', Token::Lan, Token::And),
                b'^' => return Token::Xor,
                b'%' => return Token::Mod,
                b'*' => return Token::Mul,
                b'[' => return Token::Brak,
                b'?' => return Token::Cond,
                b'~' | b';' | b'{' | b'}' | b'(' | b')' | b']' | b',' | b':' => {
                    return Token::Raw(c)
                }
                _ => {} // whitespace, or anything else: skip silently
            }
        }
    }

    /// `c == expected` consumes one more byte and returns `then`; otherwise
    /// returns `otherwise` without consuming. Covers `==`, `++`, `--`,
    /// `||`, `&&`.
    fn two_char(&mut self, expected: u8, then: Token, otherwise: Token) -> Token {
        if self.cursor.match_byte(expected) {
            then
        } else {
            otherwise
        }
    }

}
