//! c4-par — the expression/statement/top-level parser, emitting directly
//! into a [`TextSegment`]/[`DataSegment`] pair as it goes.
//!
//! There is no intermediate AST: like the source compiler's single
//! `expr()`/`stmt()` pass, every grammar production here both recognizes
//! its syntax *and* emits the bytecode for it in the same walk. Unlike
//! `faxc-par`'s `Parser<'a>`, which first tokenizes the whole input into a
//! `Vec<Token>` and walks that, this parser stays streaming: it holds a
//! [`Lexer`] and asks it for one token at a time, matching the original
//! `next()`-drives-`expr()`/`stmt()` control flow exactly.

mod expr;
mod items;
mod stmt;

pub mod error;

use c4_codegen::{DataSegment, Op, TextSegment};
use c4_lex::{Lexer, Token};
use c4_util::{Class, SymId, SymbolTable, Ty};

pub use error::CompileError;

pub type PResult<T> = Result<T, CompileError>;

/// Library functions seeded into the symbol table ahead of parsing, in
/// the exact order the source compiler's opcode enum assigns them —
/// `Op::Open..=Op::Exit` line up one-to-one with this list.
pub const BUILTINS: &[&str] = &[
    "open", "read", "close", "printf", "malloc", "free", "memset", "memcmp", "exit",
];


/// Parses one translation unit, emitting into `text`/`data` as it goes.
///
/// `symbols` is supplied by the caller (the driver) already seeded with
/// keywords and builtins via [`seed`] — the parser only interns the
/// identifiers it discovers in `source`.
pub struct Parser<'src, 'sym> {
    lexer: Lexer<'src, 'sym>,
    pub text: TextSegment,
    pub data: DataSegment,
    tk: Token,
    line: u32,
    /// `SymId` of the current token when it is an `Id`, mirroring the
    /// source compiler's single global `id` pointer updated by `next()`.
    sym: Option<SymId>,
    /// Type of the expression just parsed; threaded through `expr`/`stmt`
    /// the same way the source compiler threads its global `ty`.
    ty: Ty,
    /// Frame-relative index one past the last declared parameter, i.e.
    /// the source compiler's `loc` — local declarations count up from
    /// here, and `Lea` operands for locals are `loc - val`.
    loc: i64,
    main: Option<SymId>,
    /// Numeric value of the current token (meaningful only when `tk ==
    /// Num`), cached at `bump` time the same as `sym`.
    ival: i64,
    /// `(line, text position)` recorded every time `bump` crosses onto a
    /// new source line, so a driver wanting a `-s`-style per-line listing
    /// can slice `text` between consecutive marks. The source compiler
    /// gets this for free by flushing a line's instructions the moment
    /// its combined lexer/parser loop notices `\n`; this parser's lexer
    /// and parser are decoupled, so marks are approximated here instead —
    /// good enough for single-statement lines, not guaranteed pixel-exact
    /// for a statement split across several.
    pub line_marks: Vec<(u32, c4_util::CodeAddr)>,
}

/// Seeds `symbols` with the keywords and builtin syscalls every program
/// may reference, in the same two passes (`next()`-driven) the source
/// compiler's `main` uses before it ever opens the program file.
pub fn seed(symbols: &mut SymbolTable) {
    for (name, tok) in Token::KEYWORDS {
        symbols.seed_keyword(name, tok.code() as u16);
    }
    let first_syscall = Op::Open.code();
    for (i, name) in BUILTINS.iter().enumerate() {
        symbols.seed_builtin(name, Token::Id.code() as u16, first_syscall + i as i64);
    }
    // `void` behaves exactly like `char`: a width-one base type admitted
    // only so `void *x` parses.
    symbols.seed_keyword("void", Token::Char.code() as u16);
}

impl<'src, 'sym> Parser<'src, 'sym> {
    pub fn new(source: &'src [u8], symbols: &'sym mut SymbolTable, data_capacity: usize) -> Self {
        let lexer = Lexer::new(source, symbols);
        let mut parser = Self {
            lexer,
            text: TextSegment::new(),
            data: DataSegment::new(data_capacity),
            tk: Token::Eof,
            line: 1,
            sym: None,
            ty: c4_util::INT,
            loc: 0,
            main: None,
            ival: 0,
            line_marks: Vec::new(),
        };
        parser.line_marks.push((1, parser.text.here()));
        parser.bump();
        parser
    }

    /// Parses every top-level declaration until end of input, then checks
    /// that `main` was defined. Returns the `SymId` of `main` on success.
    pub fn parse_program(&mut self) -> PResult<SymId> {
        while self.tk != Token::Eof {
            self.parse_global_decl()?;
        }
        self.main.ok_or(CompileError::MainNotDefined)
    }

    /// Advances to the next token, recording its line and (if it's an
    /// `Id`) its symbol id — the single point every other method calls
    /// to move forward, matching the source compiler's `next()`.
    fn bump(&mut self) {
        self.tk = self.lexer.advance();
        let new_line = self.lexer.line();
        if new_line != self.line {
            self.line_marks.push((new_line, self.text.here()));
        }
        self.line = new_line;
        self.sym = self.lexer.sym_id();
        self.ival = self.lexer.ival();
    }

    pub fn symbols(&self) -> &SymbolTable {
        self.lexer.symbols()
    }

    fn symbols_mut(&mut self) -> &mut SymbolTable {
        self.lexer.symbols_mut()
    }

    /// The current token's `Id` symbol, or `None` for every other token —
    /// there is exactly one live "current identifier" at a time, the same
    /// as the source compiler's single `id` pointer.
    fn current_sym(&self) -> Option<SymId> {
        if self.tk == Token::Id {
            self.sym
        } else {
            None
        }
    }

    fn class_of(&self, id: SymId) -> Option<Class> {
        self.symbols().get(id).class
    }

    /// Consumes the current token if it equals `raw`, otherwise reports
    /// `err`. Used for the single-byte punctuation the grammar requires
    /// (`(`, `)`, `;`, ...).
    fn expect_raw(&mut self, raw: u8, err: impl FnOnce(u32) -> CompileError) -> PResult<()> {
        if self.tk == Token::Raw(raw) {
            self.bump();
            Ok(())
        } else {
            Err(err(self.line))
        }
    }

    /// Backpatches a branch-target hole with the text segment's current
    /// address, the Rust-side equivalent of the source compiler's
    /// `*b = (int)(e + 1)` pokes.
    fn patch_here(&mut self, hole: c4_util::CodeAddr) {
        let here = self.text.here().as_u32() as i64;
        self.text.patch(hole, here);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &'static str) -> PResult<Vec<i64>> {
        let mut symbols = SymbolTable::new();
        seed(&mut symbols);
        let mut parser = Parser::new(src.as_bytes(), &mut symbols, 4096);
        parser.parse_program()?;
        Ok(parser.text.as_slice().to_vec())
    }

    #[test]
    fn precedence_climbing_scales_multiplication_before_addition() {
        let words = compile("int main() { return 2+3*4; }").unwrap();
        let expected = [
            Op::Ent.code(),
            0,
            Op::Imm.code(),
            2,
            Op::Psh.code(),
            Op::Imm.code(),
            3,
            Op::Psh.code(),
            Op::Imm.code(),
            4,
            Op::Mul.code(),
            Op::Add.code(),
            Op::Lev.code(),
            Op::Lev.code(),
        ];
        assert_eq!(words, expected);
    }

    #[test]
    fn pointer_addition_scales_by_one_word() {
        let words = compile(
            "int main() { int *p; int x; p = &x; p = p + 1; return 0; }",
        )
        .unwrap();
        // `p + 1` must scale the right-hand `1` by a full word before ADD.
        let scale_sequence = [
            Op::Psh.code(),
            Op::Imm.code(),
            c4_util::WORD,
            Op::Mul.code(),
            Op::Add.code(),
        ];
        assert!(words.windows(scale_sequence.len()).any(|w| w == scale_sequence));
    }

    #[test]
    fn char_pointer_addition_does_not_scale() {
        let words = compile("int main() { char *s; s = \"hi\"; s = s + 1; return 0; }").unwrap();
        // the add for a `char*` must not be preceded by a `* WORD` scale.
        let bad_sequence = [Op::Imm.code(), c4_util::WORD, Op::Mul.code(), Op::Add.code()];
        assert!(!words.windows(bad_sequence.len()).any(|w| w == bad_sequence));
    }

    #[test]
    fn enum_constants_get_consecutive_values_from_explicit_initializer() {
        let words = compile("enum { A, B=10, C }; int main() { return A+B+C; }").unwrap();
        assert!(words.windows(2).any(|w| w == [Op::Imm.code(), 0]));
        assert!(words.windows(2).any(|w| w == [Op::Imm.code(), 10]));
        assert!(words.windows(2).any(|w| w == [Op::Imm.code(), 11]));
    }

    #[test]
    fn undefined_variable_is_reported_with_line_number() {
        let err = compile("int main() { return nope; }").unwrap_err();
        assert_eq!(err, CompileError::UndefinedVariable { line: 1 });
    }

    #[test]
    fn calling_an_undeclared_name_is_a_bad_function_call() {
        let err = compile("int x; int main() { return x(1); }").unwrap_err();
        assert_eq!(err, CompileError::BadFunctionCall { line: 1 });
    }

    #[test]
    fn duplicate_global_definition_is_rejected() {
        let err = compile("int x; int x; int main() { return 0; }").unwrap_err();
        assert_eq!(err, CompileError::DuplicateGlobalDefinition { line: 1 });
    }

    #[test]
    fn dereferencing_a_non_pointer_is_rejected() {
        let err = compile("int main() { int x; return *x; }").unwrap_err();
        assert_eq!(err, CompileError::BadDereference { line: 1 });
    }

    #[test]
    fn missing_main_is_reported_without_a_line_number() {
        let err = compile("int f() { return 0; }").unwrap_err();
        assert_eq!(err, CompileError::MainNotDefined);
    }

    #[test]
    fn main_resolves_to_a_function_symbol() {
        let mut symbols = SymbolTable::new();
        seed(&mut symbols);
        let src = "int main() { return 0; }";
        let mut parser = Parser::new(src.as_bytes(), &mut symbols, 4096);
        let main_id = parser.parse_program().unwrap();
        assert_eq!(parser.symbols().get(main_id).name, "main");
    }

    #[test]
    fn shadowed_locals_are_restored_after_the_function_closes() {
        let mut symbols = SymbolTable::new();
        seed(&mut symbols);
        let src = "int f(int x) { int y; y = x; return y; } int main() { return f(1); }";
        let mut parser = Parser::new(src.as_bytes(), &mut symbols, 4096);
        parser.parse_program().unwrap();
        assert!(!parser.symbols().has_any_local());
    }
}
