//! The expression parser/emitter: precedence climbing over a single
//! recursive `expr`, transcribed from the source compiler's `expr(int lev)`
//! one operator at a time. There is no separate expression tree — every
//! arm below both recognizes its syntax and emits the instructions for it.

use c4_codegen::Op;
use c4_lex::Token;
use c4_util::{add_ptr, arith_step, deref, is_ptr, is_ptr_to_ptr, Class, CHAR, INT, WORD};

use crate::error::CompileError;
use crate::{PResult, Parser};

fn is_load(code: i64) -> bool {
    code == Op::Lc.code() || code == Op::Li.code()
}

impl<'src, 'sym> Parser<'src, 'sym> {
    /// Parses one expression whose operators all bind at least as tightly
    /// as `lev`, leaving the resulting value's type in `self.ty`.
    pub(crate) fn expr(&mut self, lev: Token) -> PResult<()> {
        self.prefix()?;

        while self.tk.code() >= lev.code() {
            let t = self.ty;
            match self.tk {
                Token::Assign => {
                    self.bump();
                    self.convert_last_load_or(CompileError::BadLvalueInAssignment)?;
                    self.expr(Token::Assign)?;
                    self.ty = t;
                    self.emit_store();
                }
                Token::Cond => {
                    self.bump();
                    self.text.emit(Op::Bz);
                    let hole1 = self.text.emit_operand(0);
                    self.expr(Token::Assign)?;
                    self.expect_raw(b':', |line| CompileError::ConditionalMissingColon { line })?;
                    self.text.emit(Op::Jmp);
                    let hole2 = self.text.emit_operand(0);
                    self.patch_here(hole1);
                    self.expr(Token::Cond)?;
                    self.patch_here(hole2);
                }
                Token::Lor => {
                    self.bump();
                    self.text.emit(Op::Bnz);
                    let hole = self.text.emit_operand(0);
                    self.expr(Token::Lan)?;
                    self.patch_here(hole);
                    self.ty = INT;
                }
                Token::Lan => {
                    self.bump();
                    self.text.emit(Op::Bz);
                    let hole = self.text.emit_operand(0);
                    self.expr(Token::Or)?;
                    self.patch_here(hole);
                    self.ty = INT;
                }
                Token::Or => self.binary_op(Token::Xor, Op::Or)?,
                Token::Xor => self.binary_op(Token::And, Op::Xor)?,
                Token::And => self.binary_op(Token::Eq, Op::And)?,
                Token::Eq => self.binary_op(Token::Lt, Op::Eq)?,
                Token::Ne => self.binary_op(Token::Lt, Op::Ne)?,
                Token::Lt => self.binary_op(Token::Shl, Op::Lt)?,
                Token::Gt => self.binary_op(Token::Shl, Op::Gt)?,
                Token::Le => self.binary_op(Token::Shl, Op::Le)?,
                Token::Ge => self.binary_op(Token::Shl, Op::Ge)?,
                Token::Shl => self.binary_op(Token::Add, Op::Shl)?,
                Token::Shr => self.binary_op(Token::Add, Op::Shr)?,
                Token::Add => {
                    self.bump();
                    self.text.emit(Op::Psh);
                    self.expr(Token::Mul)?;
                    self.ty = t;
                    if is_ptr_to_ptr(self.ty) {
                        self.scale_by_word();
                    }
                    self.text.emit(Op::Add);
                }
                Token::Sub => {
                    self.bump();
                    self.text.emit(Op::Psh);
                    self.expr(Token::Mul)?;
                    if is_ptr_to_ptr(t) && t == self.ty {
                        // pointer - pointer: element count, not a new pointer
                        self.text.emit(Op::Sub);
                        self.scale_by_word();
                        self.text.emit(Op::Div);
                        self.ty = INT;
                    } else if is_ptr_to_ptr(t) {
                        self.ty = t;
                        self.scale_by_word();
                        self.text.emit(Op::Sub);
                    } else {
                        self.ty = t;
                        self.text.emit(Op::Sub);
                    }
                }
                Token::Mul => self.binary_op_inc(Op::Mul)?,
                Token::Div => self.binary_op_inc(Op::Div)?,
                Token::Mod => self.binary_op_inc(Op::Mod)?,
                Token::Inc | Token::Dec => {
                    let inc = self.tk == Token::Inc;
                    self.convert_last_load_and_redup(CompileError::BadLvalueInPostIncrement)?;
                    let step = arith_step(self.ty);
                    self.text.emit(Op::Psh);
                    self.text.emit(Op::Imm);
                    self.text.emit_operand(step);
                    self.text.emit(if inc { Op::Add } else { Op::Sub });
                    self.text.emit(Op::Psh);
                    self.text.emit(Op::Imm);
                    self.text.emit_operand(step);
                    self.text.emit(if inc { Op::Sub } else { Op::Add });
                    self.bump();
                }
                Token::Brak => {
                    self.bump();
                    self.text.emit(Op::Psh);
                    self.expr(Token::Assign)?;
                    self.expect_raw(b']', |line| CompileError::CloseBracketExpected { line })?;
                    if is_ptr_to_ptr(t) {
                        self.scale_by_word();
                    } else if !is_ptr(t) {
                        return Err(CompileError::PointerTypeExpected { line: self.line });
                    }
                    self.text.emit(Op::Add);
                    self.ty = deref(t);
                    self.emit_load();
                }
                _ => {
                    return Err(CompileError::CompilerInternal {
                        line: self.line,
                        tk: self.tk.code(),
                    })
                }
            }
        }
        Ok(())
    }

    fn prefix(&mut self) -> PResult<()> {
        match self.tk {
            Token::Eof => Err(CompileError::UnexpectedEof { line: self.line }),
            Token::Num => {
                self.text.emit(Op::Imm);
                self.text.emit_operand(self.ival);
                self.bump();
                self.ty = INT;
                Ok(())
            }
            Token::Raw(b'"') => {
                let mut bytes = self.lexer.take_string_bytes();
                self.bump();
                while self.tk == Token::Raw(b'"') {
                    bytes.extend(self.lexer.take_string_bytes());
                    self.bump();
                }
                let addr = self.data.write_string(&bytes);
                self.data.align_word();
                self.text.emit(Op::Imm);
                self.text.emit_operand(addr);
                // treated as `char*`: a pointer whose pointee is word-sized
                // relative to `INT`, matching the spec's documented
                // departure from the source (which never assigns `ty` here
                // at all and leaves whatever type preceded the literal).
                self.ty = add_ptr(INT);
                Ok(())
            }
            Token::Id => self.id_expr(),
            Token::Raw(b'(') => self.paren_expr(),
            Token::Mul => {
                self.bump();
                self.expr(Token::Inc)?;
                if is_ptr(self.ty) {
                    self.ty = deref(self.ty);
                } else {
                    return Err(CompileError::BadDereference { line: self.line });
                }
                self.emit_load();
                Ok(())
            }
            Token::And => {
                self.bump();
                self.expr(Token::Inc)?;
                match self.text.last() {
                    Some(op) if is_load(op) => self.text.truncate_last(),
                    _ => return Err(CompileError::BadAddressOf { line: self.line }),
                }
                self.ty = add_ptr(self.ty);
                Ok(())
            }
            Token::Raw(b'!') => {
                self.bump();
                self.expr(Token::Inc)?;
                self.text.emit(Op::Psh);
                self.text.emit(Op::Imm);
                self.text.emit_operand(0);
                self.text.emit(Op::Eq);
                self.ty = INT;
                Ok(())
            }
            Token::Raw(b'~') => {
                self.bump();
                self.expr(Token::Inc)?;
                self.text.emit(Op::Psh);
                self.text.emit(Op::Imm);
                self.text.emit_operand(-1);
                self.text.emit(Op::Xor);
                self.ty = INT;
                Ok(())
            }
            Token::Add => {
                self.bump();
                self.expr(Token::Inc)?;
                self.ty = INT;
                Ok(())
            }
            Token::Sub => {
                self.bump();
                self.text.emit(Op::Imm);
                if self.tk == Token::Num {
                    self.text.emit_operand(-self.ival);
                    self.bump();
                } else {
                    self.text.emit_operand(-1);
                    self.text.emit(Op::Psh);
                    self.expr(Token::Inc)?;
                    self.text.emit(Op::Mul);
                }
                self.ty = INT;
                Ok(())
            }
            Token::Inc | Token::Dec => {
                let inc = self.tk == Token::Inc;
                self.bump();
                self.expr(Token::Inc)?;
                self.convert_last_load_and_redup(CompileError::BadLvalueInPreIncrement)?;
                self.text.emit(Op::Psh);
                self.text.emit(Op::Imm);
                self.text.emit_operand(arith_step(self.ty));
                self.text.emit(if inc { Op::Add } else { Op::Sub });
                self.emit_store();
                Ok(())
            }
            _ => Err(CompileError::BadExpression { line: self.line }),
        }
    }

    fn id_expr(&mut self) -> PResult<()> {
        let id = self.sym.expect("Id token without a symbol id");
        self.bump();
        if self.tk == Token::Raw(b'(') {
            self.bump();
            let mut argc = 0i64;
            while self.tk != Token::Raw(b')') {
                self.expr(Token::Assign)?;
                self.text.emit(Op::Psh);
                argc += 1;
                if self.tk == Token::Raw(b',') {
                    self.bump();
                }
            }
            self.bump();
            let rec = self.symbols().get(id);
            let (class, val, ty) = (rec.class, rec.val, rec.ty);
            match class {
                Some(Class::Sys) => {
                    self.text.emit_operand(val);
                }
                Some(Class::Fun) => {
                    self.text.emit(Op::Jsr);
                    self.text.emit_operand(val);
                }
                _ => return Err(CompileError::BadFunctionCall { line: self.line }),
            }
            if argc != 0 {
                self.text.emit(Op::Adj);
                self.text.emit_operand(argc);
            }
            self.ty = ty;
            Ok(())
        } else {
            let rec = self.symbols().get(id);
            let (class, val, ty) = (rec.class, rec.val, rec.ty);
            match class {
                Some(Class::Num) => {
                    self.text.emit(Op::Imm);
                    self.text.emit_operand(val);
                    self.ty = INT;
                }
                Some(Class::Loc) => {
                    let offset = self.loc - val;
                    self.ty = ty;
                    self.text.emit(Op::Lea);
                    self.text.emit_operand(offset);
                    self.emit_load();
                }
                Some(Class::Glo) => {
                    self.ty = ty;
                    self.text.emit(Op::Imm);
                    self.text.emit_operand(val);
                    self.emit_load();
                }
                _ => return Err(CompileError::UndefinedVariable { line: self.line }),
            }
            Ok(())
        }
    }

    fn paren_expr(&mut self) -> PResult<()> {
        self.bump();
        if self.tk == Token::Int || self.tk == Token::Char {
            let mut t = if self.tk == Token::Int { INT } else { CHAR };
            self.bump();
            while self.tk == Token::Mul {
                self.bump();
                t = add_ptr(t);
            }
            self.expect_raw(b')', |line| CompileError::BadCast { line })?;
            self.expr(Token::Inc)?;
            self.ty = t;
        } else {
            self.expr(Token::Assign)?;
            self.expect_raw(b')', |line| CompileError::CloseParenExpected { line })?;
        }
        Ok(())
    }

    fn binary_op(&mut self, next_lev: Token, op: Op) -> PResult<()> {
        self.bump();
        self.text.emit(Op::Psh);
        self.expr(next_lev)?;
        self.text.emit(op);
        self.ty = INT;
        Ok(())
    }

    fn binary_op_inc(&mut self, op: Op) -> PResult<()> {
        self.bump();
        self.text.emit(Op::Psh);
        self.expr(Token::Inc)?;
        self.text.emit(op);
        self.ty = INT;
        Ok(())
    }

    fn scale_by_word(&mut self) {
        self.text.emit(Op::Psh);
        self.text.emit(Op::Imm);
        self.text.emit_operand(WORD);
        self.text.emit(Op::Mul);
    }

    fn emit_load(&mut self) {
        self.text.emit(if self.ty == CHAR { Op::Lc } else { Op::Li });
    }

    fn emit_store(&mut self) {
        self.text.emit(if self.ty == CHAR { Op::Sc } else { Op::Si });
    }

    /// Rewrites a trailing `LC`/`LI` load into a `PSH` of its address,
    /// leaving the address on the stack for a subsequent store. Used by
    /// `=` and prefix `++`/`--` (which additionally re-emit the load; see
    /// [`Self::convert_last_load_and_redup`]).
    fn convert_last_load_or(
        &mut self,
        err: impl FnOnce(u32) -> CompileError,
    ) -> PResult<()> {
        match self.text.last() {
            Some(op) if is_load(op) => {
                self.text.set_last(Op::Psh.code());
                Ok(())
            }
            _ => Err(err(self.line)),
        }
    }

    /// As above, but also re-emits the load it just suppressed — pre/post
    /// `++`/`--` need both the address (to store back through) and the
    /// current value (to add/subtract from).
    fn convert_last_load_and_redup(
        &mut self,
        err: impl FnOnce(u32) -> CompileError,
    ) -> PResult<()> {
        match self.text.last() {
            Some(op) if op == Op::Lc.code() => {
                self.text.set_last(Op::Psh.code());
                self.text.emit(Op::Lc);
                Ok(())
            }
            Some(op) if op == Op::Li.code() => {
                self.text.set_last(Op::Psh.code());
                self.text.emit(Op::Li);
                Ok(())
            }
            _ => Err(err(self.line)),
        }
    }
}
