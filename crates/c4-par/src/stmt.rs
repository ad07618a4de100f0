//! The statement parser, transcribed from the source compiler's `stmt()`.

use c4_codegen::Op;
use c4_lex::Token;

use crate::error::CompileError;
use crate::{PResult, Parser};

impl<'src, 'sym> Parser<'src, 'sym> {
    pub(crate) fn stmt(&mut self) -> PResult<()> {
        match self.tk {
            Token::If => {
                self.bump();
                self.expect_raw(b'(', |line| CompileError::OpenParenExpected { line })?;
                self.expr(Token::Assign)?;
                self.expect_raw(b')', |line| CompileError::CloseParenExpected { line })?;
                self.text.emit(Op::Bz);
                let mut patch_target = self.text.emit_operand(0);
                self.stmt()?;
                if self.tk == Token::Else {
                    self.text.emit(Op::Jmp);
                    let else_hole = self.text.emit_operand(0);
                    self.patch_here(patch_target);
                    patch_target = else_hole;
                    self.bump();
                    self.stmt()?;
                }
                self.patch_here(patch_target);
                Ok(())
            }
            Token::While => {
                self.bump();
                let loop_top = self.text.here();
                self.expect_raw(b'(', |line| CompileError::OpenParenExpected { line })?;
                self.expr(Token::Assign)?;
                self.expect_raw(b')', |line| CompileError::CloseParenExpected { line })?;
                self.text.emit(Op::Bz);
                let exit_hole = self.text.emit_operand(0);
                self.stmt()?;
                self.text.emit(Op::Jmp);
                self.text.emit_operand(loop_top.as_u32() as i64);
                self.patch_here(exit_hole);
                Ok(())
            }
            Token::Return => {
                self.bump();
                if self.tk != Token::Raw(b';') {
                    self.expr(Token::Assign)?;
                }
                self.text.emit(Op::Lev);
                self.expect_raw(b';', |line| CompileError::SemicolonExpected { line })
            }
            Token::Raw(b'{') => {
                self.bump();
                while self.tk != Token::Raw(b'}') {
                    self.stmt()?;
                }
                self.bump();
                Ok(())
            }
            Token::Raw(b';') => {
                self.bump();
                Ok(())
            }
            _ => {
                self.expr(Token::Assign)?;
                self.expect_raw(b';', |line| CompileError::SemicolonExpected { line })
            }
        }
    }
}
