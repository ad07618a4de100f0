//! Top-level declarations: enums, globals, and function definitions,
//! transcribed from the declaration-parsing half of the source compiler's
//! `main()`.

use c4_codegen::Op;
use c4_lex::Token;
use c4_util::{add_ptr, Class, CHAR, INT};

use crate::error::CompileError;
use crate::{PResult, Parser};

impl<'src, 'sym> Parser<'src, 'sym> {
    pub(crate) fn parse_global_decl(&mut self) -> PResult<()> {
        let mut base_ty = INT;
        if self.tk == Token::Int {
            self.bump();
        } else if self.tk == Token::Char {
            self.bump();
            base_ty = CHAR;
        } else if self.tk == Token::Enum {
            self.parse_enum()?;
        }

        while self.tk != Token::Raw(b';') && self.tk != Token::Raw(b'}') {
            let mut ty = base_ty;
            while self.tk == Token::Mul {
                self.bump();
                ty = add_ptr(ty);
            }
            let id = match self.current_sym() {
                Some(id) => id,
                None => return Err(CompileError::BadGlobalDeclaration { line: self.line }),
            };
            if self.class_of(id).is_some() {
                return Err(CompileError::DuplicateGlobalDefinition { line: self.line });
            }
            self.bump();
            self.symbols_mut().get_mut(id).ty = ty;

            if self.tk == Token::Raw(b'(') {
                self.parse_function(id)?;
            } else {
                let addr = self.data.reserve_word();
                let rec = self.symbols_mut().get_mut(id);
                rec.class = Some(Class::Glo);
                rec.val = addr;
            }
            if self.tk == Token::Raw(b',') {
                self.bump();
            }
        }
        self.bump();
        Ok(())
    }

    fn parse_enum(&mut self) -> PResult<()> {
        self.bump();
        if self.tk != Token::Raw(b'{') {
            self.bump();
        }
        if self.tk == Token::Raw(b'{') {
            self.bump();
            let mut value: i64 = 0;
            while self.tk != Token::Raw(b'}') {
                let id = match self.current_sym() {
                    Some(id) => id,
                    None => {
                        return Err(CompileError::BadEnumIdentifier {
                            line: self.line,
                            tk: self.tk.code(),
                        })
                    }
                };
                self.bump();
                if self.tk == Token::Assign {
                    self.bump();
                    if self.tk != Token::Num {
                        return Err(CompileError::BadEnumInitializer { line: self.line });
                    }
                    value = self.ival;
                    self.bump();
                }
                let rec = self.symbols_mut().get_mut(id);
                rec.class = Some(Class::Num);
                rec.ty = INT;
                rec.val = value;
                value += 1;
                if self.tk == Token::Raw(b',') {
                    self.bump();
                }
            }
            self.bump();
        }
        Ok(())
    }

    fn parse_function(&mut self, id: c4_util::SymId) -> PResult<()> {
        let name = self.symbols().get(id).name.clone();
        let entry = self.text.here().as_u32() as i64;
        {
            let rec = self.symbols_mut().get_mut(id);
            rec.class = Some(Class::Fun);
            rec.val = entry;
        }

        self.bump();
        let mut i: i64 = 0;
        while self.tk != Token::Raw(b')') {
            let mut param_ty = INT;
            if self.tk == Token::Int {
                self.bump();
            } else if self.tk == Token::Char {
                self.bump();
                param_ty = CHAR;
            }
            while self.tk == Token::Mul {
                self.bump();
                param_ty = add_ptr(param_ty);
            }
            let pid = match self.current_sym() {
                Some(pid) => pid,
                None => return Err(CompileError::BadParameterDeclaration { line: self.line }),
            };
            if self.class_of(pid) == Some(Class::Loc) {
                return Err(CompileError::DuplicateParameterDefinition { line: self.line });
            }
            self.symbols_mut().shadow(pid, param_ty, i);
            i += 1;
            self.bump();
            if self.tk == Token::Raw(b',') {
                self.bump();
            }
        }
        self.bump();
        if self.tk != Token::Raw(b'{') {
            return Err(CompileError::BadFunctionDefinition { line: self.line });
        }
        self.bump();

        i += 1;
        self.loc = i;

        while self.tk == Token::Int || self.tk == Token::Char {
            let local_base_ty = if self.tk == Token::Int { INT } else { CHAR };
            self.bump();
            while self.tk != Token::Raw(b';') {
                let mut local_ty = local_base_ty;
                while self.tk == Token::Mul {
                    self.bump();
                    local_ty = add_ptr(local_ty);
                }
                let lid = match self.current_sym() {
                    Some(lid) => lid,
                    None => return Err(CompileError::BadLocalDeclaration { line: self.line }),
                };
                if self.class_of(lid) == Some(Class::Loc) {
                    return Err(CompileError::DuplicateLocalDefinition { line: self.line });
                }
                i += 1;
                self.symbols_mut().shadow(lid, local_ty, i);
                self.bump();
                if self.tk == Token::Raw(b',') {
                    self.bump();
                }
            }
            self.bump();
        }

        self.text.emit(Op::Ent);
        self.text.emit_operand(i - self.loc);
        while self.tk != Token::Raw(b'}') {
            self.stmt()?;
        }
        self.text.emit(Op::Lev);
        self.symbols_mut().unshadow_all();

        if name == "main" {
            self.main = Some(id);
        }
        Ok(())
    }
}
