//! The stack machine itself: registers, the fetch/decode/execute loop, and
//! the `-d` instruction trace, transcribed from the source compiler's
//! `while (1) { i = *pc++; ... }` loop.

use c4_codegen::Op;
use c4_util::{RawArena, WORD};

use crate::error::VmError;
use crate::syscalls;

/// How the program run ended. Only one way at the moment — `EXIT` — since
/// running off the end of `text` without hitting it is a logic error in
/// whatever emitted the bytecode, not a case the VM itself recovers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmOutcome {
    pub exit_code: i64,
}

/// Renders an opcode the way both the `-d` trace and the `-s` listing do:
/// the mnemonic left-padded to four columns, matching the source's
/// `"LEA ,IMM ,..."` table sliced with `%.4s`.
pub fn mnemonic4(op: Op) -> String {
    format!("{:<4}", op.mnemonic())
}

unsafe fn read_word(addr: i64) -> i64 {
    *(addr as *const i64)
}

unsafe fn write_word(addr: i64, value: i64) {
    *(addr as *mut i64) = value;
}

unsafe fn read_byte(addr: i64) -> i8 {
    *(addr as *const i8)
}

unsafe fn write_byte(addr: i64, value: i8) {
    *(addr as *mut i8) = value;
}

/// The VM's registers plus the two segments it executes against: `text`
/// (code, indexed by plain `pc` offsets rather than raw pointers — see
/// spec.md §9's "unified arena pointers" redesign note) and its own
/// stack, a real host allocation `LEA`/`LI`/`LC`/`SI`/`SC` dereference
/// exactly like any address a compiled program computes.
pub struct Vm {
    text: Vec<i64>,
    stack: RawArena,
    pc: usize,
    bp: i64,
    sp: i64,
    a: i64,
    cycle: u64,
    debug: bool,
}

impl Vm {
    /// `main_entry` is the `CodeAddr` the parser recorded for `main`
    /// (`c4_util::SymRecord::val` with `class == Fun`). A two-instruction
    /// `PSH; EXIT` trampoline is appended to `text` and its address is
    /// planted as the synthetic return address `main`'s own `LEV` will pop
    /// — the Rust-native stand-in for the source's trick of parking those
    /// same two opcodes as data words atop its stack (not reproducible
    /// here, since this implementation's code addresses are `text`
    /// indices rather than raw pointers that can alias stack memory; see
    /// DESIGN.md).
    pub fn new(mut text: Vec<i64>, main_entry: i64, stack_capacity: usize, debug: bool) -> Self {
        let trampoline = text.len() as i64;
        text.push(Op::Psh.code());
        text.push(Op::Exit.code());

        let stack = RawArena::new(stack_capacity);
        let top = stack.base_addr() + stack_capacity as i64;
        let bp = top;
        let mut sp = top;

        // Mirrors the source's manual pre-`main` stack setup (minus the
        // two data words the trampoline above replaces): argc, then argv,
        // then the synthetic return address, pushed in that order so the
        // return address ends up nearest the top — exactly where a real
        // `JSR` into `main` would have left it for `main`'s own `ENT` to
        // sit on top of. Compiled programs never see real command-line
        // arguments here (c4-drv's CLI has none to forward); both are 0.
        sp -= WORD;
        unsafe { write_word(sp, 0) }; // argc
        sp -= WORD;
        unsafe { write_word(sp, 0) }; // argv
        sp -= WORD;
        unsafe { write_word(sp, trampoline) }; // synthetic return address

        Self {
            text,
            stack,
            pc: main_entry as usize,
            bp,
            sp,
            a: 0,
            cycle: 0,
            debug,
        }
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Runs until `EXIT`, which is the only way this VM ever returns
    /// normally — there is no other instruction that halts the loop.
    pub fn run(&mut self) -> Result<VmOutcome, VmError> {
        loop {
            if let Some(outcome) = self.step()? {
                return Ok(outcome);
            }
        }
    }

    fn fetch_operand(&mut self) -> i64 {
        let v = self.text[self.pc];
        self.pc += 1;
        v
    }

    fn push(&mut self, value: i64) {
        self.sp -= WORD;
        assert!(self.stack.contains(self.sp), "vm stack overflow");
        unsafe { write_word(self.sp, value) };
    }

    fn pop(&mut self) -> i64 {
        let value = unsafe { read_word(self.sp) };
        self.sp += WORD;
        value
    }

    fn peek(&self) -> i64 {
        unsafe { read_word(self.sp) }
    }

    fn step(&mut self) -> Result<Option<VmOutcome>, VmError> {
        let word = self.text[self.pc];
        self.pc += 1;
        self.cycle += 1;
        let op = Op::from_i64(word).ok_or(VmError::UnknownInstruction {
            opcode: word,
            cycle: self.cycle,
        })?;

        if self.debug {
            print!("{}> {}", self.cycle, mnemonic4(op));
            if op.has_operand() {
                println!(" {}", self.text[self.pc]);
            } else {
                println!();
            }
        }

        match op {
            Op::Lea => {
                let n = self.fetch_operand();
                self.a = self.bp + n * WORD;
            }
            Op::Imm => self.a = self.fetch_operand(),
            Op::Jmp => self.pc = self.fetch_operand() as usize,
            Op::Jsr => {
                let target = self.fetch_operand();
                let return_addr = self.pc as i64;
                self.push(return_addr);
                self.pc = target as usize;
            }
            Op::Bz => {
                let target = self.fetch_operand();
                if self.a == 0 {
                    self.pc = target as usize;
                }
            }
            Op::Bnz => {
                let target = self.fetch_operand();
                if self.a != 0 {
                    self.pc = target as usize;
                }
            }
            Op::Ent => {
                let n = self.fetch_operand();
                self.push(self.bp);
                self.bp = self.sp;
                self.sp -= n * WORD;
            }
            Op::Adj => {
                let n = self.fetch_operand();
                self.sp += n * WORD;
            }
            Op::Lev => {
                self.sp = self.bp;
                self.bp = self.pop();
                self.pc = self.pop() as usize;
            }
            Op::Li => self.a = unsafe { read_word(self.a) },
            Op::Lc => self.a = unsafe { read_byte(self.a) as i64 },
            Op::Si => {
                let addr = self.pop();
                unsafe { write_word(addr, self.a) };
            }
            Op::Sc => {
                let addr = self.pop();
                let byte = self.a as i8;
                unsafe { write_byte(addr, byte) };
                self.a = byte as i64;
            }
            Op::Psh => self.push(self.a),
            Op::Or => self.a = self.pop() | self.a,
            Op::Xor => self.a = self.pop() ^ self.a,
            Op::And => self.a = self.pop() & self.a,
            Op::Eq => self.a = (self.pop() == self.a) as i64,
            Op::Ne => self.a = (self.pop() != self.a) as i64,
            Op::Lt => self.a = (self.pop() < self.a) as i64,
            Op::Gt => self.a = (self.pop() > self.a) as i64,
            Op::Le => self.a = (self.pop() <= self.a) as i64,
            Op::Ge => self.a = (self.pop() >= self.a) as i64,
            Op::Shl => self.a = self.pop() << self.a,
            Op::Shr => self.a = self.pop() >> self.a,
            Op::Add => self.a = self.pop() + self.a,
            Op::Sub => self.a = self.pop() - self.a,
            Op::Mul => self.a = self.pop() * self.a,
            Op::Div => self.a = self.pop() / self.a,
            Op::Mod => self.a = self.pop() % self.a,
            Op::Open => self.a = unsafe { syscalls::open(self.sp) },
            Op::Read => self.a = unsafe { syscalls::read(self.sp) },
            Op::Clos => self.a = unsafe { syscalls::close(self.sp) },
            Op::Prtf => {
                let argc = self.text[self.pc + 1];
                self.a = unsafe { syscalls::printf(self.sp, argc) };
            }
            Op::Malc => self.a = unsafe { syscalls::malloc(self.sp) },
            Op::Free => unsafe { syscalls::free(self.sp) },
            Op::Mset => self.a = unsafe { syscalls::memset(self.sp) },
            Op::Mcmp => self.a = unsafe { syscalls::memcmp(self.sp) },
            Op::Exit => {
                let code = self.peek();
                println!("exit({}) cycle = {}", code, self.cycle);
                return Ok(Some(VmOutcome { exit_code: code }));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use c4_codegen::TextSegment;

    fn build(emit: impl FnOnce(&mut TextSegment)) -> Vec<i64> {
        let mut text = TextSegment::new();
        emit(&mut text);
        text.as_slice().to_vec()
    }

    #[test]
    fn arithmetic_program_exits_with_computed_value() {
        // return 2 + 3 * 4;
        let text = build(|t| {
            t.emit(Op::Ent);
            t.emit_operand(0);
            t.emit(Op::Imm);
            t.emit_operand(2);
            t.emit(Op::Psh);
            t.emit(Op::Imm);
            t.emit_operand(3);
            t.emit(Op::Psh);
            t.emit(Op::Imm);
            t.emit_operand(4);
            t.emit(Op::Mul);
            t.emit(Op::Add);
            t.emit(Op::Lev);
        });
        let mut vm = Vm::new(text, 0, 4096, false);
        let outcome = vm.run().unwrap();
        assert_eq!(outcome.exit_code, 14);
    }

    #[test]
    fn while_loop_counts_to_five() {
        // int i = 0; while (i < 5) i = i + 1; return i;
        // locals: i at frame offset -1 (ENT 1)
        let text = build(|t| {
            t.emit(Op::Ent);
            t.emit_operand(1);
            // i = 0
            t.emit(Op::Imm);
            t.emit_operand(0);
            t.emit(Op::Psh);
            t.emit(Op::Lea);
            t.emit_operand(-1);
            t.emit(Op::Si);
            let loop_top = t.here();
            t.emit(Op::Lea);
            t.emit_operand(-1);
            t.emit(Op::Li);
            t.emit(Op::Psh);
            t.emit(Op::Imm);
            t.emit_operand(5);
            t.emit(Op::Lt);
            t.emit(Op::Bz);
            let exit_hole = t.emit_operand(0);
            t.emit(Op::Lea);
            t.emit_operand(-1);
            t.emit(Op::Li);
            t.emit(Op::Psh);
            t.emit(Op::Imm);
            t.emit_operand(1);
            t.emit(Op::Add);
            t.emit(Op::Psh);
            t.emit(Op::Lea);
            t.emit_operand(-1);
            t.emit(Op::Si);
            t.emit(Op::Jmp);
            t.emit_operand(loop_top.as_u32() as i64);
            let exit_addr = t.here().as_u32() as i64;
            t.patch(exit_hole, exit_addr);
            t.emit(Op::Lea);
            t.emit_operand(-1);
            t.emit(Op::Li);
            t.emit(Op::Lev);
        });
        let mut vm = Vm::new(text, 0, 4096, false);
        let outcome = vm.run().unwrap();
        assert_eq!(outcome.exit_code, 5);
    }

    #[test]
    fn unknown_opcode_is_reported_with_cycle_count() {
        let text = vec![999];
        let mut vm = Vm::new(text, 0, 4096, false);
        let err = vm.run().unwrap_err();
        assert_eq!(err, VmError::UnknownInstruction { opcode: 999, cycle: 1 });
    }

    #[test]
    fn mnemonics_are_left_padded_to_four_columns() {
        assert_eq!(mnemonic4(Op::Lea), "LEA ");
        assert_eq!(mnemonic4(Op::Open), "OPEN");
    }
}
