//! The instruction set.
//!
//! Enumeration order matters: opcodes from `Lea` through `Adj` are exactly
//! the ones followed by an inline operand word (see [`Op::has_operand`]),
//! and the VM's `i <= ADJ` disassembly check (`c4-vm`) is expressed the
//! same way here, as an ordinal comparison over this enum rather than a
//! hand-maintained set.

/// One bytecode instruction. `#[repr(i64)]` so a decoded text-segment word
/// converts back with a single `transmute`-free match in [`Op::from_i64`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i64)]
pub enum Op {
    Lea = 0,
    Imm,
    Jmp,
    Jsr,
    Bz,
    Bnz,
    Ent,
    Adj,
    Lev,
    Li,
    Lc,
    Si,
    Sc,
    Psh,
    Or,
    Xor,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Open,
    Read,
    Clos,
    Prtf,
    Malc,
    Free,
    Mset,
    Mcmp,
    Exit,
}

impl Op {
    /// Opcodes `Lea..=Adj` carry one inline operand word; everything else
    /// (including `Lev`, which has none) does not.
    pub fn has_operand(self) -> bool {
        (self as i64) <= (Op::Adj as i64)
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn from_i64(v: i64) -> Option<Op> {
        const TABLE: &[Op] = &[
            Op::Lea, Op::Imm, Op::Jmp, Op::Jsr, Op::Bz, Op::Bnz, Op::Ent, Op::Adj, Op::Lev,
            Op::Li, Op::Lc, Op::Si, Op::Sc, Op::Psh,
            Op::Or, Op::Xor, Op::And, Op::Eq, Op::Ne, Op::Lt, Op::Gt, Op::Le, Op::Ge,
            Op::Shl, Op::Shr, Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Mod,
            Op::Open, Op::Read, Op::Clos, Op::Prtf, Op::Malc, Op::Free, Op::Mset, Op::Mcmp, Op::Exit,
        ];
        usize::try_from(v).ok().and_then(|i| TABLE.get(i)).copied()
    }

    /// Mnemonic, upper-cased, as printed by the `-s`/`-d` listings.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Lea => "LEA",
            Op::Imm => "IMM",
            Op::Jmp => "JMP",
            Op::Jsr => "JSR",
            Op::Bz => "BZ",
            Op::Bnz => "BNZ",
            Op::Ent => "ENT",
            Op::Adj => "ADJ",
            Op::Lev => "LEV",
            Op::Li => "LI",
            Op::Lc => "LC",
            Op::Si => "SI",
            Op::Sc => "SC",
            Op::Psh => "PSH",
            Op::Or => "OR",
            Op::Xor => "XOR",
            Op::And => "AND",
            Op::Eq => "EQ",
            Op::Ne => "NE",
            Op::Lt => "LT",
            Op::Gt => "GT",
            Op::Le => "LE",
            Op::Ge => "GE",
            Op::Shl => "SHL",
            Op::Shr => "SHR",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Mod => "MOD",
            Op::Open => "OPEN",
            Op::Read => "READ",
            Op::Clos => "CLOS",
            Op::Prtf => "PRTF",
            Op::Malc => "MALC",
            Op::Free => "FREE",
            Op::Mset => "MSET",
            Op::Mcmp => "MCMP",
            Op::Exit => "EXIT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operand_set_matches_spec_boundary() {
        assert!(Op::Lea.has_operand());
        assert!(Op::Adj.has_operand());
        assert!(!Op::Lev.has_operand());
        assert!(!Op::Psh.has_operand());
        assert!(!Op::Exit.has_operand());
    }

    #[test]
    fn round_trips_through_code() {
        for op in [Op::Lea, Op::Prtf, Op::Exit, Op::Mod] {
            assert_eq!(Op::from_i64(op.code()), Some(op));
        }
    }
}
