//! c4-util — shared arenas, the symbol table, and the type encoding used by
//! every other crate in this workspace.
//!
//! This is the `faxc-util` equivalent: one foundation crate with no
//! dependency on any other crate here, holding exactly the things the
//! lexer, parser, codegen, and VM all need to agree on.

mod arena;
mod index;
mod symbol;
mod ty;

pub use arena::RawArena;
pub use index::{CodeAddr, DataAddr, Idx, IndexVec, SymId};
pub use symbol::{fingerprint, Class, SymRecord, SymbolTable};
pub use ty::{add_ptr, arith_step, deref, is_ptr, is_ptr_to_ptr, Ty, CHAR, INT, PTR, WORD};
