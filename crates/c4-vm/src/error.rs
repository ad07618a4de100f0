//! The one runtime failure the VM can report.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VmError {
    /// A fetched word did not decode to any [`c4_codegen::Op`]. The source
    /// compiler's loop falls off the end of its `if`/`else if` chain and
    /// prints `"unknown instruction = %d! cycle = %d\n"` before returning
    /// `-1`; this mirrors that wording so a driver can just print it.
    #[error("unknown instruction = {opcode}! cycle = {cycle}")]
    UnknownInstruction { opcode: i64, cycle: u64 },
}
