//! c4-codegen — the instruction set and the two segments code generation
//! writes into.
//!
//! This crate owns no compiler logic of its own (that's `c4-par`, which
//! emits directly into these segments as it parses); it is the shared
//! target the parser and the VM both agree on, the same way `faxc-lir`
//! is the shared target between `faxc-gen` and the rest of the Fax
//! pipeline.

mod op;
mod segment;

pub use op::Op;
pub use segment::{DataSegment, TextSegment};
