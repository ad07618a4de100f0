//! A fixed-capacity, zero-initialized block of real process memory.
//!
//! The data segment and the VM's own operand stack both need this: their
//! addresses are loaded into the accumulator and dereferenced by `LC`/`LI`/
//! `SC`/`SI` exactly like any other pointer value the compiled program
//! computes, so they have to be real, comparable, dereferenceable
//! addresses — not indices into a `Vec` that would need translating back
//! and forth every time a pointer crosses an arena boundary. This mirrors
//! the original tool's `data = malloc(poolsz)` / `sp = malloc(poolsz)`
//! directly (spec.md §9, "Unified arena pointers as integers"): two
//! separate host allocations, each independently bounds-checked, so a
//! stray pointer can wander off the end of one arena without silently
//! reading into another. The code segment does not need this treatment —
//! nothing in the language takes the address of a function and
//! dereferences it, so `c4-codegen::TextSegment` stays a plain `Vec<i64>`
//! indexed by [`crate::CodeAddr`].
//!
//! The block is carved out of a [`bumpalo::Bump`], the same arena
//! allocator `faxc-util` already uses for its string table, rather than
//! calling into `libc`/`std::alloc` directly: bumpalo guarantees the
//! returned bytes never move or get freed until the `Bump` itself drops,
//! which is exactly the "allocated once, lives for the whole process"
//! lifecycle spec.md §3 describes.

use bumpalo::Bump;

pub struct RawArena {
    // Kept alive only to own the backing allocation; never allocated from
    // again after `new`.
    _bump: Bump,
    base: *mut u8,
    cap: usize,
}

impl RawArena {
    pub fn new(cap: usize) -> Self {
        let bump = Bump::with_capacity(cap.max(1));
        let slice = bump.alloc_slice_fill_copy(cap.max(1), 0u8);
        let base = slice.as_mut_ptr();
        Self {
            _bump: bump,
            base,
            cap,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn base_addr(&self) -> i64 {
        self.base as i64
    }

    /// True iff `addr` falls within `[base, base + cap)`. Used by the VM to
    /// bounds-check loads/stores before they touch raw memory.
    pub fn contains(&self, addr: i64) -> bool {
        let start = self.base as i64;
        addr >= start && addr < start + self.cap as i64
    }

    pub fn as_mut_ptr(&self) -> *mut u8 {
        self.base
    }
}

// RawArena owns its allocation exclusively and is only ever accessed
// through one compiler/VM instance at a time.
unsafe impl Send for RawArena {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_arena_is_zeroed() {
        let arena = RawArena::new(64);
        let bytes = unsafe { std::slice::from_raw_parts(arena.as_mut_ptr(), 64) };
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn contains_respects_bounds() {
        let arena = RawArena::new(16);
        let start = arena.base_addr();
        assert!(arena.contains(start));
        assert!(arena.contains(start + 15));
        assert!(!arena.contains(start - 1));
        assert!(!arena.contains(start + 16));
    }
}
