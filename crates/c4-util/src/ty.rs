//! Element types, encoded the way the source compiler encodes them: as a
//! base type plus a pointer-depth increment, not a tagged variant.
//!
//! `ty > INT` asks "is this a pointer"; `ty > PTR` asks "is this a pointer
//! to a pointer" (the level at which indexing scales by a full word instead
//! of by the base element size). Both idioms are load-bearing for the
//! array-indexing edge case preserved from the original tool (see
//! `c4-par::expr`), so the arithmetic encoding is kept exactly as specified
//! rather than rewritten as `enum Ty { Char, Int, Ptr(Box<Ty>) }`.

/// An element type: `CHAR`, `INT`, or `INT + k * PTR` for a k-level pointer.
pub type Ty = i32;

pub const CHAR: Ty = 0;
pub const INT: Ty = 1;
pub const PTR: Ty = 2;

/// One machine word, used wherever the source scales by `sizeof(int)`.
pub const WORD: i64 = 8;

/// The step pointer arithmetic, `++`/`--`, and array indexing advance by:
/// `sizeof(int)` (one word) if `ty` is a pointer whose pointee is itself
/// word-sized (`is_ptr_to_ptr`), `sizeof(char)` (one byte) otherwise —
/// which covers plain `char`, plain `int` (incrementing `i` by literal `1`),
/// *and* `char*` (whose pointee is one byte). This single threshold is also
/// what produces the documented array-indexing quirk: `char *s; s[i]` does
/// not scale, `char **ss; ss[i]` does.
pub fn arith_step(ty: Ty) -> i64 {
    if is_ptr_to_ptr(ty) {
        WORD
    } else {
        1
    }
}

pub fn is_ptr(ty: Ty) -> bool {
    ty > INT
}

/// True for `char **`, `int **`, ... — the level at which the pointed-to
/// element is itself word-sized, so index scaling switches to `sizeof(int)`
/// regardless of the base element type (see spec's documented array-index
/// edge case).
pub fn is_ptr_to_ptr(ty: Ty) -> bool {
    ty > PTR
}

pub fn add_ptr(ty: Ty) -> Ty {
    ty + PTR
}

pub fn deref(ty: Ty) -> Ty {
    ty - PTR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_depth_is_additive() {
        let char_ptr = add_ptr(CHAR);
        let char_ptr_ptr = add_ptr(char_ptr);
        assert!(is_ptr(char_ptr));
        assert!(!is_ptr_to_ptr(char_ptr));
        assert!(is_ptr_to_ptr(char_ptr_ptr));
    }

    #[test]
    fn arith_step_scales_only_past_the_ptr_threshold() {
        assert_eq!(arith_step(CHAR), 1);
        assert_eq!(arith_step(INT), 1, "plain int increments by literal 1");
        assert_eq!(arith_step(add_ptr(CHAR)), 1, "char* steps by one byte");
        assert_eq!(arith_step(add_ptr(INT)), WORD, "int* steps by one word");
        assert_eq!(arith_step(add_ptr(add_ptr(CHAR))), WORD, "char** steps by one word");
    }
}
