//! The symbol table: one flat, append-only `IndexVec` of fixed-shape
//! records, linear-probed by walking from the start until a match or the
//! end of the table (see spec.md §3's "Symbol table" invariants).
//!
//! There is deliberately no `HashMap<String, SymId>` shortcut here: the
//! scan-and-compare-by-(hash, bytes) walk *is* the specified lookup
//! algorithm (it is also what makes the symbol-uniqueness property in
//! spec.md §8 meaningful to test), not an implementation detail to
//! optimize away.

use crate::index::{IndexVec, SymId};
use crate::ty::Ty;

/// What a symbol-table entry currently denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// An `enum` constant.
    Num,
    /// A user-defined function.
    Fun,
    /// A built-in (host syscall), `Val` holds its opcode.
    Sys,
    /// A global variable, `Val` holds its data-segment address.
    Glo,
    /// A local variable or parameter, `Val` holds its frame-relative index.
    Loc,
}

/// One symbol-table record.
///
/// `h_class`/`h_ty`/`h_val` are the shadow slots: when a global name is
/// reused as a parameter or local, the outer `class`/`ty`/`val` are copied
/// here and restored when the enclosing function closes (see
/// [`SymbolTable::shadow`] / [`SymbolTable::unshadow_all`]).
#[derive(Clone, Debug)]
pub struct SymRecord {
    pub tk: u16,
    pub hash: u64,
    pub name: String,
    pub class: Option<Class>,
    pub ty: Ty,
    pub val: i64,
    h_class: Option<Class>,
    h_ty: Ty,
    h_val: i64,
}

impl SymRecord {
    fn fresh(name: &str, hash: u64, tk: u16) -> Self {
        Self {
            tk,
            hash,
            name: name.to_string(),
            class: None,
            ty: 0,
            val: 0,
            h_class: None,
            h_ty: 0,
            h_val: 0,
        }
    }
}

/// Fingerprint an identifier the way the source compiler does:
/// `hash = Σ prev·147 + ch`, then folded with the length as
/// `(hash << 6) + length`.
pub fn fingerprint(name: &str) -> u64 {
    let mut hash: u64 = 0;
    for &b in name.as_bytes() {
        hash = hash.wrapping_mul(147).wrapping_add(b as u64);
    }
    (hash << 6).wrapping_add(name.len() as u64)
}

#[derive(Default)]
pub struct SymbolTable {
    records: IndexVec<SymId, SymRecord>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SymId) -> &SymRecord {
        self.records.get(id).expect("dangling SymId")
    }

    pub fn get_mut(&mut self, id: SymId) -> &mut SymRecord {
        self.records.get_mut(id).expect("dangling SymId")
    }

    /// Look up `name`, appending a fresh record (with `tk = default_tk`) if
    /// it has never been seen before. Two identifiers collide (and share a
    /// `SymId`) iff their `(hash, length)` pair and their bytes both match.
    pub fn lookup_or_insert(&mut self, name: &str, default_tk: u16) -> SymId {
        let hash = fingerprint(name);
        for (id, rec) in self.records.iter_enumerated() {
            if rec.hash == hash && rec.name == name {
                return id;
            }
        }
        self.records.push(SymRecord::fresh(name, hash, default_tk))
    }

    /// Seed a keyword (`int`, `if`, `while`, ...): the record's `tk` is
    /// overwritten with the keyword's own token code.
    pub fn seed_keyword(&mut self, name: &str, tk: u16) -> SymId {
        let id = self.lookup_or_insert(name, tk);
        self.get_mut(id).tk = tk;
        id
    }

    /// Seed a built-in syscall (`open`, `printf`, ...): `tk` stays `Id`,
    /// but `class`/`ty`/`val` are populated immediately, exactly as the
    /// original compiler's builtin-seeding loop does (it never touches
    /// `id[Tk]`, only `id[Class]`, `id[Type]`, `id[Val]`).
    pub fn seed_builtin(&mut self, name: &str, id_tk: u16, opcode: i64) -> SymId {
        let id = self.lookup_or_insert(name, id_tk);
        let rec = self.get_mut(id);
        rec.class = Some(Class::Sys);
        rec.ty = crate::ty::INT;
        rec.val = opcode;
        id
    }

    /// Save the current `class`/`ty`/`val` into the shadow slots and
    /// install a local/parameter binding in their place.
    pub fn shadow(&mut self, id: SymId, ty: Ty, val: i64) {
        let rec = self.get_mut(id);
        rec.h_class = rec.class;
        rec.h_ty = rec.ty;
        rec.h_val = rec.val;
        rec.class = Some(Class::Loc);
        rec.ty = ty;
        rec.val = val;
    }

    /// Restore every shadowed record's outer binding. Called once at the
    /// close of each function body; afterwards no record's `class` is
    /// `Loc` (spec.md §8's "shadow restoration" invariant).
    pub fn unshadow_all(&mut self) {
        for rec in self.records.iter_mut() {
            if rec.class == Some(Class::Loc) {
                rec.class = rec.h_class;
                rec.ty = rec.h_ty;
                rec.val = rec.h_val;
                rec.h_class = None;
                rec.h_ty = 0;
                rec.h_val = 0;
            }
        }
    }

    pub fn has_any_local(&self) -> bool {
        self.records.iter().any(|r| r.class == Some(Class::Loc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_identifiers_get_distinct_ids() {
        let mut table = SymbolTable::new();
        let a = table.lookup_or_insert("foo", 1);
        let b = table.lookup_or_insert("bar", 1);
        let c = table.lookup_or_insert("foo", 1);
        assert_ne!(a, b);
        assert_eq!(a, c, "re-interning the same name returns the same id");
    }

    #[test]
    fn hash_collision_is_broken_by_byte_compare() {
        // Two different names that happen to hash alike must still resolve
        // to two different records — we don't know of a natural collision
        // for this fold, so exercise the invariant directly via lookup.
        let mut table = SymbolTable::new();
        let a = table.lookup_or_insert("ab", 1);
        let b = table.lookup_or_insert("ba", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn shadow_and_restore_round_trips_outer_binding() {
        let mut table = SymbolTable::new();
        let id = table.lookup_or_insert("x", 1);
        {
            let rec = table.get_mut(id);
            rec.class = Some(Class::Glo);
            rec.ty = crate::ty::INT;
            rec.val = 4096;
        }
        table.shadow(id, crate::ty::CHAR, 0);
        assert_eq!(table.get(id).class, Some(Class::Loc));

        table.unshadow_all();
        assert!(!table.has_any_local());
        let rec = table.get(id);
        assert_eq!(rec.class, Some(Class::Glo));
        assert_eq!(rec.val, 4096);
    }

    #[test]
    fn builtin_seed_keeps_id_token_class() {
        let mut table = SymbolTable::new();
        let id = table.seed_builtin("printf", 1, 42);
        let rec = table.get(id);
        assert_eq!(rec.tk, 1, "builtins never get their Tk overwritten");
        assert_eq!(rec.class, Some(Class::Sys));
        assert_eq!(rec.val, 42);
    }
}
