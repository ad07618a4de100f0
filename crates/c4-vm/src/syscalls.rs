//! Host syscalls exposed to compiled programs, one function per `Op::Open
//! ..= Op::Exit` opcode.
//!
//! Each is handed `sp`, the VM's current stack-pointer address, and reads
//! its arguments as `sp[0]`, `sp[1]`, ... — the reversed, stack-top-first
//! order `c4-par::expr::id_expr` pushes call arguments in (see
//! `original_source/c4_annotated.c`'s own `sp[1]`/`sp[2]` indexing for
//! `open`/`read`). Nothing here validates that the addresses a compiled
//! program passes in are actually valid: the source VM trusts them
//! unconditionally and so does this one.

use c4_util::WORD;
use libc::c_void;

/// Reads the stack slot `n` words above `sp` (`sp[0]` is the top of stack).
unsafe fn arg(sp: i64, n: i64) -> i64 {
    *((sp + n * WORD) as *const i64)
}

pub unsafe fn open(sp: i64) -> i64 {
    let path = arg(sp, 1) as *const libc::c_char;
    let flags = arg(sp, 0) as i32;
    libc::open(path, flags) as i64
}

pub unsafe fn read(sp: i64) -> i64 {
    let fd = arg(sp, 2) as i32;
    let buf = arg(sp, 1) as *mut c_void;
    let count = arg(sp, 0) as libc::size_t;
    libc::read(fd, buf, count) as i64
}

pub unsafe fn close(sp: i64) -> i64 {
    let fd = arg(sp, 0) as i32;
    libc::close(fd) as i64
}

/// `pc[1]` (the `ADJ` operand trailing every `PRTF` call) is the total
/// argument count, format string included — see spec.md's documented
/// coupling between call-site emission and this decode step. `t` lands one
/// past the format string the same way the source's `t = sp + pc[1]` does;
/// five trailing arguments are always read, whether or not the format
/// string actually references that many — matching the source's own
/// fixed-arity `printf(fmt, t[-2], t[-3], t[-4], t[-5], t[-6])` call into
/// the real C `printf`.
pub unsafe fn printf(sp: i64, argc: i64) -> i64 {
    let t = sp + argc * WORD;
    let fmt = *((t - WORD) as *const i64) as *const libc::c_char;
    let a1 = *((t - 2 * WORD) as *const i64);
    let a2 = *((t - 3 * WORD) as *const i64);
    let a3 = *((t - 4 * WORD) as *const i64);
    let a4 = *((t - 5 * WORD) as *const i64);
    let a5 = *((t - 6 * WORD) as *const i64);
    libc::printf(fmt, a1, a2, a3, a4, a5) as i64
}

pub unsafe fn malloc(sp: i64) -> i64 {
    let n = arg(sp, 0) as libc::size_t;
    libc::malloc(n) as i64
}

pub unsafe fn free(sp: i64) {
    let p = arg(sp, 0) as *mut c_void;
    libc::free(p);
}

pub unsafe fn memset(sp: i64) -> i64 {
    let p = arg(sp, 2) as *mut c_void;
    let c = arg(sp, 1) as i32;
    let n = arg(sp, 0) as libc::size_t;
    libc::memset(p, c, n) as i64
}

pub unsafe fn memcmp(sp: i64) -> i64 {
    let p = arg(sp, 2) as *const c_void;
    let q = arg(sp, 1) as *const c_void;
    let n = arg(sp, 0) as libc::size_t;
    libc::memcmp(p, q, n) as i64
}
