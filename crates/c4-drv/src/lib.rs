//! c4-drv — the command-line front end: reads a source file, seeds the
//! symbol table, runs it through `c4-par`, and either lists the emitted
//! bytecode (`-s`) or hands it to `c4-vm` (optionally tracing every
//! instruction with `-d`).
//!
//! Grounded on `faxc-drv`'s own `Config`/`Session` split, scaled down to
//! the three flags this tool actually has: there is no multi-file
//! pipeline, no optimization levels, no incremental cache — one source
//! file goes in, one exit code comes out.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use c4_codegen::Op;
use c4_par::{seed, Parser};
use c4_util::SymbolTable;
use c4_vm::{mnemonic4, Vm};

/// Size of the data segment (globals + string literals) and the VM's own
/// stack. The source compiler sizes all four of its pools identically
/// (`poolsz = 256*1024`); `text` has no fixed cap here since `TextSegment`
/// is a plain growable `Vec`.
pub const DEFAULT_POOL_SIZE: usize = 256 * 1024;

/// Parsed command-line flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    /// `-s`: list source lines interleaved with the bytecode emitted for
    /// them, then stop without running anything.
    pub source_listing: bool,
    /// `-d`: trace every instruction the VM executes.
    pub debug: bool,
}

impl Config {
    /// Parses `c4 [-s] [-d] <file>`, the same order-independent flag
    /// stripping the source compiler's `main` does before treating
    /// whatever argument remains as the file to compile.
    pub fn from_args(args: impl Iterator<Item = String>) -> Result<Config> {
        let mut source_listing = false;
        let mut debug = false;
        let mut path = None;

        for arg in args {
            match arg.as_str() {
                "-s" => source_listing = true,
                "-d" => debug = true,
                other => {
                    if path.is_some() {
                        bail!("usage: c4 [-s] [-d] <file>");
                    }
                    path = Some(PathBuf::from(other));
                }
            }
        }

        let path = path.context("usage: c4 [-s] [-d] <file>")?;
        Ok(Config { path, source_listing, debug })
    }
}

/// Runs a configured compile (and, unless `-s` was given, execute) pass.
/// Returns the process exit code the source tool itself would have
/// produced: `0`/whatever `main` returned on success, `-1` on any
/// compile-time or run-time error.
///
/// Diagnostics print to stdout, not stderr — spec.md §7 carries over the
/// source compiler's own `printf`-everything behavior rather than
/// `faxc-drv`'s `eprintln!` convention, since every line this tool ever
/// produces (listings, traces, errors, the final `exit(...)` line) goes
/// through the same channel in the original.
pub fn run(config: &Config) -> Result<i32> {
    let source = std::fs::read(&config.path)
        .with_context(|| format!("could not read {}", config.path.display()))?;

    let mut symbols = SymbolTable::new();
    seed(&mut symbols);
    let mut parser = Parser::new(&source, &mut symbols, DEFAULT_POOL_SIZE);

    let main_id = match parser.parse_program() {
        Ok(id) => id,
        Err(e) => {
            println!("{e}");
            return Ok(-1);
        }
    };

    if config.source_listing {
        print_listing(&source, &parser);
        return Ok(0);
    }

    let main_entry = parser.symbols().get(main_id).val;
    let text = parser.text.as_slice().to_vec();
    let mut vm = Vm::new(text, main_entry, DEFAULT_POOL_SIZE, config.debug);
    match vm.run() {
        Ok(outcome) => Ok(outcome.exit_code as i32),
        Err(e) => {
            println!("{e}");
            Ok(-1)
        }
    }
}

/// Prints `"<line>: <source text>"` for every source line, followed by
/// one `"<8-char mnemonic>[ <operand>]"` row per instruction emitted
/// while that line was current — see `Parser::line_marks`' doc comment
/// for how the line/instruction association is approximated.
fn print_listing(source: &[u8], parser: &Parser) {
    let text = parser.text.as_slice();
    let lines: Vec<&[u8]> = source.split_inclusive(|&b| b == b'\n').collect();
    let marks = &parser.line_marks;

    for (i, &(line, addr)) in marks.iter().enumerate() {
        let end = marks
            .get(i + 1)
            .map(|&(_, next)| next.as_u32() as usize)
            .unwrap_or(text.len());
        let start = addr.as_u32() as usize;

        if let Some(src_line) = lines.get((line as usize).saturating_sub(1)) {
            print!("{line}: {}", String::from_utf8_lossy(src_line));
            if !src_line.ends_with(b"\n") {
                println!();
            }
        }

        let mut pos = start;
        while pos < end {
            let word = text[pos];
            pos += 1;
            match Op::from_i64(word) {
                Some(op) => {
                    print!("{:>8}", mnemonic4(op));
                    if op.has_operand() && pos < end {
                        println!(" {}", text[pos]);
                        pos += 1;
                    } else {
                        println!();
                    }
                }
                None => println!("{:>8}", word),
            }
        }
    }
}
