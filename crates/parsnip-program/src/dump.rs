//! Human-readable program dump.
//!
//! The reference textual rendering of a compiled program, used by tests and
//! as the starting point for backend emitters.

use std::fmt::Write as _;

use crate::fragment::{Fragment, GroupKind};
use crate::program::{ProcKind, Program};

/// Render the whole program, one block per procedure.
pub fn dump(program: &Program) -> String {
    let mut out = String::new();
    let entry = program.procedure(program.entry());
    let _ = writeln!(out, "entry = {}", entry.name);

    for (i, proc) in program.iter().enumerate() {
        out.push('\n');
        let kind = match proc.kind {
            ProcKind::Rule => "rule",
            ProcKind::Helper => "helper",
        };
        let _ = writeln!(out, "[{i}] {kind} {}", proc.name);
        dump_fragment(&mut out, program, &proc.body, 1);
    }
    out
}

fn dump_fragment(out: &mut String, program: &Program, fragment: &Fragment, depth: usize) {
    let pad = "  ".repeat(depth);
    match fragment {
        Fragment::Literal(bytes) => {
            let _ = writeln!(out, "{pad}literal \"{}\"", escape_bytes(bytes));
        }
        Fragment::CharRange(a, b) => {
            let _ = writeln!(out, "{pad}char-range {}..{}", byte_repr(*a), byte_repr(*b));
        }
        Fragment::CharSet(set) => {
            let members: Vec<String> = set.iter().map(byte_repr).collect();
            let _ = writeln!(out, "{pad}char-set [{}]", members.join(" "));
        }
        Fragment::AnyChar => {
            let _ = writeln!(out, "{pad}any-char");
        }
        Fragment::Group { kind, children } => {
            let label = match kind {
                GroupKind::AllRequired => "all-of",
                GroupKind::OneRequired => "one-of",
            };
            let _ = writeln!(out, "{pad}{label}");
            for child in children {
                dump_fragment(out, program, child, depth + 1);
            }
        }
        Fragment::ZeroOrMore(inner) => {
            let _ = writeln!(out, "{pad}zero-or-more");
            dump_fragment(out, program, inner, depth + 1);
        }
        Fragment::OneOrMore(inner) => {
            let _ = writeln!(out, "{pad}one-or-more");
            dump_fragment(out, program, inner, depth + 1);
        }
        Fragment::Optional(inner) => {
            let _ = writeln!(out, "{pad}optional");
            dump_fragment(out, program, inner, depth + 1);
        }
        Fragment::AndLookahead(inner) => {
            let _ = writeln!(out, "{pad}and-lookahead");
            dump_fragment(out, program, inner, depth + 1);
        }
        Fragment::NotLookahead(inner) => {
            let _ = writeln!(out, "{pad}not-lookahead");
            dump_fragment(out, program, inner, depth + 1);
        }
        Fragment::Call(id) => {
            let _ = match program.get(*id) {
                Some(target) => writeln!(out, "{pad}call {}", target.name),
                None => writeln!(out, "{pad}call {id}"),
            };
        }
        Fragment::MakeNode { name, body } => {
            let _ = writeln!(out, "{pad}make-node \"{name}\"");
            dump_fragment(out, program, body, depth + 1);
        }
        Fragment::Ignore(body) => {
            let _ = writeln!(out, "{pad}ignore");
            dump_fragment(out, program, body, depth + 1);
        }
    }
}

fn escape_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}

fn byte_repr(byte: u8) -> String {
    match byte {
        b'\n' => "'\\n'".to_string(),
        b'\r' => "'\\r'".to_string(),
        b'\t' => "'\\t'".to_string(),
        b'\'' => "'\\''".to_string(),
        b'\\' => "'\\\\'".to_string(),
        0x20..=0x7e => format!("'{}'", byte as char),
        _ => format!("0x{byte:02x}"),
    }
}
