//! Merge writing: a line-oriented rewrite of the existing file
//!
//! The writer never re-serializes the whole document. It rescans the old
//! text block by block (a block is a header line plus every line up to the
//! next header) and only touches blocks whose section name is in the change
//! set:
//!
//! - changed and still present: parameter lines are dropped and the new
//!   parameters are emitted where the first old parameter stood (directly
//!   after the header if there was none); comments and blank lines stay put
//! - changed and no longer present: the whole block is dropped
//! - changed and new: appended at end of file, preceded by a blank line
//!
//! Everything else, including content before the first header, passes
//! through byte for byte.

use std::collections::{BTreeSet, HashSet};

use crate::document::ConfigDocument;
use crate::line::{LineKind, classify, render_param, split_lines};
use crate::section::Section;

struct Block<'a> {
    name: Option<String>,
    lines: Vec<&'a str>,
}

fn blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = vec![Block {
        name: None,
        lines: Vec::new(),
    }];

    for raw in split_lines(text) {
        if let LineKind::Header(name) = classify(raw) {
            blocks.push(Block {
                name: Some(name),
                lines: vec![raw],
            });
        } else if let Some(block) = blocks.last_mut() {
            block.lines.push(raw);
        }
    }
    blocks
}

/// Append a line we generated, making sure it starts on a fresh line.
fn push_generated(out: &mut String, line: &str) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
}

fn push_params(out: &mut String, section: &Section) {
    for (key, value) in section.iter() {
        push_generated(out, &render_param(key, value));
    }
}

/// Merge the sections named in `changed` from `doc` into `old_text`.
///
/// With an empty change set the result equals `old_text` exactly.
pub fn merge(old_text: &str, doc: &ConfigDocument, changed: &BTreeSet<String>) -> String {
    let mut out = String::with_capacity(old_text.len());
    let mut seen: HashSet<&str> = HashSet::new();

    for block in blocks(old_text) {
        let Some(name) = block.name.as_deref() else {
            block.lines.iter().for_each(|l| out.push_str(l));
            continue;
        };

        if !changed.contains(name) {
            block.lines.iter().for_each(|l| out.push_str(l));
            continue;
        }

        let first_occurrence = !seen.contains(name);
        let replacement = doc.section(name).filter(|_| first_occurrence);
        let Some(section) = replacement else {
            tracing::debug!(section = name, "Dropping section block");
            continue;
        };
        if let Some((key, _)) = doc.sections().find(|(n, _)| *n == name) {
            seen.insert(key);
        }

        let Some((header, body)) = block.lines.split_first() else {
            continue;
        };
        out.push_str(header);

        let has_params = body
            .iter()
            .any(|l| matches!(classify(l), LineKind::Param { .. }));
        if !has_params {
            push_params(&mut out, section);
        }

        let mut emitted = !has_params;
        for raw in body {
            if matches!(classify(raw), LineKind::Param { .. }) {
                if !emitted {
                    push_params(&mut out, section);
                    emitted = true;
                }
                continue;
            }
            out.push_str(raw);
        }
    }

    for (name, section) in doc.sections() {
        if !changed.contains(name) || seen.contains(name) {
            continue;
        }
        tracing::debug!(section = name, "Appending new section");
        if !out.is_empty() {
            push_generated(&mut out, "\n");
        }
        push_generated(&mut out, &format!("[{}]\n", name));
        push_params(&mut out, section);
    }

    out
}
