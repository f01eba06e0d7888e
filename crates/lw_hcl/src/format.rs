//! Canonical text layout for blocks.
//!
//! Two-space indentation. Consecutive single-line attributes of a body form
//! a run whose `=` signs are aligned one column after the longest name; any
//! other line ends the run.

use crate::encode::{quote, Tokens};
use crate::structure::{Block, Body, Structure};

const INDENT: &str = "  ";

enum Line {
    Assign {
        indent: usize,
        key: String,
        value: String,
    },
    Text {
        indent: usize,
        text: String,
    },
}

pub(crate) fn render_block(block: &Block) -> String {
    let mut lines = Vec::new();
    block_lines(block, 0, &mut lines);
    write_lines(&lines)
}

fn block_lines(block: &Block, indent: usize, lines: &mut Vec<Line>) {
    let mut header = block.ident().to_string();
    for label in block.labels() {
        header.push(' ');
        header.push_str(&quote(label));
    }

    if block.body().is_empty() {
        lines.push(Line::Text {
            indent,
            text: format!("{} {{}}", header),
        });
        return;
    }

    lines.push(Line::Text {
        indent,
        text: format!("{} {{", header),
    });
    body_lines(block.body(), indent + 1, lines);
    lines.push(Line::Text {
        indent,
        text: "}".to_string(),
    });
}

fn body_lines(body: &Body, indent: usize, lines: &mut Vec<Line>) {
    for structure in body.iter() {
        match structure {
            Structure::Attribute(attr) => tokens_lines(attr.key(), attr.expr(), indent, lines),
            Structure::Block(block) => block_lines(block, indent, lines),
        }
    }
}

fn tokens_lines(key: &str, tokens: &Tokens, indent: usize, lines: &mut Vec<Line>) {
    match tokens {
        Tokens::Inline(value) => lines.push(Line::Assign {
            indent,
            key: key.to_string(),
            value: value.clone(),
        }),
        Tokens::Object(entries) => {
            lines.push(Line::Text {
                indent,
                text: format!("{} = {{", key),
            });
            for (entry_key, entry_tokens) in entries {
                tokens_lines(entry_key, entry_tokens, indent + 1, lines);
            }
            lines.push(Line::Text {
                indent,
                text: "}".to_string(),
            });
        }
    }
}

fn write_lines(lines: &[Line]) -> String {
    let mut out = String::new();
    let mut i = 0;

    while i < lines.len() {
        if let Line::Text { indent, text } = &lines[i] {
            out.push_str(&INDENT.repeat(*indent));
            out.push_str(text);
            out.push('\n');
            i += 1;
            continue;
        }

        let run_end = lines[i..]
            .iter()
            .position(|line| matches!(line, Line::Text { .. }))
            .map_or(lines.len(), |offset| i + offset);

        let width = lines[i..run_end]
            .iter()
            .map(|line| match line {
                Line::Assign { key, .. } => key.chars().count(),
                Line::Text { .. } => 0,
            })
            .max()
            .unwrap_or(0);

        for line in &lines[i..run_end] {
            if let Line::Assign { indent, key, value } = line {
                out.push_str(&INDENT.repeat(*indent));
                out.push_str(key);
                out.push_str(&" ".repeat(width - key.chars().count()));
                out.push_str(" = ");
                out.push_str(value);
                out.push('\n');
            }
        }

        i = run_end;
    }

    out
}
