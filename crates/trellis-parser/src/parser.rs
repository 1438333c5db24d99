//! Line-oriented parser for structure-chart definitions.
//!
//! Each line is matched independently after trimming; indentation
//! (two spaces per level) gives modules and storages their declared
//! nesting level. Keyword directives are parsed with [`winnow`];
//! connection lines keep the looser split-on-`->` grammar so labels
//! and flow kinds can trail in any prose-friendly shape.

use log::debug;
use winnow::{ModalResult, Parser, ascii::space1, combinator::delimited, token::take_while};

use trellis_core::chart::{
    Chart, Conditional, Connection, Direction, FlowKind, Loop, Module, ModuleKind, Storage,
};

use crate::error::Diagnostic;

/// Parses a chart definition.
///
/// Never fails: lines that match no directive are discarded and a
/// warning [`Diagnostic`] is collected for each. The returned chart
/// contains whatever the input did declare, which may be empty.
pub fn parse(source: &str) -> (Chart, Vec<Diagnostic>) {
    let mut chart = Chart::new();
    let mut diagnostics = Vec::new();

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim_end();
        let content = line.trim_start();

        if content.is_empty() || content.starts_with('#') {
            continue;
        }

        // Two spaces of indentation per nesting level.
        let indent = line.len() - content.len();
        let level = indent / 2;

        parse_line(content, level, line_no, &mut chart, &mut diagnostics);
    }

    debug!(
        modules = chart.modules().len(),
        connections = chart.connections().len(),
        warnings = diagnostics.len();
        "Chart definition parsed"
    );

    (chart, diagnostics)
}

fn parse_line(
    content: &str,
    level: usize,
    line_no: usize,
    chart: &mut Chart,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if content.starts_with("module ") {
        match declaration("module", &mut &*content) {
            Ok((id, label)) => {
                if chart.module(id).is_some() {
                    diagnostics
                        .push(Diagnostic::warning(format!("duplicate module id `{id}`"))
                            .with_line(line_no));
                }
                chart.add_module(Module::new(id, label, ModuleKind::Plain, level));
            }
            Err(_) => drop_line(content, line_no, diagnostics),
        }
    } else if content.starts_with("library ") {
        match declaration("library", &mut &*content) {
            Ok((id, label)) => {
                if chart.module(id).is_some() {
                    diagnostics
                        .push(Diagnostic::warning(format!("duplicate module id `{id}`"))
                            .with_line(line_no));
                }
                chart.add_module(Module::new(id, label, ModuleKind::Library, level));
            }
            Err(_) => drop_line(content, line_no, diagnostics),
        }
    } else if content.starts_with("storage ") {
        match declaration("storage", &mut &*content) {
            Ok((id, label)) => chart.add_storage(Storage::new(id, label, level)),
            Err(_) => drop_line(content, line_no, diagnostics),
        }
    } else if content.starts_with("conditional ") {
        match parse_conditional(content) {
            Some(conditional) => chart.add_conditional(conditional),
            None => drop_line(content, line_no, diagnostics),
        }
    } else if content.starts_with("loop ") {
        match parse_loop(content) {
            Some(lp) => chart.add_loop(lp),
            None => drop_line(content, line_no, diagnostics),
        }
    } else if content.contains("->") {
        match parse_connection(content) {
            Some(connection) => chart.add_connection(connection),
            None => drop_line(content, line_no, diagnostics),
        }
    } else {
        drop_line(content, line_no, diagnostics);
    }
}

fn drop_line(content: &str, line_no: usize, diagnostics: &mut Vec<Diagnostic>) {
    diagnostics.push(
        Diagnostic::warning(format!("unrecognized line `{content}`")).with_line(line_no),
    );
}

/// An identifier: one or more word characters.
fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_').parse_next(input)
}

/// A non-empty double-quoted label.
fn quoted_label<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    delimited('"', take_while(1.., |c: char| c != '"'), '"').parse_next(input)
}

/// `<keyword> <id> "<label>"`, with anything after the closing quote
/// ignored.
fn declaration<'s>(keyword: &'static str, input: &mut &'s str) -> ModalResult<(&'s str, &'s str)> {
    (keyword, space1, identifier, space1, quoted_label)
        .map(|(_, _, id, _, label)| (id, label))
        .parse_next(input)
}

/// `conditional <from> <to> [<to> ...]`; needs a source and at least
/// one branch target.
fn parse_conditional(content: &str) -> Option<Conditional> {
    let mut tokens = content.split_whitespace().skip(1);
    let from = tokens.next()?;
    let targets: Vec<String> = tokens.map(str::to_string).collect();
    if targets.is_empty() {
        return None;
    }
    Some(Conditional::new(from, targets))
}

/// `loop over <id> [<id> ...]`
fn parse_loop(content: &str) -> Option<Loop> {
    let mut tokens = content.split_whitespace();
    if tokens.next() != Some("loop") || tokens.next() != Some("over") {
        return None;
    }
    let over: Vec<String> = tokens.map(str::to_string).collect();
    if over.is_empty() {
        return None;
    }
    Some(Loop::new(over))
}

/// `<from> -> <to> [kind] [direction] [label]`
///
/// The first trailing token is the flow kind (`data`/`control`;
/// anything else means a plain edge). The next token, if it is a
/// direction keyword, flips the indicator; otherwise it starts the
/// label. The label is stripped of surrounding quotes.
fn parse_connection(content: &str) -> Option<Connection> {
    let parts: Vec<&str> = content.split("->").collect();
    if parts.len() != 2 {
        return None;
    }

    let from = parts[0].trim();
    let tokens: Vec<&str> = parts[1].split_whitespace().collect();
    let to = *tokens.first()?;

    let kind = match tokens.get(1) {
        Some(&"data") => FlowKind::Data,
        Some(&"control") => FlowKind::Control,
        _ => FlowKind::Normal,
    };

    let mut direction = Direction::Forward;
    let mut label_start = 2;
    match tokens.get(2) {
        Some(&"forward") => label_start = 3,
        Some(&"backward") => {
            direction = Direction::Backward;
            label_start = 3;
        }
        _ => {}
    }

    let label = if tokens.len() > label_start {
        tokens[label_start..].join(" ")
    } else {
        String::new()
    };
    let label = label.trim_matches('"');

    Some(Connection::new(from, to, kind, direction, label))
}
