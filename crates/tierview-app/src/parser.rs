// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Category, DetailLine, Function, SubItem, Tree};

const SEPARATOR_MIN_LEN: usize = 3;
const HEADER_NAME_MARKER: &str = "功能";
const HEADER_PARAMS_MARKER: &str = "执行参数";

/// Why a line was ignored. Ignored lines never change the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Indented one level before any category exists.
    OrphanFunction,
    /// Indented two levels before any function exists.
    OrphanSubItem,
    /// Indented three or more levels before any function exists.
    OrphanDetail,
}

impl DiagnosticKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrphanFunction => "function line without a category",
            Self::OrphanSubItem => "sub-item line without a function",
            Self::OrphanDetail => "detail line without a function",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line number in the source.
    pub line_number: usize,
    pub kind: DiagnosticKind,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line_number, self.kind.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub tree: Tree,
    pub diagnostics: Vec<Diagnostic>,
    /// Lines that produced a node.
    pub accepted_lines: usize,
}

/// Index cursors into the most recently created node of each tier.
#[derive(Debug, Default)]
struct Cursors {
    category: Option<usize>,
    function: Option<usize>,
    sub_item: Option<usize>,
}

#[derive(Debug, Default)]
struct OutlineParser {
    outcome: ParseOutcome,
    cursors: Cursors,
}

pub fn parse_str(source: &str) -> ParseOutcome {
    parse_lines(source.lines())
}

pub fn parse_lines<I, S>(lines: I) -> ParseOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = OutlineParser::default();
    for (index, line) in lines.into_iter().enumerate() {
        parser.feed(index + 1, line.as_ref());
    }

    let outcome = parser.outcome;
    tracing::debug!(
        categories = outcome.tree.category_count(),
        entries = outcome.accepted_lines,
        ignored = outcome.diagnostics.len(),
        "parsed outline"
    );
    outcome
}

impl OutlineParser {
    fn feed(&mut self, line_number: usize, raw: &str) {
        let line = match raw.find(['\r', '\n']) {
            Some(end) => &raw[..end],
            None => raw,
        };
        let (level, rest) = split_indent(line);
        let payload = trim_horizontal(rest);
        if payload.is_empty() || is_separator_line(payload) || is_header_line(payload) {
            return;
        }

        let accepted = match level {
            0 => {
                self.start_category(payload);
                true
            }
            1 => self.start_function(line_number, payload),
            2 => self.tier_two(line_number, payload),
            _ => self.deep_detail(line_number, level, payload),
        };
        if accepted {
            self.outcome.accepted_lines += 1;
        }
    }

    fn start_category(&mut self, name: &str) {
        let categories = &mut self.outcome.tree.categories;
        categories.push(Category::new(name));
        self.cursors = Cursors {
            category: Some(categories.len() - 1),
            function: None,
            sub_item: None,
        };
    }

    fn start_function(&mut self, line_number: usize, name: &str) -> bool {
        let Some(category) = self.cursors.category else {
            self.ignore(line_number, DiagnosticKind::OrphanFunction);
            return false;
        };
        let functions = &mut self.outcome.tree.categories[category].functions;
        functions.push(Function::new(name));
        self.cursors.function = Some(functions.len() - 1);
        self.cursors.sub_item = None;
        true
    }

    fn tier_two(&mut self, line_number: usize, payload: &str) -> bool {
        let Some(function) = self.current_function() else {
            self.ignore(line_number, DiagnosticKind::OrphanSubItem);
            return false;
        };

        if payload.starts_with('[') {
            function.details.push(detail_line(payload, 0));
            self.cursors.sub_item = None;
        } else {
            function.sub_items.push(SubItem::new(payload));
            let index = function.sub_items.len() - 1;
            self.cursors.sub_item = Some(index);
        }
        true
    }

    fn deep_detail(&mut self, line_number: usize, level: usize, payload: &str) -> bool {
        let sub_item = self.cursors.sub_item;
        let Some(function) = self.current_function() else {
            self.ignore(line_number, DiagnosticKind::OrphanDetail);
            return false;
        };

        let base = if sub_item.is_some() { 3 } else { 2 };
        let detail = detail_line(payload, level.saturating_sub(base));
        match sub_item {
            Some(index) => function.sub_items[index].details.push(detail),
            None => function.details.push(detail),
        }
        true
    }

    fn current_function(&mut self) -> Option<&mut Function> {
        let category = self.cursors.category?;
        let function = self.cursors.function?;
        self.outcome
            .tree
            .categories
            .get_mut(category)?
            .functions
            .get_mut(function)
    }

    fn ignore(&mut self, line_number: usize, kind: DiagnosticKind) {
        tracing::debug!(line_number, reason = kind.as_str(), "ignoring outline line");
        self.outcome
            .diagnostics
            .push(Diagnostic { line_number, kind });
    }
}

/// Splits leading tabs/spaces from the line. Each tab is one level; spaces
/// count two per level with an odd remainder rounded up.
pub fn split_indent(line: &str) -> (usize, &str) {
    let mut tabs = 0_usize;
    let mut spaces = 0_usize;
    for ch in line.chars() {
        match ch {
            '\t' => tabs += 1,
            ' ' => spaces += 1,
            _ => break,
        }
    }
    (tabs + spaces.div_ceil(2), &line[tabs + spaces..])
}

pub fn indent_level(line: &str) -> usize {
    split_indent(line).0
}

fn trim_horizontal(text: &str) -> &str {
    text.trim_matches([' ', '\t'])
}

fn is_separator_line(text: &str) -> bool {
    text.len() >= SEPARATOR_MIN_LEN && text.bytes().all(|byte| byte == b'-')
}

fn is_header_line(text: &str) -> bool {
    text.contains(HEADER_NAME_MARKER) && text.contains(HEADER_PARAMS_MARKER)
}

fn detail_line(payload: &str, extra_indent: usize) -> DetailLine {
    let mut text = " ".repeat(extra_indent * 2);
    text.extend(payload.chars().map(|ch| if ch == '\t' { ' ' } else { ch }));
    DetailLine::new(text)
}
