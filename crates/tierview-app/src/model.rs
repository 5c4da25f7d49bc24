// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// A parsed outline: categories in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub functions: Vec<Function>,
}

/// A function owns its sub-items plus the detail lines written directly under
/// it. The own details are what the detail pane shows when there are no
/// sub-items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub sub_items: Vec<SubItem>,
    pub details: Vec<DetailLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubItem {
    pub name: String,
    pub details: Vec<DetailLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailLine {
    pub text: String,
}

impl DetailLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of synthetic indentation steps carried as a two-space prefix.
    pub fn depth(&self) -> usize {
        let spaces = self.text.len() - self.text.trim_start_matches(' ').len();
        spaces / 2
    }

    /// Text after the indentation counted by [`DetailLine::depth`].
    pub fn payload(&self) -> &str {
        &self.text[self.depth() * 2..]
    }
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
        }
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn function(&self, index: usize) -> Option<&Function> {
        self.functions.get(index)
    }
}

impl Function {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sub_items: Vec::new(),
            details: Vec::new(),
        }
    }

    pub fn has_sub_items(&self) -> bool {
        !self.sub_items.is_empty()
    }

    pub fn sub_item_count(&self) -> usize {
        self.sub_items.len()
    }

    pub fn sub_item(&self, index: usize) -> Option<&SubItem> {
        self.sub_items.get(index)
    }

    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    pub fn detail(&self, index: usize) -> Option<&DetailLine> {
        self.details.get(index)
    }
}

impl SubItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: Vec::new(),
        }
    }

    pub fn detail_count(&self) -> usize {
        self.details.len()
    }

    pub fn detail(&self, index: usize) -> Option<&DetailLine> {
        self.details.get(index)
    }
}

impl Tree {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn function(&self, category: usize, function: usize) -> Option<&Function> {
        self.category(category)?.function(function)
    }

    pub fn sub_item(&self, category: usize, function: usize, sub_item: usize) -> Option<&SubItem> {
        self.function(category, function)?.sub_item(sub_item)
    }

    /// Total number of nodes across every tier. For well-nested input this
    /// equals the number of lines the parser did not skip.
    pub fn entry_count(&self) -> usize {
        self.categories
            .iter()
            .map(|category| {
                1 + category
                    .functions
                    .iter()
                    .map(|function| {
                        1 + function.details.len()
                            + function
                                .sub_items
                                .iter()
                                .map(|sub_item| 1 + sub_item.details.len())
                                .sum::<usize>()
                    })
                    .sum::<usize>()
            })
            .sum()
    }

    /// Renders the tree back to tab-indented text that parses into an equal
    /// tree. Function-level details are written before the sub-items so they
    /// re-attach to the function.
    pub fn to_outline(&self) -> String {
        let mut out = String::new();
        for category in &self.categories {
            push_outline_line(&mut out, 0, &category.name);
            for function in &category.functions {
                push_outline_line(&mut out, 1, &function.name);
                for detail in &function.details {
                    push_outline_line(&mut out, 2 + detail.depth(), detail.payload());
                }
                for sub_item in &function.sub_items {
                    push_outline_line(&mut out, 2, &sub_item.name);
                    for detail in &sub_item.details {
                        push_outline_line(&mut out, 3 + detail.depth(), detail.payload());
                    }
                }
            }
        }
        out
    }
}

fn push_outline_line(out: &mut String, level: usize, text: &str) {
    out.extend(std::iter::repeat_n('\t', level));
    out.push_str(text);
    out.push('\n');
}
