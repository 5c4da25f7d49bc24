// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Screen rectangle in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl PaneRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_visible(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub const fn right(self) -> u16 {
        self.x.saturating_add(self.width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Delta(isize),
    Home,
    End,
}

/// A titled list with a cursor and a scroll window. Row 0 of the rectangle
/// is the header, so `height - 1` rows show items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPane {
    title: String,
    items: Vec<String>,
    selected: usize,
    scroll: usize,
    rect: PaneRect,
}

impl ListPane {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            selected: 0,
            scroll: 0,
            rect: PaneRect::default(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn rect(&self) -> PaneRect {
        self.rect
    }

    pub fn is_visible(&self) -> bool {
        self.rect.is_visible()
    }

    /// Rows available for items below the header.
    pub fn visible_rows(&self) -> usize {
        usize::from(self.rect.height.saturating_sub(1))
    }

    /// Replaces the contents and resets the cursor and scroll window.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.items = items.into_iter().map(Into::into).collect();
        self.selected = 0;
        self.scroll = 0;
    }

    pub fn clear(&mut self) {
        self.set_items(std::iter::empty::<String>());
    }

    pub fn set_rect(&mut self, rect: PaneRect) {
        self.rect = rect;
        self.adjust_scroll();
    }

    /// Moves the cursor, clamped to the item range. Returns whether the
    /// selected index changed.
    pub fn select(&mut self, selection: Selection) -> bool {
        let previous = self.selected;
        let last = self.items.len().saturating_sub(1);
        self.selected = match selection {
            Selection::Delta(delta) if delta.is_negative() => {
                self.selected.saturating_sub(delta.unsigned_abs())
            }
            Selection::Delta(delta) => self.selected.saturating_add(delta as usize).min(last),
            Selection::Home => 0,
            Selection::End => last,
        };
        self.adjust_scroll();
        self.selected != previous
    }

    pub fn select_index(&mut self, index: usize) -> bool {
        let previous = self.selected;
        self.selected = index.min(self.items.len().saturating_sub(1));
        self.adjust_scroll();
        self.selected != previous
    }

    /// Items currently inside the scroll window, with their absolute index.
    pub fn window(&self) -> impl Iterator<Item = (usize, &str)> {
        self.items
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(self.visible_rows())
            .map(|(index, item)| (index, item.as_str()))
    }

    fn adjust_scroll(&mut self) {
        let rows = self.visible_rows().max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + rows {
            self.scroll = self.selected + 1 - rows;
        }
    }
}
