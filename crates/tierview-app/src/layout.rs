// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::PaneRect;

pub const DEFAULT_COLUMN_WIDTH: u16 = 16;
const PANE_GAP: u16 = 1;
const FUNCTION_BAR_ROWS: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaneKind {
    Category,
    Function,
    SubItem,
    Detail,
}

impl PaneKind {
    pub const ALL: [Self; 4] = [Self::Category, Self::Function, Self::SubItem, Self::Detail];

    pub const fn index(self) -> usize {
        match self {
            Self::Category => 0,
            Self::Function => 1,
            Self::SubItem => 2,
            Self::Detail => 3,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Category => "Categories",
            Self::Function => "Functions",
            Self::SubItem => "Options",
            Self::Detail => "Details",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    SubitemsShown,
    SubitemsHidden,
}

impl LayoutState {
    pub const fn for_sub_items(has_sub_items: bool) -> Self {
        if has_sub_items {
            Self::SubitemsShown
        } else {
            Self::SubitemsHidden
        }
    }

    pub const fn sub_items_visible(self) -> bool {
        matches!(self, Self::SubitemsShown)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SubitemsShown => "sub-items shown",
            Self::SubitemsHidden => "sub-items hidden",
        }
    }
}

/// Fixed widths of the three left columns; the detail pane takes the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    pub category_width: u16,
    pub function_width: u16,
    pub sub_item_width: u16,
}

impl Default for LayoutSpec {
    fn default() -> Self {
        Self {
            category_width: DEFAULT_COLUMN_WIDTH,
            function_width: DEFAULT_COLUMN_WIDTH,
            sub_item_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}

impl LayoutSpec {
    /// Pane rectangles indexed by [`PaneKind::index`]. The bottom row of the
    /// screen is left for the function bar.
    ///
    /// When sub-items are hidden the sub-item pane collapses to zero width and
    /// the detail pane widens to the sum of both shown widths while still
    /// ending at the screen's right edge.
    pub fn pane_rects(self, screen: PaneRect, state: LayoutState) -> [PaneRect; 4] {
        let height = screen.height.saturating_sub(FUNCTION_BAR_ROWS);
        let mut cursor = screen.x;
        let mut remaining = screen.width;

        let mut column = |wanted: u16| {
            let width = wanted.min(remaining);
            let rect = PaneRect::new(cursor, screen.y, width, height);
            let used = width.saturating_add(PANE_GAP).min(remaining);
            cursor = cursor.saturating_add(used);
            remaining -= used;
            rect
        };

        let category = column(self.category_width);
        let function = column(self.function_width);
        let tail_x = cursor;
        let tail_width = remaining;

        let sub_item_width = self.sub_item_width.min(tail_width);
        let shown_detail_width =
            tail_width.saturating_sub(sub_item_width.saturating_add(PANE_GAP));
        let shared = sub_item_width.saturating_add(shown_detail_width);

        let (sub_item, detail) = match state {
            LayoutState::SubitemsShown => (
                PaneRect::new(tail_x, screen.y, sub_item_width, height),
                PaneRect::new(
                    tail_x
                        .saturating_add(sub_item_width)
                        .saturating_add(PANE_GAP)
                        .min(tail_x.saturating_add(tail_width)),
                    screen.y,
                    shown_detail_width,
                    height,
                ),
            ),
            LayoutState::SubitemsHidden => (
                PaneRect::new(tail_x, screen.y, 0, height),
                PaneRect::new(
                    tail_x.saturating_add(tail_width.saturating_sub(shared)),
                    screen.y,
                    shared,
                    height,
                ),
            ),
        };

        [category, function, sub_item, detail]
    }

    /// Row used by the function bar, if the screen has any rows.
    pub fn function_bar(self, screen: PaneRect) -> Option<PaneRect> {
        if screen.height == 0 {
            return None;
        }
        Some(PaneRect::new(
            screen.x,
            screen.y + screen.height - FUNCTION_BAR_ROWS,
            screen.width,
            FUNCTION_BAR_ROWS,
        ))
    }
}
