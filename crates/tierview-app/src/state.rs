// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    DetailLine, FocusRing, Function, LayoutSpec, LayoutState, ListPane, PaneKind, PaneRect,
    Selection, Tree,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    FocusNext,
    FocusPrev,
    Resize(PaneRect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    CategoryChanged(usize),
    FunctionChanged(usize),
    SubItemChanged(usize),
    LayoutReflowed(LayoutState),
    FocusChanged(PaneKind),
    Resized(PaneRect),
}

/// Owns the tree and the four list panes, and keeps every pane downstream of
/// a selection change in sync with it.
#[derive(Debug, Clone)]
pub struct Navigator {
    tree: Tree,
    layout: LayoutSpec,
    screen: PaneRect,
    panes: [ListPane; 4],
    focus: FocusRing,
    state: LayoutState,
    last_category: usize,
    last_function: usize,
    last_sub_item: usize,
}

impl Navigator {
    pub fn new(tree: Tree, layout: LayoutSpec, screen: PaneRect) -> Self {
        let mut navigator = Self {
            tree,
            layout,
            screen,
            panes: PaneKind::ALL.map(|kind| ListPane::new(kind.title())),
            focus: FocusRing::default(),
            state: LayoutState::SubitemsHidden,
            last_category: 0,
            last_function: 0,
            last_sub_item: 0,
        };
        navigator.initialize();
        navigator
    }

    /// Fills every pane from the first category and picks the layout state
    /// for its first function.
    pub fn initialize(&mut self) {
        let names = self
            .tree
            .categories
            .iter()
            .map(|category| category.name.clone())
            .collect::<Vec<_>>();
        self.pane_mut(PaneKind::Category).set_items(names);
        self.populate_functions();
        self.populate_sub_items();

        self.state = LayoutState::for_sub_items(self.selected_function_has_sub_items());
        self.apply_layout();
        self.ensure_focus_visible();
        self.populate_details();

        self.last_category = 0;
        self.last_function = 0;
        self.last_sub_item = 0;
        tracing::debug!(
            categories = self.tree.category_count(),
            layout = self.state.label(),
            "navigator initialized"
        );
    }

    pub fn dispatch(&mut self, command: NavCommand) -> Vec<NavEvent> {
        match command {
            NavCommand::MoveUp => self.move_focused(Selection::Delta(-1)),
            NavCommand::MoveDown => self.move_focused(Selection::Delta(1)),
            NavCommand::PageUp => {
                let rows = self.page_rows();
                self.move_focused(Selection::Delta(-rows))
            }
            NavCommand::PageDown => {
                let rows = self.page_rows();
                self.move_focused(Selection::Delta(rows))
            }
            NavCommand::Home => self.move_focused(Selection::Home),
            NavCommand::End => self.move_focused(Selection::End),
            NavCommand::FocusNext => {
                let panes = &self.panes;
                let moved = self.focus.next(|kind| panes[kind.index()].is_visible());
                self.focus_event(moved)
            }
            NavCommand::FocusPrev => {
                let panes = &self.panes;
                let moved = self.focus.previous(|kind| panes[kind.index()].is_visible());
                self.focus_event(moved)
            }
            NavCommand::Resize(screen) => {
                self.screen = screen;
                self.apply_layout();
                let mut events = vec![NavEvent::Resized(screen)];
                events.extend(self.ensure_focus_visible());
                events
            }
        }
    }

    /// Compares each tier's selection with the last one seen and cascades
    /// from the highest tier that moved. A single key moves at most one tier.
    pub fn on_selection_changed(&mut self) -> Vec<NavEvent> {
        let mut events = Vec::new();

        let category = self.pane(PaneKind::Category).selected();
        if category != self.last_category {
            self.last_category = category;
            self.populate_functions();
            events.push(NavEvent::CategoryChanged(category));
            self.cascade_function(&mut events);
            return events;
        }

        if self.pane(PaneKind::Function).selected() != self.last_function {
            self.cascade_function(&mut events);
            return events;
        }

        if self.state.sub_items_visible() {
            let sub_item = self.pane(PaneKind::SubItem).selected();
            if sub_item != self.last_sub_item {
                self.last_sub_item = sub_item;
                self.populate_details();
                events.push(NavEvent::SubItemChanged(sub_item));
            }
        }

        events
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn pane(&self, kind: PaneKind) -> &ListPane {
        &self.panes[kind.index()]
    }

    pub fn panes(&self) -> impl Iterator<Item = (PaneKind, &ListPane)> {
        PaneKind::ALL.into_iter().zip(self.panes.iter())
    }

    pub fn focused(&self) -> Option<PaneKind> {
        self.focus.focused()
    }

    pub fn layout_state(&self) -> LayoutState {
        self.state
    }

    pub fn sub_items_visible(&self) -> bool {
        self.state.sub_items_visible()
    }

    pub fn screen(&self) -> PaneRect {
        self.screen
    }

    pub fn layout(&self) -> LayoutSpec {
        self.layout
    }

    /// Selected names from the category tier down to the sub-item tier.
    pub fn breadcrumb(&self) -> Vec<&str> {
        let mut tiers = vec![PaneKind::Category, PaneKind::Function];
        if self.state.sub_items_visible() {
            tiers.push(PaneKind::SubItem);
        }
        tiers
            .into_iter()
            .map_while(|kind| self.pane(kind).selected_item())
            .collect()
    }

    fn pane_mut(&mut self, kind: PaneKind) -> &mut ListPane {
        &mut self.panes[kind.index()]
    }

    fn move_focused(&mut self, selection: Selection) -> Vec<NavEvent> {
        let Some(kind) = self.focused() else {
            return Vec::new();
        };
        if !self.pane_mut(kind).select(selection) {
            return Vec::new();
        }
        tracing::trace!(pane = kind.title(), "selection moved");
        self.on_selection_changed()
    }

    fn page_rows(&self) -> isize {
        self.focused()
            .map_or(1, |kind| self.pane(kind).visible_rows().max(1)) as isize
    }

    fn focus_event(&self, moved: bool) -> Vec<NavEvent> {
        match (moved, self.focused()) {
            (true, Some(kind)) => vec![NavEvent::FocusChanged(kind)],
            _ => Vec::new(),
        }
    }

    fn selected_function(&self) -> Option<&Function> {
        self.tree.function(
            self.pane(PaneKind::Category).selected(),
            self.pane(PaneKind::Function).selected(),
        )
    }

    fn selected_function_has_sub_items(&self) -> bool {
        self.selected_function().is_some_and(Function::has_sub_items)
    }

    /// Re-fills the sub-item and detail panes for the selected function,
    /// reflowing first when sub-items appear or disappear.
    fn cascade_function(&mut self, events: &mut Vec<NavEvent>) {
        let function = self.pane(PaneKind::Function).selected();
        self.last_function = function;
        self.last_sub_item = 0;
        events.push(NavEvent::FunctionChanged(function));

        self.populate_sub_items();
        let has_sub_items = self.selected_function_has_sub_items();
        if has_sub_items != self.state.sub_items_visible() {
            self.state = LayoutState::for_sub_items(has_sub_items);
            self.apply_layout();
            tracing::debug!(layout = self.state.label(), "layout reflowed");
            events.push(NavEvent::LayoutReflowed(self.state));
            events.extend(self.ensure_focus_visible());
        }
        self.populate_details();
    }

    fn populate_functions(&mut self) {
        let names = self
            .tree
            .category(self.pane(PaneKind::Category).selected())
            .map(|category| {
                category
                    .functions
                    .iter()
                    .map(|function| function.name.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        self.pane_mut(PaneKind::Function).set_items(names);
    }

    fn populate_sub_items(&mut self) {
        let names = self
            .selected_function()
            .map(|function| {
                function
                    .sub_items
                    .iter()
                    .map(|sub_item| sub_item.name.clone())
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        self.pane_mut(PaneKind::SubItem).set_items(names);
    }

    fn populate_details(&mut self) {
        let sub_item = self.pane(PaneKind::SubItem).selected();
        let lines = match self.selected_function() {
            Some(function) if function.has_sub_items() => function
                .sub_item(sub_item)
                .map(|sub_item| detail_texts(&sub_item.details))
                .unwrap_or_default(),
            Some(function) => detail_texts(&function.details),
            None => Vec::new(),
        };
        self.pane_mut(PaneKind::Detail).set_items(lines);
    }

    fn apply_layout(&mut self) {
        let rects = self.layout.pane_rects(self.screen, self.state);
        for (pane, rect) in self.panes.iter_mut().zip(rects) {
            pane.set_rect(rect);
        }
    }

    fn ensure_focus_visible(&mut self) -> Option<NavEvent> {
        let panes = &self.panes;
        if self.focus.ensure_focus_visible(|kind| panes[kind.index()].is_visible()) {
            return self.focused().map(NavEvent::FocusChanged);
        }
        None
    }
}

fn detail_texts(details: &[DetailLine]) -> Vec<String> {
    details.iter().map(|detail| detail.text.clone()).collect()
}
