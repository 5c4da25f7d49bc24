// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::PaneKind;

/// Circular focus order over the panes. Visibility is supplied by the caller
/// on every step because reflows change it underneath the ring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRing {
    order: Vec<PaneKind>,
    focused: usize,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self::new(PaneKind::ALL.to_vec())
    }
}

impl FocusRing {
    pub fn new(order: Vec<PaneKind>) -> Self {
        Self { order, focused: 0 }
    }

    pub fn focused(&self) -> Option<PaneKind> {
        self.order.get(self.focused).copied()
    }

    pub fn next(&mut self, is_visible: impl Fn(PaneKind) -> bool) -> bool {
        self.step(1, is_visible)
    }

    pub fn previous(&mut self, is_visible: impl Fn(PaneKind) -> bool) -> bool {
        self.step(-1, is_visible)
    }

    /// Moves focus to the first visible pane when the focused one is hidden.
    /// Returns whether focus moved.
    pub fn ensure_focus_visible(&mut self, is_visible: impl Fn(PaneKind) -> bool) -> bool {
        if self.focused().is_some_and(&is_visible) {
            return false;
        }
        match self.order.iter().position(|pane| is_visible(*pane)) {
            Some(index) if index != self.focused => {
                self.focused = index;
                true
            }
            _ => false,
        }
    }

    /// Steps at most `len` times so a ring with one visible pane (or none)
    /// stays put instead of spinning.
    fn step(&mut self, delta: isize, is_visible: impl Fn(PaneKind) -> bool) -> bool {
        let len = self.order.len();
        if len == 0 {
            return false;
        }
        let mut candidate = self.focused;
        for _ in 0..len {
            candidate = (candidate as isize + delta).rem_euclid(len as isize) as usize;
            if candidate == self.focused {
                return false;
            }
            if is_visible(self.order[candidate]) {
                self.focused = candidate;
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::FocusRing;
    use crate::PaneKind;

    fn all_visible(_: PaneKind) -> bool {
        true
    }

    fn sub_item_hidden(pane: PaneKind) -> bool {
        pane != PaneKind::SubItem
    }

    #[test]
    fn next_wraps_around() {
        let mut ring = FocusRing::default();
        for expected in [
            PaneKind::Function,
            PaneKind::SubItem,
            PaneKind::Detail,
            PaneKind::Category,
        ] {
            assert!(ring.next(all_visible));
            assert_eq!(ring.focused(), Some(expected));
        }
    }

    #[test]
    fn previous_wraps_around() {
        let mut ring = FocusRing::default();
        assert!(ring.previous(all_visible));
        assert_eq!(ring.focused(), Some(PaneKind::Detail));
    }

    #[test]
    fn hidden_panes_are_skipped_both_ways() {
        let mut ring = FocusRing::default();
        ring.next(sub_item_hidden);
        ring.next(sub_item_hidden);
        assert_eq!(ring.focused(), Some(PaneKind::Detail));
        ring.previous(sub_item_hidden);
        assert_eq!(ring.focused(), Some(PaneKind::Function));
    }

    #[test]
    fn single_visible_pane_terminates() {
        let mut ring = FocusRing::default();
        let only_category = |pane: PaneKind| pane == PaneKind::Category;
        assert!(!ring.next(only_category));
        assert!(!ring.previous(only_category));
        assert_eq!(ring.focused(), Some(PaneKind::Category));
    }

    #[test]
    fn nothing_visible_terminates() {
        let mut ring = FocusRing::default();
        assert!(!ring.next(|_| false));
        assert!(!ring.ensure_focus_visible(|_| false));
        assert_eq!(ring.focused(), Some(PaneKind::Category));
    }

    #[test]
    fn ensure_focus_visible_relocates_to_first_visible() {
        let mut ring = FocusRing::default();
        ring.next(all_visible);
        ring.next(all_visible);
        assert_eq!(ring.focused(), Some(PaneKind::SubItem));

        assert!(ring.ensure_focus_visible(sub_item_hidden));
        assert_eq!(ring.focused(), Some(PaneKind::Category));
        assert!(!ring.ensure_focus_visible(sub_item_hidden));
    }

    #[test]
    fn empty_ring_has_no_focus() {
        let mut ring = FocusRing::new(Vec::new());
        assert_eq!(ring.focused(), None);
        assert!(!ring.next(all_visible));
    }
}
