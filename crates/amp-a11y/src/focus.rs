//! Focus Management
//!
//! Focus trap for the reading-mode modal. Focus traversal is abstracted
//! as an ordered list of focusable elements inside a scope, so any UI
//! toolkit can act as the [`FocusHost`].

use std::collections::HashMap;

/// Opaque element handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Host focus surface
pub trait FocusHost {
    /// Element holding focus
    fn focused(&self) -> Option<ElementId>;

    /// Move focus; `false` if the element cannot take it
    fn focus(&mut self, id: ElementId) -> bool;

    /// Element still exists and can take focus programmatically
    fn is_focusable(&self, id: ElementId) -> bool;

    /// Descendants of `container` in the Tab sequence, in traversal order
    fn focusables_within(&self, container: ElementId) -> Vec<ElementId>;
}

/// Tab index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    NotFocusable,       // not set
    Programmatic,       // tabindex="-1"
    Sequential(i32),    // tabindex="0" or positive
}

impl TabIndex {
    pub fn parse(value: &str) -> Self {
        match value.parse::<i32>() {
            Ok(n) if n < 0 => Self::Programmatic,
            Ok(n) => Self::Sequential(n),
            Err(_) => Self::NotFocusable,
        }
    }

    /// In the Tab sequence
    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }

    /// Can receive focus from code
    pub fn accepts_focus(&self) -> bool {
        !matches!(self, Self::NotFocusable)
    }
}

#[derive(Debug, Clone)]
struct ElementEntry {
    parent: Option<ElementId>,
    tab_index: TabIndex,
    disabled: bool,
}

/// In-memory element tree implementing [`FocusHost`]
///
/// Traversal order is insertion (document) order.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    entries: HashMap<ElementId, ElementEntry>,
    order: Vec<ElementId>,
    focused: Option<ElementId>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element under `parent`
    pub fn insert(&mut self, id: ElementId, parent: Option<ElementId>, tab_index: TabIndex) {
        if self.entries.insert(id, ElementEntry { parent, tab_index, disabled: false }).is_none() {
            self.order.push(id);
        }
    }

    /// Remove an element and its descendants
    pub fn remove(&mut self, id: ElementId) {
        let doomed: Vec<ElementId> = self
            .order
            .iter()
            .copied()
            .filter(|&e| e == id || self.is_descendant(e, id))
            .collect();
        for e in &doomed {
            self.entries.remove(e);
        }
        self.order.retain(|e| !doomed.contains(e));
        if self.focused.is_some_and(|f| doomed.contains(&f)) {
            self.focused = None;
        }
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.disabled = disabled;
        }
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.entries.contains_key(&id)
    }

    /// `id` is strictly inside `ancestor`
    pub fn is_descendant(&self, id: ElementId, ancestor: ElementId) -> bool {
        let mut cursor = self.entries.get(&id).and_then(|e| e.parent);
        while let Some(parent) = cursor {
            if parent == ancestor {
                return true;
            }
            cursor = self.entries.get(&parent).and_then(|e| e.parent);
        }
        false
    }
}

impl FocusHost for ElementRegistry {
    fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    fn focus(&mut self, id: ElementId) -> bool {
        if self.is_focusable(id) {
            self.focused = Some(id);
            true
        } else {
            false
        }
    }

    fn is_focusable(&self, id: ElementId) -> bool {
        self.entries
            .get(&id)
            .is_some_and(|e| e.tab_index.accepts_focus() && !e.disabled)
    }

    fn focusables_within(&self, container: ElementId) -> Vec<ElementId> {
        self.order
            .iter()
            .copied()
            .filter(|&id| self.is_descendant(id, container))
            .filter(|id| {
                self.entries
                    .get(id)
                    .is_some_and(|e| e.tab_index.is_focusable() && !e.disabled)
            })
            .collect()
    }
}

/// Direction of a Tab press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

/// Result of routing a key through the trap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Trap moved focus
    Wrapped(ElementId),
    /// Host traversal should proceed normally
    Passthrough,
    /// Escape: the owning session should close
    CloseRequested,
    /// No trap active
    Inactive,
}

/// Modal focus trap
#[derive(Debug)]
pub struct FocusTrap {
    container: Option<ElementId>,
    restore_target: Option<ElementId>,
    pending_initial: Option<ElementId>,
    fallback: ElementId,
}

impl FocusTrap {
    /// `fallback` receives focus when the restore target is gone
    pub fn new(fallback: ElementId) -> Self {
        Self {
            container: None,
            restore_target: None,
            pending_initial: None,
            fallback,
        }
    }

    pub fn is_active(&self) -> bool {
        self.container.is_some()
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn restore_target(&self) -> Option<ElementId> {
        self.restore_target
    }

    /// Trap focus inside `container`
    ///
    /// Records the current focus for restoration. Moving focus to `initial`
    /// is deferred until [`focus_initial`](Self::focus_initial) so the
    /// container can finish mounting.
    pub fn activate(&mut self, container: ElementId, initial: ElementId, host: &mut dyn FocusHost) {
        if self.is_active() {
            self.deactivate(host);
        }
        self.restore_target = host.focused();
        self.container = Some(container);
        self.pending_initial = Some(initial);
        tracing::debug!(
            container = container.0,
            restore = ?self.restore_target,
            "Focus trap active"
        );
    }

    /// Perform the deferred initial focus move
    pub fn focus_initial(&mut self, host: &mut dyn FocusHost) -> Option<ElementId> {
        let initial = self.pending_initial.take()?;
        if !self.is_active() {
            return None;
        }
        if host.focus(initial) {
            return Some(initial);
        }
        // Close control missing: first focusable in the modal
        let first = self.container.and_then(|c| host.focusables_within(c).first().copied())?;
        host.focus(first).then_some(first)
    }

    /// Wrap Tab/Shift+Tab at the edges of the modal
    pub fn handle_tab(&mut self, direction: TabDirection, host: &mut dyn FocusHost) -> KeyOutcome {
        let Some(container) = self.container else {
            return KeyOutcome::Inactive;
        };

        let focusables = host.focusables_within(container);
        let (Some(&first), Some(&last)) = (focusables.first(), focusables.last()) else {
            return KeyOutcome::Passthrough;
        };

        let current = host.focused();
        let inside = current.is_some_and(|c| focusables.contains(&c));

        let target = match direction {
            TabDirection::Forward if !inside || current == Some(last) => first,
            TabDirection::Backward if !inside || current == Some(first) => last,
            _ => return KeyOutcome::Passthrough,
        };

        if host.focus(target) {
            KeyOutcome::Wrapped(target)
        } else {
            KeyOutcome::Passthrough
        }
    }

    /// Escape handling
    pub fn handle_escape(&self) -> KeyOutcome {
        if self.is_active() {
            KeyOutcome::CloseRequested
        } else {
            KeyOutcome::Inactive
        }
    }

    /// Release the trap and restore focus
    ///
    /// Returns the element that received focus.
    pub fn deactivate(&mut self, host: &mut dyn FocusHost) -> Option<ElementId> {
        if self.container.take().is_none() {
            return None;
        }
        self.pending_initial = None;

        let restored = match self.restore_target.take() {
            Some(target) if host.is_focusable(target) && host.focus(target) => Some(target),
            _ => host.focus(self.fallback).then_some(self.fallback),
        };
        tracing::debug!(restored = ?restored, "Focus trap released");
        restored
    }
}
