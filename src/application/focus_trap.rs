// SPDX-License-Identifier: MPL-2.0
//! Keyboard focus trap for modal containers.
//!
//! While active, Tab and Shift+Tab wrap around the container's focusable
//! descendants instead of leaving it. Escape is reported back as
//! [`TrapOutcome::EscapeRequested`]; what escaping means is up to the owner.
//!
//! Focus moves after activation and deactivation are deferred by a short
//! delay so the container has rendered before focus lands on it. Each
//! deferred move is tied to a timer generation and dropped if a later
//! activate/deactivate superseded it.

use crate::application::timer::{Ticket, TimerSlot};
use std::time::Duration;

/// Delay before deferred focus moves.
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(50);

/// Kind of element, as far as focusability is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A link; only focusable when it points somewhere.
    Link { has_target: bool },
    Button,
    Input,
    Select,
    TextArea,
    /// Anything else; focusable only through an explicit tab index.
    Other,
}

/// One descendant of a trapped container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable<Id> {
    pub id: Id,
    pub role: Role,
    pub disabled: bool,
    pub tab_index: Option<i32>,
    /// Rendered with a non-empty box.
    pub visible: bool,
}

impl<Id> Focusable<Id> {
    /// Whether keyboard traversal may land on this element.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        if !self.visible || self.tab_index.is_some_and(|i| i < 0) {
            return false;
        }
        match self.role {
            Role::Link { has_target } => has_target || self.tab_index.is_some(),
            Role::Button | Role::Input | Role::Select | Role::TextArea => !self.disabled,
            Role::Other => self.tab_index.is_some(),
        }
    }
}

/// A container whose descendants can be trapped.
pub trait FocusContainer {
    type Id: Clone + PartialEq;

    /// Descendants in document (traversal) order.
    fn descendants(&self) -> Vec<Focusable<Self::Id>>;

    /// Ids of the focusable descendants, in traversal order.
    fn focusable_ids(&self) -> Vec<Self::Id> {
        self.descendants()
            .into_iter()
            .filter(Focusable::is_focusable)
            .map(|f| f.id)
            .collect()
    }
}

/// Keys the trap looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKey {
    Tab { shift: bool },
    Escape,
    Other,
}

/// What the owner should do with a key after the trap saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrapOutcome<Id> {
    /// Not handled by the trap; apply the normal behaviour.
    PassThrough,
    /// Swallow the key.
    Suppressed,
    /// Swallow the key and focus this element.
    MoveFocus(Id),
    /// Escape was pressed inside the trap.
    EscapeRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingFocus<Id> {
    First,
    Restore(Option<Id>),
}

#[derive(Debug, Clone)]
pub struct FocusTrap<Id> {
    active: bool,
    previous_focus: Option<Id>,
    delay: Duration,
    timer: TimerSlot,
    pending: Option<PendingFocus<Id>>,
}

impl<Id: Clone + PartialEq> Default for FocusTrap<Id> {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_DELAY)
    }
}

impl<Id: Clone + PartialEq> FocusTrap<Id> {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            active: false,
            previous_focus: None,
            delay,
            timer: TimerSlot::new(),
            pending: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Starts trapping. Records `current_focus` for later restore and
    /// schedules the move to the first focusable descendant.
    ///
    /// Returns `None` when already active.
    pub fn activate(&mut self, current_focus: Option<Id>) -> Option<Ticket> {
        if self.active {
            return None;
        }
        self.active = true;
        self.previous_focus = current_focus;
        self.pending = Some(PendingFocus::First);
        Some(self.timer.schedule(self.delay))
    }

    /// Stops trapping and schedules restoring the recorded focus.
    ///
    /// Returns `None` when already inactive.
    pub fn deactivate(&mut self) -> Option<Ticket> {
        if !self.active {
            return None;
        }
        self.active = false;
        self.pending = Some(PendingFocus::Restore(self.previous_focus.take()));
        Some(self.timer.schedule(self.delay))
    }

    /// Resolves a deferred focus move.
    ///
    /// Returns the element to focus, or `None` if the ticket is stale or
    /// there is nothing to focus.
    pub fn deferred_elapsed<C>(&mut self, generation: u64, container: &C) -> Option<Id>
    where
        C: FocusContainer<Id = Id>,
    {
        if !self.timer.fire(generation) {
            return None;
        }
        match self.pending.take()? {
            PendingFocus::First => container.focusable_ids().into_iter().next(),
            PendingFocus::Restore(previous) => previous,
        }
    }

    /// Routes a key press while the trap may be active.
    pub fn handle_key<C>(&self, key: TrapKey, focused: Option<&Id>, container: &C) -> TrapOutcome<Id>
    where
        C: FocusContainer<Id = Id>,
    {
        if !self.active {
            return TrapOutcome::PassThrough;
        }

        match key {
            TrapKey::Escape => TrapOutcome::EscapeRequested,
            TrapKey::Other => TrapOutcome::PassThrough,
            TrapKey::Tab { shift } => {
                let ids = container.focusable_ids();
                let (Some(first), Some(last)) = (ids.first(), ids.last()) else {
                    return TrapOutcome::Suppressed;
                };
                match (shift, focused) {
                    (true, Some(f)) if f == first => TrapOutcome::MoveFocus(last.clone()),
                    (false, Some(f)) if f == last => TrapOutcome::MoveFocus(first.clone()),
                    _ => TrapOutcome::PassThrough,
                }
            }
        }
    }
}

/// Default traversal step used when the trap passes Tab through.
///
/// Moves one position forward (or backward with `shift`) among `order`.
/// Focus outside `order` lands on the first (or last) element.
#[must_use]
pub fn traverse<Id: Clone + PartialEq>(order: &[Id], focused: Option<&Id>, shift: bool) -> Option<Id> {
    let position = focused.and_then(|f| order.iter().position(|id| id == f));
    let index = match (position, shift) {
        (None, false) => 0,
        (None, true) => order.len().checked_sub(1)?,
        (Some(i), false) => (i + 1) % order.len(),
        (Some(i), true) => (i + order.len() - 1) % order.len(),
    };
    order.get(index).cloned()
}
