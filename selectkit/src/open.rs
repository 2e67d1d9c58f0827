//! Open/closed state of the option surface.
//!
//! All transitions go through [`next_state`]. [`OpenMachine`] applies them and
//! ties the global listeners to the `Open` state: entering `Open` acquires
//! them, every path into `Closed` (and teardown) releases them.

use crate::surface::{InputSurface, ListenerGuard, ListenerKind, WidgetId};

/// Visibility of the option surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Open,
}

impl OpenState {
    pub fn is_open(&self) -> bool {
        matches!(self, OpenState::Open)
    }
}

/// Something that may change the open state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenTrigger {
    /// Pointer activation of the trigger. Toggles.
    TriggerActivated,
    /// `Enter` on the focused trigger, or focus moving onto an option.
    EnterPressed,
    /// A selection was committed.
    SelectionCommitted,
    /// Pointer interaction outside the widget bounds.
    OutsidePointer,
    /// `Escape` while open.
    Escape,
    /// Explicit close from the host.
    Close,
    /// Widget teardown.
    Teardown,
}

/// The transition table.
///
/// `closes_on_commit` is false for multi-select, which stays open after a
/// toggle so more options can be picked.
pub fn next_state(state: OpenState, trigger: OpenTrigger, closes_on_commit: bool) -> OpenState {
    use OpenState::*;
    use OpenTrigger::*;

    match (state, trigger) {
        (Closed, TriggerActivated) | (Closed, EnterPressed) => Open,
        (Open, TriggerActivated) => Closed,
        (Open, EnterPressed) => Open,
        (Open, SelectionCommitted) if closes_on_commit => Closed,
        (Open, SelectionCommitted) => Open,
        (Open, OutsidePointer) | (Open, Escape) | (Open, Close) | (Open, Teardown) => Closed,
        (Closed, _) => Closed,
    }
}

/// Global listeners held while open.
#[derive(Debug)]
struct ListenerPair {
    click: ListenerGuard,
    key_down: Option<ListenerGuard>,
}

impl ListenerPair {
    fn release(&mut self) {
        self.click.release();
        if let Some(guard) = self.key_down.as_mut() {
            guard.release();
        }
    }
}

/// Applies [`next_state`] and manages the listener lifetime.
#[derive(Debug)]
pub struct OpenMachine {
    owner: WidgetId,
    surface: InputSurface,
    state: OpenState,
    listeners: Option<ListenerPair>,
    listen_for_escape: bool,
}

impl OpenMachine {
    pub fn new(owner: WidgetId, surface: InputSurface, listen_for_escape: bool) -> Self {
        Self {
            owner,
            surface,
            state: OpenState::Closed,
            listeners: None,
            listen_for_escape,
        }
    }

    pub fn state(&self) -> OpenState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Whether this machine holds a global listener of `kind`.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        match (&self.listeners, kind) {
            (Some(_), ListenerKind::Click) => true,
            (Some(pair), ListenerKind::KeyDown) => pair.key_down.is_some(),
            (None, _) => false,
        }
    }

    /// Apply a trigger. Returns the new state if it changed.
    pub fn fire(&mut self, trigger: OpenTrigger, closes_on_commit: bool) -> Option<OpenState> {
        let from = self.state;
        let to = next_state(from, trigger, closes_on_commit);

        if trigger == OpenTrigger::Teardown {
            // Unconditional, even if already closed.
            self.release();
        }
        if from == to {
            return None;
        }

        log::debug!("OpenMachine {}: {:?} -> {:?} on {:?}", self.owner, from, to, trigger);
        self.state = to;
        match to {
            OpenState::Open => self.acquire(),
            OpenState::Closed => self.release(),
        }
        Some(to)
    }

    fn acquire(&mut self) {
        // Re-entering Open never stacks a second pair.
        self.release();
        let click = self.surface.attach(self.owner, ListenerKind::Click);
        let key_down = self
            .listen_for_escape
            .then(|| self.surface.attach(self.owner, ListenerKind::KeyDown));
        self.listeners = Some(ListenerPair { click, key_down });
    }

    fn release(&mut self) {
        if let Some(mut pair) = self.listeners.take() {
            pair.release();
        }
    }
}

impl Drop for OpenMachine {
    fn drop(&mut self) {
        self.release();
    }
}
