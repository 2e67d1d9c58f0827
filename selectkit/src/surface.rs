//! Global input surface: the document-level listener registry.
//!
//! Open widgets subscribe here for outside clicks and `Escape`. Each
//! subscription is a [`ListenerGuard`] that unsubscribes when released or
//! dropped, so a widget can never leak a listener past its open state.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::event::{Event, Key};

// =============================================================================
// Ids
// =============================================================================

/// Unique identifier for a select widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    /// Mint a fresh id. Never repeats within a process.
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__select_{}", self.0)
    }
}

/// The kind of global event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Click,
    KeyDown,
}

impl ListenerKind {
    /// The listener kind an event is delivered to, if any.
    pub fn for_event(event: &Event) -> Option<Self> {
        match event {
            Event::Click { .. } => Some(ListenerKind::Click),
            Event::Key { .. } => Some(ListenerKind::KeyDown),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ListenerId(u64);

#[derive(Debug)]
struct Listener {
    id: ListenerId,
    owner: WidgetId,
    kind: ListenerKind,
}

#[derive(Debug, Default)]
struct SurfaceInner {
    listeners: Vec<Listener>,
    next_id: u64,
}

// =============================================================================
// InputSurface
// =============================================================================

/// Shared listener registry. Clones share the same registry.
///
/// # Example
///
/// ```ignore
/// let surface = InputSurface::new();
/// let mut country = Dropdown::single(options).surface(&surface).build()?;
///
/// // In the event loop, deliver document-level events to subscribers:
/// for id in surface.route(&event) {
///     // look up the widget with `id` and call handle_event
/// }
/// ```
#[derive(Clone, Default)]
pub struct InputSurface {
    inner: Arc<RwLock<SurfaceInner>>,
}

impl fmt::Debug for InputSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputSurface")
            .field("listeners", &self.len())
            .finish()
    }
}

impl InputSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `owner` to global events of `kind`.
    pub fn attach(&self, owner: WidgetId, kind: ListenerKind) -> ListenerGuard {
        let id = match self.inner.write() {
            Ok(mut guard) => {
                let id = ListenerId(guard.next_id);
                guard.next_id += 1;
                guard.listeners.push(Listener { id, owner, kind });
                Some(id)
            }
            Err(_) => None,
        };
        log::debug!("InputSurface: attach {:?} listener for {}", kind, owner);
        ListenerGuard {
            surface: self.clone(),
            id,
            owner,
            kind,
        }
    }

    /// Remove a listener. Returns false if it was already gone.
    fn detach(&self, id: ListenerId) -> bool {
        if let Ok(mut guard) = self.inner.write() {
            let before = guard.listeners.len();
            guard.listeners.retain(|l| l.id != id);
            return guard.listeners.len() != before;
        }
        false
    }

    /// Whether `owner` currently holds a listener of `kind`.
    pub fn is_attached(&self, owner: WidgetId, kind: ListenerKind) -> bool {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .listeners
                    .iter()
                    .any(|l| l.owner == owner && l.kind == kind)
            })
            .unwrap_or(false)
    }

    /// Owners subscribed to `kind`, in subscription order.
    pub fn listeners(&self, kind: ListenerKind) -> Vec<WidgetId> {
        self.inner
            .read()
            .map(|guard| {
                guard
                    .listeners
                    .iter()
                    .filter(|l| l.kind == kind)
                    .map(|l| l.owner)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Owners that should see `event` as a document-level event.
    ///
    /// Key listeners only care about `Escape`, so other keys route nowhere.
    pub fn route(&self, event: &Event) -> Vec<WidgetId> {
        match event {
            Event::Key {
                key: Key::Escape, ..
            }
            | Event::Click { .. } => ListenerKind::for_event(event)
                .map(|kind| self.listeners(kind))
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Number of active listeners.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .map(|guard| guard.listeners.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// ListenerGuard
// =============================================================================

/// An active subscription. Unsubscribes on [`release`](Self::release) or drop.
pub struct ListenerGuard {
    surface: InputSurface,
    id: Option<ListenerId>,
    owner: WidgetId,
    kind: ListenerKind,
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("owner", &self.owner)
            .field("kind", &self.kind)
            .field("active", &self.id.is_some())
            .finish()
    }
}

impl ListenerGuard {
    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Unsubscribe now. Safe to call more than once.
    pub fn release(&mut self) {
        if let Some(id) = self.id.take()
            && self.surface.detach(id)
        {
            log::debug!(
                "InputSurface: detach {:?} listener for {}",
                self.kind,
                self.owner
            );
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}
