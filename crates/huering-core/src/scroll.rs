//! Window-level scroll suppression while the handle is dragged.
//!
//! Touch dragging on a web page scrolls the page unless the `touchmove`
//! default is prevented. The picker registers one window listener on mount
//! that consults a shared [`DragGate`] and removes it again on unmount.
//! Platforms plug in through [`ScrollBlocker`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared flag telling the window listener whether a drag is in progress.
#[derive(Debug, Clone, Default)]
pub struct DragGate(Rc<Cell<bool>>);

impl DragGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, dragging: bool) {
        self.0.set(dragging);
    }

    pub fn is_dragging(&self) -> bool {
        self.0.get()
    }
}

/// Identifier of a registered window listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// A window that can host touch-move scroll listeners.
pub trait ScrollBlocker {
    /// Register a touch-move listener that prevents scrolling while `gate`
    /// reports a drag.
    fn attach(&self, gate: DragGate) -> ListenerId;

    /// Remove a listener previously returned by [`ScrollBlocker::attach`].
    fn detach(&self, id: ListenerId);
}

/// Owns one registered listener and removes it when dropped.
pub struct ScrollGuard {
    blocker: Rc<dyn ScrollBlocker>,
    id: ListenerId,
}

impl ScrollGuard {
    /// Register a listener on `blocker` for `gate`.
    pub fn acquire(blocker: Rc<dyn ScrollBlocker>, gate: DragGate) -> Self {
        let id = blocker.attach(gate);
        log::debug!("Scroll listener {:?} attached", id);
        Self { blocker, id }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for ScrollGuard {
    fn drop(&mut self) {
        self.blocker.detach(self.id);
        log::debug!("Scroll listener {:?} detached", self.id);
    }
}

impl std::fmt::Debug for ScrollGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollGuard").field("id", &self.id).finish()
    }
}

/// In-process window used natively and in tests.
///
/// Native windows have no page to scroll, so dispatching is only observed,
/// never acted on.
#[derive(Debug, Default)]
pub struct MemoryScrollBlocker {
    listeners: RefCell<Vec<(ListenerId, DragGate)>>,
    next_id: Cell<u64>,
}

impl MemoryScrollBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Simulate a window touch-move. Returns true if any listener prevented
    /// the default scroll.
    pub fn dispatch_touch_move(&self) -> bool {
        self.listeners
            .borrow()
            .iter()
            .any(|(_, gate)| gate.is_dragging())
    }
}

impl ScrollBlocker for MemoryScrollBlocker {
    fn attach(&self, gate: DragGate) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, gate));
        id
    }

    fn detach(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(existing, _)| *existing != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_detaches_on_drop() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let guard = ScrollGuard::acquire(window.clone(), DragGate::new());
        assert_eq!(window.listener_count(), 1);
        drop(guard);
        assert_eq!(window.listener_count(), 0);
    }

    #[test]
    fn test_dispatch_follows_gate() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let gate = DragGate::new();
        let _guard = ScrollGuard::acquire(window.clone(), gate.clone());

        assert!(!window.dispatch_touch_move());
        gate.set(true);
        assert!(window.dispatch_touch_move());
        gate.set(false);
        assert!(!window.dispatch_touch_move());
    }

    #[test]
    fn test_listener_ids_are_unique() {
        let window = Rc::new(MemoryScrollBlocker::new());
        let a = ScrollGuard::acquire(window.clone(), DragGate::new());
        let b = ScrollGuard::acquire(window.clone(), DragGate::new());
        assert_ne!(a.id(), b.id());
        drop(a);
        assert_eq!(window.listener_count(), 1);
        drop(b);
        assert_eq!(window.listener_count(), 0);
    }
}
