//! Window-level gesture notifications.
//!
//! A drag that starts on the tab strip has to keep tracking after the pointer
//! leaves it, so move and release events are observed globally and fanned out
//! to whoever subscribed. Subscriptions are scoped: dropping the handle
//! removes the listener.

use crate::drag::PointerKind;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    PointerUp,
    PointerLeave,
    TouchEnd,
    TouchCancel,
    FocusLost,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start {
        kind: PointerKind,
        pointer_x: f64,
        container_left: f64,
        scroll_offset: f64,
    },
    Move {
        kind: PointerKind,
        pointer_x: f64,
        container_left: f64,
    },
    End(EndReason),
}

impl GestureEvent {
    /// Whether the host should swallow its default handling of this event
    pub fn suppresses_default(&self) -> bool {
        match self {
            GestureEvent::Move { kind, .. } => kind.suppresses_default(),
            _ => false,
        }
    }
}

pub trait GestureListener {
    /// React to a gesture notification, optionally yielding a scroll offset
    fn on_gesture(&mut self, event: &GestureEvent) -> Option<f64>;
}

type SharedListener = Rc<RefCell<dyn GestureListener>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, SharedListener)>,
}

/// Listener registry for globally observed gesture events.
///
/// Single-threaded: events are dispatched to completion one at a time.
#[derive(Default, Clone)]
pub struct GestureListeners {
    registry: Rc<RefCell<Registry>>,
}

impl GestureListeners {
    pub fn new() -> Self {
        GestureListeners::default()
    }

    /// Register `listener` until the returned [`Subscription`] is dropped
    #[must_use = "dropping the subscription removes the listener immediately"]
    pub fn subscribe<L>(&self, listener: Rc<RefCell<L>>) -> Subscription
    where
        L: GestureListener + 'static,
    {
        let listener: SharedListener = listener;
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push((id, listener));
        tracing::debug!(listener = id, "gesture listener attached");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver `event` to every live listener in registration order and
    /// collect the scroll offsets they produced
    pub fn dispatch(&self, event: &GestureEvent) -> Vec<f64> {
        // Snapshot so listeners may drop subscriptions while handling.
        let listeners: Vec<SharedListener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        listeners
            .iter()
            .filter_map(|listener| listener.borrow_mut().on_gesture(event))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Registration handle returned by [`GestureListeners::subscribe`]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
            tracing::debug!(listener = self.id, "gesture listener detached");
        }
    }
}
