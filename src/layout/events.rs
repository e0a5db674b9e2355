//! Change notifications from solvers to their collaborators.

use std::fmt;

/// What a solver reports after an `advance` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// Positions were updated by `steps` iterations or generations.
    Changed { steps: usize },
    /// Kinetic energy fell below the stability threshold.
    Stable { energy: f64 },
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({})", self.0)
    }
}

type Callback = Box<dyn FnMut(&LayoutEvent)>;

/// Registered event callbacks, invoked in subscription order.
#[derive(Default)]
pub struct Listeners {
    next_id: u32,
    entries: Vec<(ListenerId, Callback)>,
}

impl Listeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for every future event.
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns true if the listener existed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Deliver `event` to every listener.
    pub fn emit(&mut self, event: LayoutEvent) {
        for (_, callback) in &mut self.entries {
            callback(&event);
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
