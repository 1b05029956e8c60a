//! Event handler registry.
//!
//! UI events (clicks, drops, field input) are routed through a table of
//! handlers keyed by event kind. Handlers run synchronously, in registration
//! order, against an explicit state value owned by the caller.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// An event that can be routed through a [`HandlerRegistry`].
pub trait Event {
    type Kind: Clone + Eq + Hash + Debug;

    fn kind(&self) -> Self::Kind;
}

/// What a handler wants to happen to the rest of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Run the next handler registered for this kind.
    Continue,
    /// Skip the remaining handlers for this event.
    Stop,
}

/// Handler function type.
pub type Handler<S, E> = Box<dyn Fn(&mut S, &E) -> anyhow::Result<Flow>>;

/// Registry of handlers, keyed by event kind.
pub struct HandlerRegistry<S, E: Event> {
    handlers: HashMap<E::Kind, Vec<Handler<S, E>>>,
}

impl<S, E: Event> HandlerRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for one event kind.
    pub fn register<F>(&mut self, kind: E::Kind, handler: F)
    where
        F: Fn(&mut S, &E) -> anyhow::Result<Flow> + 'static,
    {
        self.handlers.entry(kind).or_default().push(Box::new(handler));
    }

    /// Run every handler registered for the event's kind.
    ///
    /// Returns the number of handlers that ran. A failing handler is logged
    /// and the chain continues.
    pub fn dispatch(&self, state: &mut S, event: &E) -> usize {
        let kind = event.kind();
        let Some(chain) = self.handlers.get(&kind) else {
            tracing::trace!(kind = ?kind, "No handlers registered");
            return 0;
        };

        let mut ran = 0;
        for handler in chain {
            ran += 1;
            match handler(state, event) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Stop) => break,
                Err(e) => {
                    tracing::warn!(kind = ?kind, error = %e, "Event handler error, continuing");
                }
            }
        }
        ran
    }

    /// Return the number of handlers registered for a given kind.
    pub fn count(&self, kind: &E::Kind) -> usize {
        self.handlers.get(kind).map_or(0, |v| v.len())
    }
}

impl<S, E: Event> Default for HandlerRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}
