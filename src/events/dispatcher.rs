use std::fmt;

use indexmap::IndexMap;

use crate::surface::NodeId;

/// Payload deliverable through a widget dispatcher.
pub trait NamedEvent {
    /// Wire-level event name listeners subscribe to.
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct HandlerKey {
    event: &'static str,
    namespace: String,
}

type Handler<E> = Box<dyn FnMut(NodeId, &E)>;

/// Named-event registry private to one widget instance.
///
/// Handlers are keyed by `(event, namespace)`. Registering the same key again
/// replaces the handler in place, keeping its original registration slot.
/// Emission is synchronous and invokes matching handlers in registration
/// order; there is no queuing and no cross-widget delivery.
/// `IndexMap` is used to keep that order deterministic.
pub struct Dispatcher<E> {
    handlers: IndexMap<HandlerKey, Handler<E>>,
}

impl<E> Dispatcher<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }

    /// Registers `handler` for `event` under `namespace`, replacing any
    /// handler previously registered with the same key.
    pub fn on(
        &mut self,
        event: &'static str,
        namespace: impl Into<String>,
        handler: impl FnMut(NodeId, &E) + 'static,
    ) -> &mut Self {
        let key = HandlerKey {
            event,
            namespace: namespace.into(),
        };
        self.handlers.insert(key, Box::new(handler));
        self
    }

    /// Removes the handler registered for `event` under `namespace`, if any.
    pub fn off(&mut self, event: &'static str, namespace: &str) -> &mut Self {
        self.handlers.shift_remove(&HandlerKey {
            event,
            namespace: namespace.to_owned(),
        });
        self
    }

    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E: NamedEvent> Dispatcher<E> {
    /// Synchronously invokes every handler registered for the event's name,
    /// passing the originating node and the payload.
    pub fn emit(&mut self, node: NodeId, event: &E) {
        for (key, handler) in &mut self.handlers {
            if key.event == event.name() {
                handler(node, event);
            }
        }
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.handlers
                    .keys()
                    .map(|key| format!("{}.{}", key.event, key.namespace)),
            )
            .finish()
    }
}
