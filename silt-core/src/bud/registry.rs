//! Kind-to-handler dispatch.

use rustc_hash::FxHashMap;

use super::{Bud, LiquidSpread, UpdateKind, UpdateRequest};

/// A propagation rule for one update kind.
pub trait BudHandler: Send + Sync {
    /// Handles a single drained request.
    ///
    /// The handler may mutate the request's dimension and enqueue follow-up
    /// requests through `bud`; follow-ups land in the pending set and are
    /// never processed before the next tick.
    fn handle(&self, bud: &Bud, request: &UpdateRequest);
}

/// Maps update kinds to their handlers. Built once at startup.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: FxHashMap<UpdateKind, Box<dyn BudHandler>>,
}

impl HandlerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Creates a registry with the built-in handlers: liquid flow on
    /// [`UpdateKind::Normal`].
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(UpdateKind::Normal, Box::new(LiquidSpread));
        registry
    }

    /// Registers (or replaces) the handler for `kind`.
    pub fn register(&mut self, kind: UpdateKind, handler: Box<dyn BudHandler>) {
        self.handlers.insert(kind, handler);
    }

    /// Looks up the handler for `kind`.
    ///
    /// # Panics
    /// Panics if no handler is registered for `kind`. Dispatching an
    /// unregistered kind is a wiring bug, not a runtime condition.
    #[must_use]
    pub fn handler(&self, kind: UpdateKind) -> &dyn BudHandler {
        match self.handlers.get(&kind) {
            Some(handler) => handler.as_ref(),
            None => panic!("no handler registered for update kind {kind:?}"),
        }
    }
}
