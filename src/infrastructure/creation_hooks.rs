use crate::domain::events::OrderCreated;
use crate::domain::ports::OrderCreatedHook;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// Dispatches record-creation events to registered hooks.
///
/// The host platform calls [`CreationHookRegistry::dispatch_order_created`]
/// after persisting an order. Hooks run in registration order; a failing hook
/// is logged and does not stop the remaining hooks, and no error ever reaches
/// the creation path.
pub struct CreationHookRegistry {
    hooks: Arc<RwLock<Vec<Arc<dyn OrderCreatedHook>>>>,
}

impl CreationHookRegistry {
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Register a hook
    pub async fn register(&self, hook: Arc<dyn OrderCreatedHook>) {
        let mut hooks = self.hooks.write().await;
        hooks.push(hook);
    }

    /// Invoke every registered hook for a newly created order.
    pub async fn dispatch_order_created(&self, event: &OrderCreated) {
        let hooks = self.hooks.read().await;

        debug!(
            event_id = %event.metadata.event_id,
            order_id = event.order.id,
            hook_count = hooks.len(),
            "Dispatching order-created event"
        );

        for hook in hooks.iter() {
            if let Err(e) = hook.on_order_created(event).await {
                error!(hook = hook.name(), error = %e, "Order-created hook failed");
            }
        }
    }

    pub async fn hook_count(&self) -> usize {
        let hooks = self.hooks.read().await;
        hooks.len()
    }
}

impl Default for CreationHookRegistry {
    fn default() -> Self {
        Self::new()
    }
}
