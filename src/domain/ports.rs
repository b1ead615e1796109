/*
   This module specifies the API by which the host platform's record-creation
   path interacts with the exporter.
*/

use crate::domain::events::OrderCreated;
use async_trait::async_trait;

/// Error type for creation-hook operations
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Failed to handle order creation: {0}")]
    HandlerError(String),
}

/// Trait for reacting to newly created order records.
///
/// Implementations are invoked after the record is durably created; they must
/// treat the order as read-only and must never assume their outcome can still
/// affect the creation transaction.
#[async_trait]
pub trait OrderCreatedHook: Send + Sync {
    async fn on_order_created(&self, event: &OrderCreated) -> Result<(), HookError>;
    fn name(&self) -> &'static str {
        "UnnamedHook"
    }
}
