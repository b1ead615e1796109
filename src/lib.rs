//! Best-effort webhook export of newly created point-of-sale orders.
//!
//! When the host platform durably creates an order record it calls the
//! [`infrastructure::creation_hooks::CreationHookRegistry`], which hands the
//! order to the [`outbound::webhook::OrderCreatedNotifier`]. The notifier
//! projects the order into a JSON payload and submits it to a bounded
//! delivery queue; a fixed pool of workers performs one HTTP POST per order
//! to the configured destination. Delivery failures are logged and counted,
//! never surfaced to the creation path.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod outbound;
pub mod telemetry;
