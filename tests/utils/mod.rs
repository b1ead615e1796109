use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use chrono::{TimeZone, Utc};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use pos_webhook_exporter::config::WebhookConfig;
use pos_webhook_exporter::domain::order::{
    Cashier, Company, Customer, FiscalPosition, OrderLine, OrderState, Payment, PosOrder,
    Pricelist, Session, Tax,
};
use pos_webhook_exporter::infrastructure::creation_hooks::CreationHookRegistry;
use pos_webhook_exporter::outbound::webhook::{
    DeliveryQueue, DeliveryService, DeliveryStats, OrderCreatedNotifier,
};

/// A captured webhook request.
#[derive(Debug, Clone)]
pub struct ReceivedWebhook {
    pub token: String,
    pub body: String,
}

#[derive(Clone)]
struct ReceiverState {
    tx: mpsc::UnboundedSender<ReceivedWebhook>,
}

/// Spawn a local webhook destination on an ephemeral port.
///
/// Routes:
///   POST /:token       – 200, captures the request
///   POST /fail/:token  – 500, captures the request
///   POST /slow/:token  – 200 after a 1 s delay, captures the request
pub async fn spawn_receiver() -> (String, mpsc::UnboundedReceiver<ReceivedWebhook>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let state = ReceiverState { tx };

    let router = Router::new()
        .route("/:token", post(capture))
        .route("/fail/:token", post(capture_fail))
        .route("/slow/:token", post(capture_slow))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind receiver");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Receiver server failed");
    });

    (format!("http://{addr}"), rx)
}

async fn capture(
    State(state): State<ReceiverState>,
    Path(token): Path<String>,
    body: String,
) -> StatusCode {
    let _ = state.tx.send(ReceivedWebhook { token, body });
    StatusCode::OK
}

async fn capture_fail(
    State(state): State<ReceiverState>,
    Path(token): Path<String>,
    body: String,
) -> StatusCode {
    let _ = state.tx.send(ReceivedWebhook { token, body });
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn capture_slow(
    State(state): State<ReceiverState>,
    Path(token): Path<String>,
    body: String,
) -> StatusCode {
    tokio::time::sleep(Duration::from_secs(1)).await;
    let _ = state.tx.send(ReceivedWebhook { token, body });
    StatusCode::OK
}

/// Configuration pointing at a test receiver.
pub fn webhook_config(endpoint_base: &str, token: Option<&str>) -> WebhookConfig {
    WebhookConfig {
        token: token.map(String::from),
        endpoint_base: endpoint_base.to_string(),
        timeout_secs: 5,
        workers: 2,
        queue_capacity: 16,
    }
}

/// Wire up the full export pipeline the way the host platform would:
/// queue, worker pool, notifier, and a hook registry with the notifier
/// registered.
pub async fn start_exporter(config: WebhookConfig) -> (CreationHookRegistry, Arc<DeliveryStats>) {
    let queue = Arc::new(DeliveryQueue::new(config.queue_capacity));
    let stats = Arc::new(DeliveryStats::new());

    let service = Arc::new(
        DeliveryService::new(&config, queue.clone(), stats.clone())
            .expect("Failed to create delivery service"),
    );
    service.start();

    let notifier = Arc::new(OrderCreatedNotifier::new(config, queue, stats.clone()));

    let registry = CreationHookRegistry::new();
    registry.register(notifier).await;

    (registry, stats)
}

/// A fully populated order.
pub fn sample_order() -> PosOrder {
    PosOrder {
        id: 42,
        name: "Shop/0042".to_string(),
        date_order: Utc.with_ymd_and_hms(2026, 8, 7, 12, 34, 56).unwrap(),
        state: OrderState::Paid,
        amount_total: 11.5,
        amount_tax: 1.5,
        amount_paid: 20.0,
        amount_return: 8.5,
        customer: Some(Customer {
            id: 7,
            name: "Ada Lovelace".to_string(),
            email: Some("ada@example.com".to_string()),
            phone: Some("+44 20 7946 0958".to_string()),
            city: Some("London".to_string()),
            zip: Some("EC1A".to_string()),
            country: Some("United Kingdom".to_string()),
        }),
        session: Session {
            id: 3,
            name: "POS/00003".to_string(),
            config_id: 1,
            config_name: "Main Shop".to_string(),
        },
        lines: vec![OrderLine {
            id: 101,
            product_id: 55,
            product_name: "Espresso".to_string(),
            product_default_code: Some("BEV-001".to_string()),
            qty: 2.0,
            price_unit: 5.0,
            price_subtotal: 10.0,
            price_subtotal_incl: 11.5,
            discount: 0.0,
            taxes: vec![Tax {
                id: 1,
                name: "VAT 15%".to_string(),
            }],
        }],
        payments: vec![Payment {
            id: 201,
            method: "Cash".to_string(),
            amount: 20.0,
            currency: "EUR".to_string(),
        }],
        company: Company {
            id: 1,
            name: "Coffee Corner".to_string(),
        },
        cashier: Cashier {
            id: 9,
            name: "Grace Hopper".to_string(),
        },
        pricelist: Pricelist {
            id: 2,
            name: "Public Pricelist".to_string(),
        },
        fiscal_position: Some(FiscalPosition {
            id: 4,
            name: "Domestic".to_string(),
        }),
        note: Some("No sugar".to_string()),
    }
}

/// The same order without customer, payments, fiscal position or note.
pub fn order_without_relations() -> PosOrder {
    PosOrder {
        customer: None,
        payments: Vec::new(),
        fiscal_position: None,
        note: None,
        ..sample_order()
    }
}
