use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a point-of-sale order, as recorded by the host
/// platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Draft,
    Paid,
    Done,
    Invoiced,
    Cancel,
}

/// A completed point-of-sale order and its related entities.
///
/// All of this data is owned by the host commerce platform; the exporter
/// projects it read-only into the webhook payload. Monetary amounts stay the
/// floats the host stores so that they are copied faithfully onto the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosOrder {
    pub id: i64,
    pub name: String,
    pub date_order: DateTime<Utc>,
    pub state: OrderState,
    pub amount_total: f64,
    pub amount_tax: f64,
    pub amount_paid: f64,
    pub amount_return: f64,
    pub customer: Option<Customer>,
    pub session: Session,
    pub lines: Vec<OrderLine>,
    pub payments: Vec<Payment>,
    pub company: Company,
    pub cashier: Cashier,
    pub pricelist: Pricelist,
    pub fiscal_position: Option<FiscalPosition>,
    pub note: Option<String>,
}

/// Customer attached to an order, when one was selected at the till.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
}

/// The point-of-sale session the order was registered in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub config_id: i64,
    pub config_name: String,
}

/// One order line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_default_code: Option<String>,
    pub qty: f64,
    pub price_unit: f64,
    pub price_subtotal: f64,
    pub price_subtotal_incl: f64,
    pub discount: f64,
    pub taxes: Vec<Tax>,
}

/// Tax applied to an order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tax {
    pub id: i64,
    pub name: String,
}

/// A payment registered against the order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    /// Name of the payment method (cash, card, ...).
    pub method: String,
    pub amount: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
}

/// The cashier (user) who registered the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cashier {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pricelist {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalPosition {
    pub id: i64,
    pub name: String,
}
