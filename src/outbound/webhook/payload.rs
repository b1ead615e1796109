use serde::{Deserialize, Serialize};

use crate::domain::order::{Customer, FiscalPosition, OrderLine, OrderState, Payment, PosOrder};

/// JSON document sent to the webhook destination for a newly created order.
///
/// The shape mirrors the host platform's order record. Every key is always
/// present: relations the order does not have are emitted as objects whose
/// sub-fields are null, never as omitted keys, and an order without payments
/// yields an empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPayload {
    pub pos_order_id: i64,

    pub name: String,

    /// Stringified order timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub date_order: String,

    pub state: OrderState,

    pub amount_total: f64,

    pub amount_tax: f64,

    pub amount_paid: f64,

    pub amount_return: f64,

    pub customer: CustomerPayload,

    pub session: SessionPayload,

    pub lines: Vec<LinePayload>,

    pub payments: Vec<PaymentPayload>,

    pub company: PartyRef,

    pub user: PartyRef,

    pub pricelist: PartyRef,

    pub fiscal_position: FiscalPositionPayload,

    pub note: Option<String>,
}

/// Customer block; all fields are null when the order has no customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionPayload {
    pub id: i64,
    pub name: String,
    pub config_id: i64,
    pub config_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinePayload {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_default_code: Option<String>,
    pub qty: f64,
    pub price_unit: f64,
    pub price_subtotal: f64,
    pub price_subtotal_incl: f64,
    pub discount: f64,
    /// Tax references serialized as `[id, name]` pairs.
    pub tax_ids: Vec<(i64, String)>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentPayload {
    pub id: i64,
    /// Name of the payment method.
    pub name: String,
    pub amount: f64,
    pub currency: String,
}

/// id/name reference used for the company, user and pricelist blocks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyRef {
    pub id: i64,
    pub name: String,
}

/// Fiscal position block; both fields are null when the order has none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FiscalPositionPayload {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl OrderPayload {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl From<&PosOrder> for OrderPayload {
    fn from(order: &PosOrder) -> Self {
        Self {
            pos_order_id: order.id,
            name: order.name.clone(),
            date_order: order.date_order.format("%Y-%m-%d %H:%M:%S").to_string(),
            state: order.state,
            amount_total: order.amount_total,
            amount_tax: order.amount_tax,
            amount_paid: order.amount_paid,
            amount_return: order.amount_return,
            customer: CustomerPayload::from(order.customer.as_ref()),
            session: SessionPayload {
                id: order.session.id,
                name: order.session.name.clone(),
                config_id: order.session.config_id,
                config_name: order.session.config_name.clone(),
            },
            lines: order.lines.iter().map(LinePayload::from).collect(),
            payments: order.payments.iter().map(PaymentPayload::from).collect(),
            company: PartyRef {
                id: order.company.id,
                name: order.company.name.clone(),
            },
            user: PartyRef {
                id: order.cashier.id,
                name: order.cashier.name.clone(),
            },
            pricelist: PartyRef {
                id: order.pricelist.id,
                name: order.pricelist.name.clone(),
            },
            fiscal_position: FiscalPositionPayload::from(order.fiscal_position.as_ref()),
            note: order.note.clone(),
        }
    }
}

impl From<Option<&Customer>> for CustomerPayload {
    fn from(customer: Option<&Customer>) -> Self {
        Self {
            id: customer.map(|c| c.id),
            name: customer.map(|c| c.name.clone()),
            email: customer.and_then(|c| c.email.clone()),
            phone: customer.and_then(|c| c.phone.clone()),
            city: customer.and_then(|c| c.city.clone()),
            zip: customer.and_then(|c| c.zip.clone()),
            country_name: customer.and_then(|c| c.country.clone()),
        }
    }
}

impl From<&OrderLine> for LinePayload {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            product_default_code: line.product_default_code.clone(),
            qty: line.qty,
            price_unit: line.price_unit,
            price_subtotal: line.price_subtotal,
            price_subtotal_incl: line.price_subtotal_incl,
            discount: line.discount,
            tax_ids: line.taxes.iter().map(|t| (t.id, t.name.clone())).collect(),
        }
    }
}

impl From<&Payment> for PaymentPayload {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id,
            name: payment.method.clone(),
            amount: payment.amount,
            currency: payment.currency.clone(),
        }
    }
}

impl From<Option<&FiscalPosition>> for FiscalPositionPayload {
    fn from(fiscal_position: Option<&FiscalPosition>) -> Self {
        Self {
            id: fiscal_position.map(|f| f.id),
            name: fiscal_position.map(|f| f.name.clone()),
        }
    }
}
