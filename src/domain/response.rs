use std::collections::BTreeMap;

use crate::domain::value::{CheckoutSessionId, FinancialAccountId, Money};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub count: u64,
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
/// One page of a list endpoint.
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub messages: Vec<String>,
}

impl<T> Page<T> {
    /// Cursor for the following page, if the server reported one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.pagination.next.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub available: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialAccount {
    pub id: FinancialAccountId,
    pub name: String,
    pub currency: String,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub balance: Option<Balance>,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_time: Option<String>,
    pub updated_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutLineItem {
    pub kind: Option<String>,
    pub id: Option<String>,
    pub name: String,
    pub quantity: u32,
    pub reference: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Per-channel payment settings; contents are passed through untouched.
pub struct PaymentOptions {
    pub card: Option<serde_json::Value>,
    pub bank: Option<serde_json::Value>,
    pub momo: Option<serde_json::Value>,
    pub wallet: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrandingOptions {
    pub primary_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    pub id: CheckoutSessionId,
    pub name: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub cancel_url: Option<String>,
    pub success_url: Option<String>,
    pub callback_state: Option<String>,
    pub reference: Option<String>,
    /// Hosted payment page the customer should be sent to.
    pub redirect_url: Option<String>,
    pub financial_account_id: Option<FinancialAccountId>,
    pub line_items: Vec<CheckoutLineItem>,
    pub payment_options: PaymentOptions,
    pub branding_options: BrandingOptions,
    pub metadata: BTreeMap<String, serde_json::Value>,
    pub created_time: Option<String>,
    pub expire_time: Option<String>,
}
