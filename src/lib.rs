//! Typed Rust client for the Monime payments HTTP API.
//!
//! The crate is split into a domain layer of validated commands and result
//! types, a transport layer for the JSON envelope and its quirks, and a small
//! client layer issuing authenticated requests.
//!
//! ```rust,no_run
//! use monime::{
//!     CheckoutSessionOptions, Config, CreateCheckoutSession, LineItem, Money, MonimeClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), monime::MonimeError> {
//!     let client = MonimeClient::from_config(&Config::from_env()?)?;
//!     let request = CreateCheckoutSession::new(
//!         "Order 42",
//!         "order-42",
//!         "fac-123",
//!         "https://shop.example/success",
//!         "https://shop.example/cancel",
//!         vec![LineItem::custom("sku-1", "T-shirt", 2, "sku-1", Money::new("SLE", 15_000))],
//!         CheckoutSessionOptions::default(),
//!     )?;
//!     let session = client.checkout_sessions().create(request).await?;
//!     println!("{:?}", session.redirect_url);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{
    Auth, CheckoutSessions, ErrorKind, FinancialAccounts, MonimeClient, MonimeClientBuilder,
    MonimeError,
};
pub use config::{Config, ConfigError};
pub use domain::{
    AccessToken, ApiVersion, Balance, BrandingOptions, CheckoutLineItem, CheckoutSession,
    CheckoutSessionId, CheckoutSessionOptions, CreateCheckoutSession, CreateFinancialAccount,
    FinancialAccount, FinancialAccountId, IdempotencyKey, LINE_ITEM_KIND_CUSTOM, LineItem,
    ListOptions, Money, Page, Pagination, PaymentOptions, SpaceId, UpdateFinancialAccount,
    ValidationError,
};
