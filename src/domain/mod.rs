//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    CheckoutSessionOptions, CreateCheckoutSession, CreateFinancialAccount, LINE_ITEM_KIND_CUSTOM,
    LineItem, ListOptions, UpdateFinancialAccount,
};
pub use response::{
    Balance, BrandingOptions, CheckoutLineItem, CheckoutSession, FinancialAccount, Page,
    Pagination, PaymentOptions,
};
pub use validation::ValidationError;
pub use value::{
    AccessToken, ApiVersion, CheckoutSessionId, FinancialAccountId, IdempotencyKey, Money,
    SpaceId,
};
