use std::collections::BTreeMap;

use crate::domain::validation::{Problems, ValidationError};
use crate::domain::value::{FinancialAccountId, IdempotencyKey, Money};

/// Line item type used for ad-hoc items that are not backed by a catalog product.
pub const LINE_ITEM_KIND_CUSTOM: &str = "custom";

#[derive(Debug, Clone)]
/// Command for `POST /financial-accounts`.
pub struct CreateFinancialAccount {
    name: String,
    currency: String,
    reference: String,
    description: Option<String>,
    metadata: BTreeMap<String, String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl CreateFinancialAccount {
    /// Validate and build the command. All missing fields are reported at once.
    pub fn new(
        name: impl Into<String>,
        currency: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let currency = currency.into();
        let reference = reference.into();

        let mut problems = Problems::new();
        problems.require("currency", &currency);
        problems.require("name", &name);
        problems.require("reference", &reference);
        problems.finish()?;

        Ok(Self {
            name: name.trim().to_owned(),
            currency: currency.trim().to_owned(),
            reference: reference.trim().to_owned(),
            description: None,
            metadata: BTreeMap::new(),
            idempotency_key: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Pin the idempotency key; otherwise a random one is generated per call.
    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }
}

#[derive(Debug, Clone)]
/// Command for `PUT /financial-accounts/{id}`.
///
/// The id travels in the path only; the body carries the remaining fields.
pub struct UpdateFinancialAccount {
    id: FinancialAccountId,
    name: String,
    currency: String,
    reference: String,
    metadata: BTreeMap<String, String>,
    idempotency_key: Option<IdempotencyKey>,
}

impl UpdateFinancialAccount {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        currency: impl Into<String>,
        reference: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let name = name.into();
        let currency = currency.into();
        let reference = reference.into();

        let mut problems = Problems::new();
        problems.require("id", &id);
        problems.require("currency", &currency);
        problems.require("name", &name);
        problems.require("reference", &reference);
        problems.finish()?;

        Ok(Self {
            id: FinancialAccountId::new(id)?,
            name: name.trim().to_owned(),
            currency: currency.trim().to_owned(),
            reference: reference.trim().to_owned(),
            metadata: BTreeMap::new(),
            idempotency_key: None,
        })
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_idempotency_key(mut self, key: IdempotencyKey) -> Self {
        self.idempotency_key = Some(key);
        self
    }

    pub fn id(&self) -> &FinancialAccountId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    pub fn idempotency_key(&self) -> Option<&IdempotencyKey> {
        self.idempotency_key.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A line item of a checkout session.
///
/// Built freely; [`LineItem::validate`] runs when the item is attached to a
/// [`CreateCheckoutSession`] so that every broken item is reported with its index.
pub struct LineItem {
    pub kind: String,
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub reference: String,
    pub price: Money,
    pub description: Option<String>,
}

impl LineItem {
    /// Build and validate a line item of any `kind`.
    pub fn new(
        kind: impl Into<String>,
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        reference: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            kind: kind.into(),
            id: id.into(),
            name: name.into(),
            quantity,
            reference: reference.into(),
            price,
            description: None,
        };
        item.validate()?;
        Ok(item)
    }

    /// A `custom` line item.
    ///
    /// Unlike [`LineItem::new`] this does not validate; problems surface from
    /// [`CreateCheckoutSession::new`] with the item's index.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: u32,
        reference: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            kind: LINE_ITEM_KIND_CUSTOM.to_owned(),
            id: id.into(),
            name: name.into(),
            quantity,
            reference: reference.into(),
            price,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Problems::new();
        problems.require("type", &self.kind);
        problems.require("id", &self.id);
        problems.require("name", &self.name);
        problems.require_positive("quantity", i64::from(self.quantity));
        problems.require("reference", &self.reference);
        problems.require("price.currency", &self.price.currency);
        problems.require_positive("price.value", self.price.value);
        problems.finish()
    }
}

#[derive(Debug, Clone, Default)]
/// Optional settings for [`CreateCheckoutSession`].
pub struct CheckoutSessionOptions {
    pub description: Option<String>,
    /// Opaque value echoed back to the redirect URLs.
    pub callback_state: Option<String>,
    /// Hex color for the hosted page, for example `#1A73E8`.
    pub branding_primary_color: Option<String>,
    pub metadata: BTreeMap<String, String>,
    pub idempotency_key: Option<IdempotencyKey>,
}

#[derive(Debug, Clone)]
/// Command for `POST /checkout-sessions`.
pub struct CreateCheckoutSession {
    name: String,
    reference: String,
    financial_account_id: FinancialAccountId,
    success_url: String,
    cancel_url: String,
    line_items: Vec<LineItem>,
    options: CheckoutSessionOptions,
}

impl CreateCheckoutSession {
    /// Validate and build the command.
    ///
    /// Requires `name`, `reference`, `financialAccountId`, parseable `successUrl`/`cancelUrl`
    /// and at least one valid line item. All problems are reported at once.
    pub fn new(
        name: impl Into<String>,
        reference: impl Into<String>,
        financial_account_id: impl Into<String>,
        success_url: impl Into<String>,
        cancel_url: impl Into<String>,
        line_items: Vec<LineItem>,
        options: CheckoutSessionOptions,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let reference = reference.into();
        let financial_account_id = financial_account_id.into();
        let success_url = success_url.into();
        let cancel_url = cancel_url.into();

        let mut problems = Problems::new();
        problems.require("name", &name);
        problems.require("reference", &reference);
        problems.require(FinancialAccountId::FIELD, &financial_account_id);
        problems.require_url("successUrl", &success_url);
        problems.require_url("cancelUrl", &cancel_url);

        if line_items.is_empty() {
            problems.push(ValidationError::NoLineItems);
        }
        for (index, item) in line_items.iter().enumerate() {
            if let Err(err) = item.validate() {
                problems.push(ValidationError::LineItem {
                    index,
                    source: Box::new(err),
                });
            }
        }
        problems.finish()?;

        Ok(Self {
            name: name.trim().to_owned(),
            reference: reference.trim().to_owned(),
            financial_account_id: FinancialAccountId::new(financial_account_id)?,
            success_url: success_url.trim().to_owned(),
            cancel_url: cancel_url.trim().to_owned(),
            line_items,
            options,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn financial_account_id(&self) -> &FinancialAccountId {
        &self.financial_account_id
    }

    /// Redirect target after payment, as given (trimmed, not normalized).
    pub fn success_url(&self) -> &str {
        &self.success_url
    }

    pub fn cancel_url(&self) -> &str {
        &self.cancel_url
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn options(&self) -> &CheckoutSessionOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Cursor pagination for list endpoints.
pub struct ListOptions {
    /// Page size; the server default applies when `None`.
    pub limit: Option<u32>,
    /// Cursor from [`Pagination::next`](crate::domain::Pagination::next) of the previous page.
    pub after: Option<String>,
}

impl ListOptions {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            after: None,
        }
    }

    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }
}
