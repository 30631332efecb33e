use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Clone, PartialEq, Eq, Hash)]
/// Monime access token, sent as `Authorization: Bearer <token>`.
///
/// Invariant: non-empty after trimming. `Debug` never prints the token.
pub struct AccessToken(String);

impl AccessToken {
    /// Configuration key for the token (`access_token`).
    pub const FIELD: &'static str = "access_token";

    /// Create a validated [`AccessToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Monime space id (`Monime-Space-Id` header).
///
/// Invariant: non-empty after trimming.
pub struct SpaceId(String);

impl SpaceId {
    /// Configuration key for the space id (`space_id`).
    pub const FIELD: &'static str = "space_id";

    /// Create a validated [`SpaceId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated space id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// API version pin sent as `Monime-Version` (for example `caph.2025-06-20`).
pub struct ApiVersion(String);

impl ApiVersion {
    pub const FIELD: &'static str = "api_version";

    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Financial account id (`fac-...`).
///
/// Invariant: non-empty after trimming.
pub struct FinancialAccountId(String);

impl FinancialAccountId {
    /// Field name used in request bodies (`financialAccountId`).
    pub const FIELD: &'static str = "financialAccountId";

    /// Create a validated [`FinancialAccountId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FinancialAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Checkout session id (`scs-...`).
///
/// Invariant: non-empty after trimming.
pub struct CheckoutSessionId(String);

impl CheckoutSessionId {
    pub const FIELD: &'static str = "id";

    /// Create a validated [`CheckoutSessionId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CheckoutSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Value of the `Idempotency-Key` header sent with write requests.
///
/// The remote API uses it to deduplicate retried writes; this crate only passes it through.
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Header name used by Monime.
    pub const HEADER: &'static str = "Idempotency-Key";

    /// Create a validated key from a caller-chosen value (non-empty after trimming).
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::HEADER,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Generate a random (UUIDv4) key.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Amount in minor units (for example cents) tagged with a currency code.
pub struct Money {
    pub currency: String,
    pub value: i64,
}

impl Money {
    pub fn new(currency: impl Into<String>, value: i64) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }
}
