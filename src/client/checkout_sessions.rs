use reqwest::Method;

use super::{ApiCall, MonimeClient, MonimeError, encode_error, into_page, into_result, parse_error};
use crate::domain::{
    CheckoutSession, CheckoutSessionId, CreateCheckoutSession, IdempotencyKey, ListOptions, Page,
};
use crate::transport;

const RESOURCE: &str = "checkout-sessions";

/// Checkout session endpoints, borrowed from a [`MonimeClient`].
#[derive(Clone, Copy)]
pub struct CheckoutSessions<'a> {
    client: &'a MonimeClient,
}

impl<'a> CheckoutSessions<'a> {
    pub(super) fn new(client: &'a MonimeClient) -> Self {
        Self { client }
    }

    /// Create a hosted checkout session (`POST /checkout-sessions`).
    ///
    /// Redirect the customer to [`CheckoutSession::redirect_url`] of the result.
    #[tracing::instrument(
        name = "monime.checkout_sessions.create",
        skip_all,
        fields(
            reference = request.reference(),
            financial_account_id = %request.financial_account_id(),
            line_items = request.line_items().len()
        )
    )]
    pub async fn create(
        &self,
        request: CreateCheckoutSession,
    ) -> Result<CheckoutSession, MonimeError> {
        let body = transport::encode_create_checkout_session_body(&request).map_err(encode_error)?;
        let key = request
            .options()
            .idempotency_key
            .clone()
            .unwrap_or_else(IdempotencyKey::generate);

        let json = self
            .client
            .execute(
                ApiCall::new(Method::POST, vec![RESOURCE])
                    .json(body)
                    .idempotency_key(key),
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to create checkout session"))?;

        let session = transport::decode_checkout_session_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!(
            id = %session.id,
            redirect_url = session.redirect_url.as_deref(),
            "checkout session created"
        );
        Ok(session)
    }

    #[tracing::instrument(name = "monime.checkout_sessions.get", skip_all, fields(id = %id))]
    pub async fn get(&self, id: &CheckoutSessionId) -> Result<CheckoutSession, MonimeError> {
        let json = self
            .client
            .execute(ApiCall::new(Method::GET, vec![RESOURCE, id.as_str()]))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to get checkout session"))?;

        let session = transport::decode_checkout_session_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!(status = session.status.as_deref(), "checkout session fetched");
        Ok(session)
    }

    #[tracing::instrument(name = "monime.checkout_sessions.list", skip_all)]
    pub async fn list(&self, options: ListOptions) -> Result<Page<CheckoutSession>, MonimeError> {
        let json = self
            .client
            .execute(
                ApiCall::new(Method::GET, vec![RESOURCE])
                    .query(transport::encode_list_query(&options)),
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to list checkout sessions"))?;

        let page = transport::decode_checkout_session_list_response(&json)
            .map_err(parse_error)
            .and_then(into_page)?;
        tracing::info!(
            count = page.pagination.count,
            next = page.next_cursor(),
            "checkout sessions fetched"
        );
        Ok(page)
    }

    /// Delete (cancel) a checkout session that has not been paid.
    #[tracing::instrument(name = "monime.checkout_sessions.delete", skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &CheckoutSessionId) -> Result<(), MonimeError> {
        let json = self
            .client
            .execute(ApiCall::new(Method::DELETE, vec![RESOURCE, id.as_str()]))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to delete checkout session"))?;

        transport::decode_empty_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!("checkout session deleted");
        Ok(())
    }
}
