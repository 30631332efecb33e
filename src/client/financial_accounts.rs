use reqwest::Method;

use super::{ApiCall, MonimeClient, MonimeError, encode_error, into_page, into_result, parse_error};
use crate::domain::{
    CreateFinancialAccount, FinancialAccount, FinancialAccountId, IdempotencyKey, ListOptions,
    Page, UpdateFinancialAccount,
};
use crate::transport;

const RESOURCE: &str = "financial-accounts";

/// Financial account endpoints, borrowed from a [`MonimeClient`].
#[derive(Clone, Copy)]
pub struct FinancialAccounts<'a> {
    client: &'a MonimeClient,
}

impl<'a> FinancialAccounts<'a> {
    pub(super) fn new(client: &'a MonimeClient) -> Self {
        Self { client }
    }

    /// Create a financial account (`POST /financial-accounts`).
    ///
    /// Sends the command's idempotency key, or a freshly generated one.
    #[tracing::instrument(
        name = "monime.financial_accounts.create",
        skip_all,
        fields(reference = request.reference())
    )]
    pub async fn create(
        &self,
        request: CreateFinancialAccount,
    ) -> Result<FinancialAccount, MonimeError> {
        let body =
            transport::encode_create_financial_account_body(&request).map_err(encode_error)?;
        let key = request
            .idempotency_key()
            .cloned()
            .unwrap_or_else(IdempotencyKey::generate);

        let json = self
            .client
            .execute(
                ApiCall::new(Method::POST, vec![RESOURCE])
                    .json(body)
                    .idempotency_key(key),
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to create financial account"))?;

        let account = transport::decode_financial_account_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!(id = %account.id, "financial account created");
        Ok(account)
    }

    /// Fetch one financial account (`GET /financial-accounts/{id}`).
    #[tracing::instrument(name = "monime.financial_accounts.get", skip_all, fields(id = %id))]
    pub async fn get(&self, id: &FinancialAccountId) -> Result<FinancialAccount, MonimeError> {
        let json = self
            .client
            .execute(ApiCall::new(Method::GET, vec![RESOURCE, id.as_str()]))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to get financial account"))?;

        let account = transport::decode_financial_account_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!("financial account fetched");
        Ok(account)
    }

    /// List financial accounts (`GET /financial-accounts`), one page at a time.
    #[tracing::instrument(name = "monime.financial_accounts.list", skip_all)]
    pub async fn list(&self, options: ListOptions) -> Result<Page<FinancialAccount>, MonimeError> {
        let json = self
            .client
            .execute(
                ApiCall::new(Method::GET, vec![RESOURCE])
                    .query(transport::encode_list_query(&options)),
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to list financial accounts"))?;

        let page = transport::decode_financial_account_list_response(&json)
            .map_err(parse_error)
            .and_then(into_page)?;
        tracing::info!(
            count = page.pagination.count,
            next = page.next_cursor(),
            "financial accounts fetched"
        );
        Ok(page)
    }

    /// Replace a financial account's details (`PUT /financial-accounts/{id}`).
    #[tracing::instrument(
        name = "monime.financial_accounts.update",
        skip_all,
        fields(id = %request.id())
    )]
    pub async fn update(
        &self,
        request: UpdateFinancialAccount,
    ) -> Result<FinancialAccount, MonimeError> {
        let body =
            transport::encode_update_financial_account_body(&request).map_err(encode_error)?;
        let key = request
            .idempotency_key()
            .cloned()
            .unwrap_or_else(IdempotencyKey::generate);

        let json = self
            .client
            .execute(
                ApiCall::new(Method::PUT, vec![RESOURCE, request.id().as_str()])
                    .json(body)
                    .idempotency_key(key),
            )
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to update financial account"))?;

        let account = transport::decode_financial_account_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!("financial account updated");
        Ok(account)
    }

    /// Delete a financial account (`DELETE /financial-accounts/{id}`).
    #[tracing::instrument(name = "monime.financial_accounts.delete", skip_all, fields(id = %id))]
    pub async fn delete(&self, id: &FinancialAccountId) -> Result<(), MonimeError> {
        let json = self
            .client
            .execute(ApiCall::new(Method::DELETE, vec![RESOURCE, id.as_str()]))
            .await
            .inspect_err(|err| tracing::error!(error = %err, "failed to delete financial account"))?;

        transport::decode_empty_response(&json)
            .map_err(parse_error)
            .and_then(into_result)?;
        tracing::info!("financial account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{FakeTransport, make_client};
    use super::*;

    const ACCOUNT_JSON: &str = r#"
    {
      "success": true,
      "messages": [],
      "result": {
        "id": "fac-1",
        "name": "Main",
        "currency": "SLE",
        "reference": "acc-1",
        "balance": { "available": { "currency": "SLE", "value": 0 } }
      }
    }
    "#;

    #[tokio::test]
    async fn create_posts_body_with_generated_idempotency_key() {
        let transport = FakeTransport::new(201, ACCOUNT_JSON);
        let client = make_client(transport.clone());

        let request = CreateFinancialAccount::new("Main", "SLE", "acc-1").unwrap();
        let account = client.financial_accounts().create(request).await.unwrap();
        assert_eq!(account.id.as_str(), "fac-1");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::POST);
        assert_eq!(
            sent.url.as_str(),
            "https://example.invalid/v1/financial-accounts"
        );
        assert_eq!(
            transport.body_json(),
            serde_json::json!({ "name": "Main", "currency": "SLE", "reference": "acc-1" })
        );
        let key = transport.header("Idempotency-Key").unwrap();
        assert!(uuid::Uuid::parse_str(&key).is_ok());
    }

    #[tokio::test]
    async fn create_passes_caller_idempotency_key_through() {
        let transport = FakeTransport::new(200, ACCOUNT_JSON);
        let client = make_client(transport.clone());

        let request = CreateFinancialAccount::new("Main", "SLE", "acc-1")
            .unwrap()
            .with_idempotency_key(IdempotencyKey::new("retry-7").unwrap());
        client.financial_accounts().create(request).await.unwrap();

        transport.assert_header("Idempotency-Key", "retry-7");
    }

    #[tokio::test]
    async fn get_uses_id_path() {
        let transport = FakeTransport::new(200, ACCOUNT_JSON);
        let client = make_client(transport.clone());

        let id = FinancialAccountId::new("fac-1").unwrap();
        let account = client.financial_accounts().get(&id).await.unwrap();
        assert_eq!(account.name, "Main");

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(
            sent.url.as_str(),
            "https://example.invalid/v1/financial-accounts/fac-1"
        );
        assert_eq!(transport.header("Idempotency-Key"), None);
    }

    #[tokio::test]
    async fn get_maps_not_found() {
        let body = r#"{ "success": false, "error": { "code": 404, "reason": "not_found" } }"#;
        let client = make_client(FakeTransport::new(404, body));

        let id = FinancialAccountId::new("fac-missing").unwrap();
        let err = client.financial_accounts().get(&id).await.unwrap_err();
        assert_eq!(err.kind(), Some(crate::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn list_sends_pagination_query_and_returns_page() {
        let json = r#"
        {
          "success": true,
          "messages": [],
          "result": [
            { "id": "fac-1", "name": "A", "currency": "SLE" },
            { "id": "fac-2", "name": "B", "currency": "USD" }
          ],
          "pagination": { "count": 2, "next": "fac-2" }
        }
        "#;
        let transport = FakeTransport::new(200, json);
        let client = make_client(transport.clone());

        let page = client
            .financial_accounts()
            .list(ListOptions::limit(2).after("fac-0"))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.next_cursor(), Some("fac-2"));

        let sent = transport.last_request().unwrap();
        assert_eq!(
            sent.url.as_str(),
            "https://example.invalid/v1/financial-accounts?limit=2&after=fac-0"
        );
    }

    #[tokio::test]
    async fn list_maps_unsuccessful_envelope_to_api_error() {
        let json = r#"{ "success": false, "messages": ["space suspended"], "result": null }"#;
        let client = make_client(FakeTransport::new(200, json));

        let err = client
            .financial_accounts()
            .list(ListOptions::default())
            .await
            .unwrap_err();
        match err {
            MonimeError::Api { messages } => assert_eq!(messages, vec!["space suspended"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_puts_body_without_id() {
        let transport = FakeTransport::new(200, ACCOUNT_JSON);
        let client = make_client(transport.clone());

        let request = UpdateFinancialAccount::new("fac-1", "Renamed", "SLE", "acc-1")
            .unwrap()
            .with_metadata("team", "ops");
        client.financial_accounts().update(request).await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(
            sent.url.as_str(),
            "https://example.invalid/v1/financial-accounts/fac-1"
        );
        assert_eq!(
            transport.body_json(),
            serde_json::json!({
                "name": "Renamed",
                "currency": "SLE",
                "reference": "acc-1",
                "metadata": { "team": "ops" }
            })
        );
        assert!(transport.header("Idempotency-Key").is_some());
    }

    #[tokio::test]
    async fn delete_accepts_empty_body() {
        let transport = FakeTransport::new(204, "");
        let client = make_client(transport.clone());

        let id = FinancialAccountId::new("fac-1").unwrap();
        client.financial_accounts().delete(&id).await.unwrap();
        assert_eq!(transport.last_request().unwrap().method, Method::DELETE);
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let client = make_client(FakeTransport::new(200, "{ not json }"));
        let id = FinancialAccountId::new("fac-1").unwrap();
        let err = client.financial_accounts().get(&id).await.unwrap_err();
        assert!(matches!(err, MonimeError::Parse(_)));
    }
}
