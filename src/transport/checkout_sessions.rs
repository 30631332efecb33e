use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::envelope::{Outcome, TransportError, decode_envelope};
use super::money::{MoneyBody, TransportMoney};
use crate::domain::{
    BrandingOptions, CheckoutLineItem, CheckoutSession, CheckoutSessionId, CreateCheckoutSession,
    FinancialAccountId, LineItem, PaymentOptions,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCheckoutSessionBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    cancel_url: &'a str,
    success_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    callback_state: Option<&'a str>,
    reference: &'a str,
    financial_account_id: &'a str,
    line_items: Vec<LineItemBody<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    branding_options: Option<BrandingOptionsBody<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, String>>,
}

#[derive(Debug, Serialize)]
struct LineItemBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    id: &'a str,
    name: &'a str,
    quantity: u32,
    reference: &'a str,
    price: MoneyBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BrandingOptionsBody<'a> {
    primary_color: &'a str,
}

impl<'a> From<&'a LineItem> for LineItemBody<'a> {
    fn from(item: &'a LineItem) -> Self {
        Self {
            kind: item.kind.trim(),
            id: item.id.trim(),
            name: item.name.trim(),
            quantity: item.quantity,
            reference: item.reference.trim(),
            price: MoneyBody::from(&item.price),
            description: item.description.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutSessionJson {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    cancel_url: Option<String>,
    #[serde(default)]
    success_url: Option<String>,
    #[serde(default)]
    callback_state: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    redirect_url: Option<String>,
    #[serde(default)]
    financial_account_id: Option<String>,
    #[serde(default)]
    line_items: Option<LineItemsJson>,
    #[serde(default)]
    payment_options: Option<PaymentOptionsJson>,
    #[serde(default)]
    branding_options: Option<BrandingOptionsJson>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    expire_time: Option<String>,
}

/// Line items come back either wrapped (`{ "data": [...] }`) or as a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LineItemsJson {
    Wrapped { data: Vec<LineItemJson> },
    Plain(Vec<LineItemJson>),
}

impl LineItemsJson {
    fn into_vec(self) -> Vec<LineItemJson> {
        match self {
            Self::Wrapped { data } => data,
            Self::Plain(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LineItemJson {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    price: Option<TransportMoney>,
}

#[derive(Debug, Deserialize)]
struct PaymentOptionsJson {
    #[serde(default)]
    card: Option<serde_json::Value>,
    #[serde(default)]
    bank: Option<serde_json::Value>,
    #[serde(default)]
    momo: Option<serde_json::Value>,
    #[serde(default)]
    wallet: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BrandingOptionsJson {
    #[serde(default)]
    primary_color: Option<String>,
}

pub fn encode_create_checkout_session_body(
    request: &CreateCheckoutSession,
) -> Result<String, TransportError> {
    let options = request.options();
    let body = CreateCheckoutSessionBody {
        name: request.name(),
        description: options.description.as_deref(),
        cancel_url: request.cancel_url(),
        success_url: request.success_url(),
        callback_state: options.callback_state.as_deref(),
        reference: request.reference(),
        financial_account_id: request.financial_account_id().as_str(),
        line_items: request.line_items().iter().map(LineItemBody::from).collect(),
        branding_options: options
            .branding_primary_color
            .as_deref()
            .map(|primary_color| BrandingOptionsBody { primary_color }),
        metadata: (!options.metadata.is_empty()).then_some(&options.metadata),
    };
    Ok(serde_json::to_string(&body)?)
}

fn line_item_into_domain(item: LineItemJson) -> Result<CheckoutLineItem, TransportError> {
    Ok(CheckoutLineItem {
        kind: item.kind,
        id: item.id,
        name: item.name.unwrap_or_default(),
        quantity: item.quantity.unwrap_or_default(),
        reference: item.reference,
        description: item.description,
        price: item.price.map(TransportMoney::into_money).transpose()?,
    })
}

fn into_domain(parsed: CheckoutSessionJson) -> Result<CheckoutSession, TransportError> {
    let id =
        CheckoutSessionId::new(parsed.id).map_err(|_| TransportError::EmptyId { field: "id" })?;
    // An empty account id means "not set" rather than a broken payload.
    let financial_account_id = parsed
        .financial_account_id
        .and_then(|it| FinancialAccountId::new(it).ok());
    let line_items = parsed
        .line_items
        .map(LineItemsJson::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(line_item_into_domain)
        .collect::<Result<Vec<_>, _>>()?;
    let payment_options = parsed
        .payment_options
        .map(|it| PaymentOptions {
            card: it.card,
            bank: it.bank,
            momo: it.momo,
            wallet: it.wallet,
        })
        .unwrap_or_default();
    let branding_options = parsed
        .branding_options
        .map(|it| BrandingOptions {
            primary_color: it.primary_color,
        })
        .unwrap_or_default();

    Ok(CheckoutSession {
        id,
        name: parsed.name.unwrap_or_default(),
        description: parsed.description,
        status: parsed.status,
        cancel_url: parsed.cancel_url,
        success_url: parsed.success_url,
        callback_state: parsed.callback_state,
        reference: parsed.reference,
        redirect_url: parsed.redirect_url,
        financial_account_id,
        line_items,
        payment_options,
        branding_options,
        metadata: parsed.metadata.unwrap_or_default(),
        created_time: parsed.created_time,
        expire_time: parsed.expire_time,
    })
}

pub fn decode_checkout_session_response(
    json: &str,
) -> Result<Outcome<CheckoutSession>, TransportError> {
    decode_envelope(json, into_domain)
}

pub fn decode_checkout_session_list_response(
    json: &str,
) -> Result<Outcome<Vec<CheckoutSession>>, TransportError> {
    decode_envelope(json, |items: Vec<CheckoutSessionJson>| {
        items.into_iter().map(into_domain).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CheckoutSessionOptions, Money};

    fn request(options: CheckoutSessionOptions) -> CreateCheckoutSession {
        CreateCheckoutSession::new(
            "Help Ishmael",
            "order-42",
            "fac-123",
            "https://example.com/success",
            "https://example.com/cancel",
            vec![LineItem::custom(
                "item-1",
                "Donation",
                2,
                "ref-item-1",
                Money::new("SLE", 200),
            )],
            options,
        )
        .unwrap()
    }

    #[test]
    fn encode_create_body_maps_required_fields() {
        let body: serde_json::Value = serde_json::from_str(
            &encode_create_checkout_session_body(&request(CheckoutSessionOptions::default()))
                .unwrap(),
        )
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "name": "Help Ishmael",
                "cancelUrl": "https://example.com/cancel",
                "successUrl": "https://example.com/success",
                "reference": "order-42",
                "financialAccountId": "fac-123",
                "lineItems": [{
                    "type": "custom",
                    "id": "item-1",
                    "name": "Donation",
                    "quantity": 2,
                    "reference": "ref-item-1",
                    "price": { "currency": "SLE", "value": 200 }
                }]
            })
        );
    }

    #[test]
    fn encode_create_body_includes_optional_fields() {
        let mut metadata = BTreeMap::new();
        metadata.insert("campaign".to_owned(), "fire-relief".to_owned());
        let options = CheckoutSessionOptions {
            description: Some("Relief fund".to_owned()),
            callback_state: Some("state-1".to_owned()),
            branding_primary_color: Some("#1A73E8".to_owned()),
            metadata,
            idempotency_key: None,
        };

        let body: serde_json::Value =
            serde_json::from_str(&encode_create_checkout_session_body(&request(options)).unwrap())
                .unwrap();
        assert_eq!(body["description"], "Relief fund");
        assert_eq!(body["callbackState"], "state-1");
        assert_eq!(body["brandingOptions"]["primaryColor"], "#1A73E8");
        assert_eq!(body["metadata"]["campaign"], "fire-relief");
    }

    #[test]
    fn encode_create_body_sends_urls_and_currency_as_given_but_trimmed() {
        let request = CreateCheckoutSession::new(
            "Order",
            "order-1",
            "fac-123",
            " https://shop.example ",
            "https://shop.example/cancel?x=1",
            vec![LineItem::custom(
                "sku-1",
                "Mug",
                1,
                "sku-1",
                Money::new(" SLE ", 200),
            )],
            CheckoutSessionOptions::default(),
        )
        .unwrap();

        let body: serde_json::Value =
            serde_json::from_str(&encode_create_checkout_session_body(&request).unwrap()).unwrap();
        assert_eq!(body["successUrl"], "https://shop.example");
        assert_eq!(body["cancelUrl"], "https://shop.example/cancel?x=1");
        assert_eq!(body["lineItems"][0]["price"]["currency"], "SLE");
    }

    #[test]
    fn decode_session_treats_nulls_as_zero_values() {
        let json = r#"
        {
          "success": true,
          "result": {
            "id": "scs-1",
            "name": null,
            "lineItems": [
              { "name": null, "quantity": null, "price": { "currency": "SLE", "value": 200.0 } }
            ]
          }
        }
        "#;

        let session = decode_checkout_session_response(json)
            .unwrap()
            .result
            .unwrap();
        assert_eq!(session.name, "");
        assert_eq!(session.line_items[0].name, "");
        assert_eq!(session.line_items[0].quantity, 0);
        assert_eq!(session.line_items[0].price, Some(Money::new("SLE", 200)));
    }

    #[test]
    fn decode_session_supports_wrapped_line_items() {
        let json = r##"
        {
          "success": true,
          "messages": [],
          "result": {
            "id": "scs-1",
            "name": "Help Ishmael",
            "status": "pending",
            "redirectUrl": "https://checkout.monime.io/scs-1",
            "financialAccountId": "fac-123",
            "lineItems": {
              "data": [
                { "type": "custom", "name": "Donation", "quantity": 1,
                  "price": { "currency": "SLE", "value": "200" } }
              ]
            },
            "paymentOptions": { "momo": { "disable": [] } },
            "brandingOptions": { "primaryColor": "#000000" }
          }
        }
        "##;

        let session = decode_checkout_session_response(json)
            .unwrap()
            .result
            .unwrap();
        assert_eq!(session.id.as_str(), "scs-1");
        assert_eq!(
            session.redirect_url.as_deref(),
            Some("https://checkout.monime.io/scs-1")
        );
        assert_eq!(
            session.financial_account_id.as_ref().map(FinancialAccountId::as_str),
            Some("fac-123")
        );
        assert_eq!(session.line_items.len(), 1);
        assert_eq!(session.line_items[0].price, Some(Money::new("SLE", 200)));
        assert!(session.payment_options.momo.is_some());
        assert!(session.payment_options.card.is_none());
        assert_eq!(
            session.branding_options.primary_color.as_deref(),
            Some("#000000")
        );
    }

    #[test]
    fn decode_list_supports_plain_line_items_and_missing_options() {
        let json = r#"
        {
          "success": true,
          "result": [
            { "id": "scs-1", "name": "A", "lineItems": [ { "name": "X", "quantity": 3 } ] },
            { "id": "scs-2", "name": "B", "financialAccountId": "" }
          ],
          "pagination": { "count": 2, "next": null }
        }
        "#;

        let outcome = decode_checkout_session_list_response(json).unwrap();
        let sessions = outcome.result.unwrap();
        assert_eq!(sessions[0].line_items[0].quantity, 3);
        assert_eq!(sessions[1].financial_account_id, None);
        assert_eq!(sessions[1].payment_options, PaymentOptions::default());
        assert_eq!(outcome.pagination.unwrap().next, None);
    }
}
