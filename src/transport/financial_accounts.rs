use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::envelope::{Outcome, TransportError, decode_envelope};
use super::money::TransportMoney;
use crate::domain::{
    Balance, CreateFinancialAccount, FinancialAccount, FinancialAccountId, UpdateFinancialAccount,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateFinancialAccountBody<'a> {
    name: &'a str,
    currency: &'a str,
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateFinancialAccountBody<'a> {
    name: &'a str,
    currency: &'a str,
    reference: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialAccountJson {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    reference: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    balance: Option<BalanceJson>,
    #[serde(default)]
    metadata: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default)]
    created_time: Option<String>,
    #[serde(default)]
    updated_time: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceJson {
    available: TransportMoney,
}

fn non_empty(metadata: &BTreeMap<String, String>) -> Option<&BTreeMap<String, String>> {
    (!metadata.is_empty()).then_some(metadata)
}

pub fn encode_create_financial_account_body(
    request: &CreateFinancialAccount,
) -> Result<String, TransportError> {
    let body = CreateFinancialAccountBody {
        name: request.name(),
        currency: request.currency(),
        reference: request.reference(),
        description: request.description(),
        metadata: non_empty(request.metadata()),
    };
    Ok(serde_json::to_string(&body)?)
}

pub fn encode_update_financial_account_body(
    request: &UpdateFinancialAccount,
) -> Result<String, TransportError> {
    let body = UpdateFinancialAccountBody {
        name: request.name(),
        currency: request.currency(),
        reference: request.reference(),
        metadata: non_empty(request.metadata()),
    };
    Ok(serde_json::to_string(&body)?)
}

fn into_domain(parsed: FinancialAccountJson) -> Result<FinancialAccount, TransportError> {
    let id = FinancialAccountId::new(parsed.id)
        .map_err(|_| TransportError::EmptyId { field: "id" })?;
    let balance = parsed
        .balance
        .map(|balance| {
            Ok::<_, TransportError>(Balance {
                available: balance.available.into_money()?,
            })
        })
        .transpose()?;

    Ok(FinancialAccount {
        id,
        name: parsed.name.unwrap_or_default(),
        currency: parsed.currency.unwrap_or_default(),
        reference: parsed.reference,
        description: parsed.description,
        balance,
        metadata: parsed.metadata.unwrap_or_default(),
        created_time: parsed.created_time,
        updated_time: parsed.updated_time,
    })
}

pub fn decode_financial_account_response(
    json: &str,
) -> Result<Outcome<FinancialAccount>, TransportError> {
    decode_envelope(json, into_domain)
}

pub fn decode_financial_account_list_response(
    json: &str,
) -> Result<Outcome<Vec<FinancialAccount>>, TransportError> {
    decode_envelope(json, |items: Vec<FinancialAccountJson>| {
        items.into_iter().map(into_domain).collect()
    })
}
