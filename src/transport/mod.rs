//! Transport layer: JSON wire format (serialization/deserialization).

mod checkout_sessions;
mod envelope;
mod financial_accounts;
mod money;

pub use checkout_sessions::{
    decode_checkout_session_list_response, decode_checkout_session_response,
    encode_create_checkout_session_body,
};
pub use envelope::{
    Outcome, TransportError, decode_empty_response, decode_error_message, encode_list_query,
};
pub use financial_accounts::{
    decode_financial_account_list_response, decode_financial_account_response,
    encode_create_financial_account_body, encode_update_financial_account_body,
};
