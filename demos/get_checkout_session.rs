use std::io;

use monime::{CheckoutSessionId, Config, MonimeClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session_id = std::env::var("MONIME_CHECKOUT_SESSION_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MONIME_CHECKOUT_SESSION_ID environment variable is required",
        )
    })?;

    let client = MonimeClient::from_config(&Config::from_env()?)?;
    let session = client
        .checkout_sessions()
        .get(&CheckoutSessionId::new(session_id)?)
        .await?;

    println!(
        "id: {}, status: {:?}, line_items: {}, expire_time: {:?}",
        session.id,
        session.status,
        session.line_items.len(),
        session.expire_time
    );

    Ok(())
}
