use std::io;

use monime::{
    CheckoutSessionOptions, Config, CreateCheckoutSession, LineItem, Money, MonimeClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,monime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let financial_account_id = std::env::var("MONIME_FINANCIAL_ACCOUNT_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MONIME_FINANCIAL_ACCOUNT_ID environment variable is required",
        )
    })?;

    let client = MonimeClient::from_config(&Config::from_env()?)?;
    let item = LineItem::custom("sku-1", "T-shirt", 2, "sku-1", Money::new("SLE", 15_000))
        .with_description("Cotton, size M");
    let request = CreateCheckoutSession::new(
        "Order 42",
        "order-42",
        financial_account_id,
        "https://shop.example/success",
        "https://shop.example/cancel",
        vec![item],
        CheckoutSessionOptions {
            description: Some("Demo order".to_owned()),
            branding_primary_color: Some("#0A66C2".to_owned()),
            ..Default::default()
        },
    )?;
    let session = client.checkout_sessions().create(request).await?;

    println!(
        "id: {}, status: {:?}, redirect_url: {:?}",
        session.id, session.status, session.redirect_url
    );

    Ok(())
}
