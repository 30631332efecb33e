use std::io;

use monime::{Config, CreateFinancialAccount, MonimeClient};
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

    let reference = std::env::var("MONIME_ACCOUNT_REFERENCE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "MONIME_ACCOUNT_REFERENCE environment variable is required",
        )
    })?;
    let currency = std::env::var("MONIME_CURRENCY").unwrap_or_else(|_| "SLE".to_owned());

    let client = MonimeClient::from_config(&Config::from_env()?)?;
    let request = CreateFinancialAccount::new("Demo account", currency, reference)?
        .with_description("created by the monime demo")
        .with_metadata("source", "demo");
    let account = client.financial_accounts().create(request).await?;

    println!(
        "id: {}, name: {}, currency: {}, balance: {:?}",
        account.id, account.name, account.currency, account.balance
    );

    Ok(())
}
