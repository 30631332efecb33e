use monime::{Config, ListOptions, MonimeClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = MonimeClient::from_config(&Config::from_env()?)?;
    let accounts = client.financial_accounts();

    let mut options = ListOptions::limit(20);
    loop {
        let page = accounts.list(options.clone()).await?;
        for account in &page.items {
            println!("{} {} {}", account.id, account.currency, account.name);
        }
        match page.next_cursor() {
            Some(cursor) => options = options.after(cursor),
            None => break,
        }
    }

    Ok(())
}
