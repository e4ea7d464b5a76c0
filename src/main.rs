use anyhow::Context;
use carmarket::auth::{create_authenticator, Session};
use carmarket::contact::CommandDispatcher;
use carmarket::controllers::{DetailsController, ListController};
use carmarket::{create_gateway, Config, SortKey};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 Car Market");
    info!("=============");

    let config = Config::from_env().context("Invalid configuration")?;

    let args: Vec<String> = std::env::args().skip(1).collect();

    let gateway = create_gateway(&config).await?;
    let authenticator = create_authenticator(&config)?;

    let credentials = config
        .credentials
        .as_ref()
        .context("Set CARMARKET_USERNAME and CARMARKET_PASSWORD to sign in")?;

    let mut session = Session::default();
    session
        .sign_in(authenticator.as_ref(), &credentials.username, &credentials.password)
        .await?;

    let mut list = ListController::new(gateway.clone());
    list.refresh(&session)
        .await
        .map_err(|notice| anyhow::anyhow!(notice.message))?;

    // `call <id>` / `email <id>` contact the seller instead of listing
    if let [action, id] = args.as_slice() {
        if action == "call" || action == "email" {
            let listing = list
                .find(id)
                .cloned()
                .with_context(|| format!("No listing with id {}", id))?;
            let dispatcher = Arc::new(CommandDispatcher::new(config.opener.clone()));
            let mut details = DetailsController::new(gateway, dispatcher, listing);

            let result = if action == "call" {
                details.call_owner().await
            } else {
                details.email_owner().await
            };
            result.map_err(|notice| anyhow::anyhow!(notice.message))?;

            info!("📞 Contacted seller of {}", details.listing().title());
            return Ok(());
        }
    }

    list.set_search_text(args.first().cloned().unwrap_or_default());
    list.set_sort(args.get(1).map(|s| SortKey::parse(s)).unwrap_or_default());

    let visible = list.visible();
    info!(
        "✅ {} of {} listings match '{}' (sorted by {})\n",
        visible.len(),
        list.snapshot().len(),
        list.search_text(),
        list.sort()
    );

    for (i, listing) in visible.iter().enumerate() {
        println!("{}. {} ({} kr)", i + 1, listing.title(), listing.price);
        println!("   {} km", listing.mileage);
        if let Some(description) = &listing.description {
            println!("   {}", description);
        }
        println!("   Seller: {} {}", listing.owner_name, listing.owner_phone);
        if let Some(email) = &listing.owner_email {
            println!("   Email: {}", email);
        }
        println!("   Photos: {}", listing.images.len());
        println!("   ID: {}", listing.id);
        println!();
    }

    Ok(())
}
