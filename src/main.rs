use anyhow::Context;
use cart_store::core::ConfigProvider;
use cart_store::utils::{logger, validation::Validate};
use cart_store::{
    CartCommand, CartConfig, CartStore, CliConfig, FileStore, HttpCatalog, NotificationLevel,
    RecordingNotifier, UpdateProductAmount,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let file_config = match &cli.config {
        Some(path) => Some(
            CartConfig::from_file(path).with_context(|| format!("loading config {}", path))?,
        ),
        None => None,
    };

    match &file_config {
        Some(config) if config.json_logs() || cli.json_logs => {
            logger::init_json_logger(config.log_level())
        }
        None if cli.json_logs => logger::init_json_logger(None),
        _ => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting cart-store");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let provider: &dyn ConfigProvider = match &file_config {
        Some(config) => {
            config.validate()?;
            config
        }
        None => {
            cli.validate()?;
            &cli
        }
    };

    let catalog = HttpCatalog::new(provider.catalog_url())?;
    let storage = FileStore::new(provider.storage_path());
    let mut store = CartStore::load(
        catalog,
        storage,
        RecordingNotifier::new(),
        provider.storage_key(),
    )
    .await;

    match cli.command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => store.add_product(product_id).await,
        CartCommand::Remove { product_id } => store.remove_product(product_id).await,
        CartCommand::Update { product_id, amount } => {
            store
                .update_product_amount(UpdateProductAmount { product_id, amount })
                .await
        }
    }

    let mut failed = false;
    for notification in store.notifier().drain() {
        match notification.level {
            NotificationLevel::Success => println!("✅ {}", notification.message),
            NotificationLevel::Error => {
                failed = true;
                eprintln!("❌ {}", notification.message);
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(store.cart())?);

    if failed {
        std::process::exit(1);
    }

    Ok(())
}
