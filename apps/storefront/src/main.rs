use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, CatalogClient, SessionStore, WishlistStore};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod render;

use cli::Cli;
use commands::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_base) = cli.api_base {
        settings.api_base = api_base;
    }

    let client =
        CatalogClient::from_settings(&settings).context("failed to build catalog client")?;
    let session = SessionStore::new(&settings.session_path);
    let wishlist = WishlistStore::new(settings.wishlist_path());
    let ctx = AppContext {
        api: &client,
        session: &session,
        wishlist: &wishlist,
        settings: &settings,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(cli.command, &ctx, &mut out).await
}
