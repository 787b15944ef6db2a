use shopify_app::app::{self, AppState};
use shopify_app::AppConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env()?;
    info!(
        api_key = config.api_key().as_ref(),
        scopes = %config.scopes(),
        "shopify app shell starting"
    );

    app::serve(AppState::new(config)).await?;
    Ok(())
}
