//! Headless entry point: resolve the session once and print the mounted
//! navigation graph.

use std::sync::Arc;

use anyhow::Context;

use spjt_app::{AppConfig, AppContext, NavigationController};
use spjt_client::ApiClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    spjt_observability::init(config.log_format);
    config.log_defaults();

    let table = Arc::new(config.load_capability_table()?);

    let mut client = ApiClient::new(config.api_url.clone(), config.request_timeout)
        .context("failed to build the HTTP client")?;
    if let Some(token) = &config.auth_token {
        tracing::info!("using stored authentication token");
        client = client.with_token(token.clone());
    }

    let ctx = AppContext::from_client(client, table);
    let mut navigation = NavigationController::new(ctx.session.clone());
    tracing::info!(api_url = %config.api_url, root = ?navigation.graph().kind(), "starting");

    ctx.auth.bootstrap().await;
    navigation.sync();

    let summary = serde_json::json!({
        "session": ctx.session.get_session(),
        "graph": navigation.graph(),
        "entry": navigation.graph().entry_path(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
