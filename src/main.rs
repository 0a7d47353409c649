mod config;
mod web;
mod youtube;

use std::sync::Arc;
use tokio::sync::Notify;
use tracing::{error, info};

use crate::config::{CHANNEL_IDS, CONFIG};
use crate::web::models::ChannelDirectory;
use crate::web::server::run_server;
use crate::youtube::client::YouTubeClient;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();
    config::load_env_file();
    info!("Logging initialized, starting the application");

    let yt = YouTubeClient::new(CONFIG.api_key.clone());

    // Channel names are assumed stable for the process lifetime.
    let names = match yt.resolve_channel_names(CHANNEL_IDS).await {
        Ok(names) => names,
        Err(e) => {
            error!("Failed to resolve channel names: {e:#}");
            std::process::exit(1);
        }
    };
    info!(
        "Resolved {} of {} channel names",
        names.len(),
        CHANNEL_IDS.len()
    );
    let directory = ChannelDirectory::new(names);

    // Stop the server on Ctrl+C
    let shutdown = Arc::new(Notify::new());
    let ctrl_c_shutdown = shutdown.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        info!("Ctrl+C received, shutting down");
        ctrl_c_shutdown.notify_waiters();
    });

    if let Err(e) = run_server(yt, directory, shutdown).await {
        error!("Web server error: {:?}", e);
    }

    info!("Shutdown complete");
}
