use actix_web::{web, App, HttpServer};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::info;

use crate::config::CONFIG;
use crate::web::handlers;
use crate::web::models::{ChannelDirectory, FeedCache};
use crate::youtube::client::YouTubeClient;

pub async fn run_server(
    yt: YouTubeClient,
    directory: ChannelDirectory,
    shutdown_signal: Arc<Notify>,
) -> std::io::Result<()> {
    let addr = format!("{}:{}", CONFIG.host, CONFIG.port)
        .parse::<SocketAddr>()
        .expect("Failed to parse host and port into SocketAddr");

    let cache = web::Data::new(Mutex::new(FeedCache::new()));
    let yt = web::Data::new(yt);
    let directory = web::Data::new(directory);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(cache.clone())
            .app_data(yt.clone())
            .app_data(directory.clone())
            .service(handlers::index)
    })
    .bind(addr)?;

    info!("Starting server on: {addr}");

    let server_handle = server.run();

    tokio::select! {
        result = server_handle => result,
        _ = shutdown_signal.notified() => {
            info!("Shutdown signal received, stopping web server");
            Ok(())
        }
    }
}
