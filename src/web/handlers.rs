use actix_web::{get, web, HttpResponse};
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::error;

use crate::config::{CHANNEL_IDS, CONFIG};
use crate::web::feed::fetch_latest_videos;
use crate::web::models::{ChannelDirectory, FeedCache};
use crate::web::render::render_page;
use crate::youtube::client::YouTubeClient;

// Handler for the feed page
#[get("/")]
pub async fn index(
    cache: web::Data<Mutex<FeedCache>>,
    yt: web::Data<YouTubeClient>,
    directory: web::Data<ChannelDirectory>,
) -> HttpResponse {
    let needs_refresh = cache.lock().await.is_stale(CONFIG.cache_ttl);

    // Refresh outside the lock. A failed fetch leaves the cache untouched;
    // the next request retries.
    if needs_refresh {
        let since = Utc::now() - Duration::days(CONFIG.feed_window_days);
        match fetch_latest_videos(&yt, &directory, CHANNEL_IDS, since).await {
            Ok(videos) => cache.lock().await.store(videos),
            Err(e) => {
                error!("Failed to refresh video feed: {e:#}");
                return HttpResponse::InternalServerError()
                    .body(format!("YouTube API error: {e:#}"));
            }
        }
    }

    let snapshot = cache.lock().await.snapshot();
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&snapshot))
}
