use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use crate::youtube::models::LiveStatus;

/// One entry on the feed page. Built once per refresh, never mutated after
/// the snapshot it belongs to is published.
#[derive(Serialize, Clone, Debug)]
pub struct VideoRecord {
    pub video_id: String,
    pub channel: String,
    pub title: String,
    pub thumbnail: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub live_status: LiveStatus,
    pub scheduled_start_at: Option<DateTime<Local>>,
}

/// Watch URL for a video ID.
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Channel ID to display name mapping, resolved once at startup and
/// read-only afterwards.
pub struct ChannelDirectory {
    names: HashMap<String, String>,
}

impl ChannelDirectory {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Display name for a channel, or "" when the startup lookup did not
    /// resolve it.
    pub fn name(&self, channel_id: &str) -> &str {
        self.names
            .get(channel_id)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Cache of the most recent successful fetch, shared across requests.
pub struct FeedCache {
    snapshot: Vec<VideoRecord>,
    last_refresh: SystemTime,
}

impl FeedCache {
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            last_refresh: SystemTime::UNIX_EPOCH, // forces the initial refresh
        }
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        SystemTime::now()
            .duration_since(self.last_refresh)
            .map(|elapsed| elapsed > ttl)
            .unwrap_or(true)
    }

    /// Replace the snapshot wholesale and restart the cache window.
    pub fn store(&mut self, videos: Vec<VideoRecord>) {
        self.snapshot = videos;
        self.last_refresh = SystemTime::now();
    }

    /// Copy of the current snapshot, so callers never iterate under the
    /// cache lock.
    pub fn snapshot(&self) -> Vec<VideoRecord> {
        self.snapshot.clone()
    }
}
