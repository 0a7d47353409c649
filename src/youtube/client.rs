use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::HashMap;

use crate::youtube::models::{
    ChannelListResponse, SearchListResponse, SearchResult, VideoListResponse, VideoResource,
};

const API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Maximum number of IDs the Data API accepts per `channels.list` or
/// `videos.list` call.
pub const ID_BATCH_LIMIT: usize = 50;

/// Client for the YouTube Data API v3, authenticated with an API key.
#[derive(Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
}

impl YouTubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Resolve channel IDs to display names, batched per API limits.
    pub async fn resolve_channel_names(&self, ids: &[&str]) -> Result<HashMap<String, String>> {
        let mut names = HashMap::new();
        for batch in ids.chunks(ID_BATCH_LIMIT) {
            let resp: ChannelListResponse = self
                .get("channels", &[("part", "snippet"), ("id", &batch.join(","))])
                .await
                .context("channels.list request failed")?;
            for channel in resp.items {
                names.insert(channel.id, channel.snippet.title);
            }
        }
        Ok(names)
    }

    /// One channel's videos published after the given time, newest first,
    /// capped at a single page of results.
    pub async fn search_channel_videos(
        &self,
        channel_id: &str,
        published_after: DateTime<Utc>,
    ) -> Result<Vec<SearchResult>> {
        let after = published_after.to_rfc3339_opts(SecondsFormat::Secs, true);
        let resp: SearchListResponse = self
            .get(
                "search",
                &[
                    ("part", "snippet"),
                    ("channelId", channel_id),
                    ("publishedAfter", &after),
                    ("type", "video"),
                    ("order", "date"),
                    ("maxResults", "50"),
                ],
            )
            .await
            .with_context(|| format!("search.list request failed for channel {channel_id}"))?;
        Ok(resp.items)
    }

    /// Live-streaming details for one batch of video IDs.
    pub async fn live_streaming_details(&self, ids: &[String]) -> Result<Vec<VideoResource>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let resp: VideoListResponse = self
            .get(
                "videos",
                &[("part", "liveStreamingDetails"), ("id", &ids.join(","))],
            )
            .await
            .context("videos.list request failed")?;
        Ok(resp.items)
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let resp = self
            .http
            .get(format!("{API_BASE}/{endpoint}"))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("YouTube API error {status}: {body}");
        }

        Ok(resp.json().await?)
    }
}
