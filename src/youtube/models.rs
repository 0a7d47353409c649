//! Typed response models for the YouTube Data API v3.
//!
//! Field names mirror the API's camelCase JSON. Timestamps stay `String`
//! at this layer so a malformed value can be handled per item instead of
//! failing a whole response parse.

use serde::{Deserialize, Serialize};

/// Live-broadcast classification of a video, from the snippet's
/// `liveBroadcastContent` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveStatus {
    Live,
    Upcoming,
    #[default]
    #[serde(other)]
    None,
}

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub id: String,
    pub snippet: ChannelSnippet,
}

#[derive(Debug, Deserialize)]
pub struct ChannelSnippet {
    pub title: String,
}

/// Response structure for the `search.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
    pub snippet: SearchSnippet,
}

/// Search results may reference channels or playlists, in which case
/// `videoId` is absent.
#[derive(Debug, Deserialize)]
pub struct SearchResultId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchSnippet {
    pub title: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "liveBroadcastContent", default)]
    pub live_broadcast_content: LiveStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    pub default: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
}

impl Thumbnails {
    /// Best available thumbnail URL, preferring higher resolutions.
    pub fn best_url(&self) -> String {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.default.as_ref())
            .map(|t| t.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

#[derive(Debug, Deserialize)]
pub struct VideoResource {
    pub id: String,
    #[serde(rename = "liveStreamingDetails")]
    pub live_streaming_details: Option<LiveStreamingDetails>,
}

/// Only present on videos that are or will be live broadcasts.
#[derive(Debug, Deserialize)]
pub struct LiveStreamingDetails {
    #[serde(rename = "scheduledStartTime")]
    pub scheduled_start_time: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_search_result() {
        let json = r#"{
            "items": [{
                "id": { "kind": "youtube#video", "videoId": "abc123" },
                "snippet": {
                    "title": "A stream",
                    "publishedAt": "2024-05-01T12:00:00Z",
                    "thumbnails": { "high": { "url": "https://i.ytimg.com/vi/abc123/hqdefault.jpg" } },
                    "liveBroadcastContent": "upcoming"
                }
            }]
        }"#;

        let resp: SearchListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.items.len(), 1);
        let item = &resp.items[0];
        assert_eq!(item.id.video_id.as_deref(), Some("abc123"));
        assert_eq!(item.snippet.live_broadcast_content, LiveStatus::Upcoming);
        assert_eq!(
            item.snippet.thumbnails.best_url(),
            "https://i.ytimg.com/vi/abc123/hqdefault.jpg"
        );
    }

    #[test]
    fn unknown_broadcast_content_maps_to_none() {
        let json = r#"{"title": "t", "publishedAt": "x", "liveBroadcastContent": "completed"}"#;
        let snippet: SearchSnippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.live_broadcast_content, LiveStatus::None);
    }

    #[test]
    fn missing_broadcast_content_defaults_to_none() {
        let json = r#"{"title": "t", "publishedAt": "x"}"#;
        let snippet: SearchSnippet = serde_json::from_str(json).unwrap();
        assert_eq!(snippet.live_broadcast_content, LiveStatus::None);
    }

    #[test]
    fn thumbnail_fallback_prefers_high() {
        let full: Thumbnails = serde_json::from_str(
            r#"{"default": {"url": "d"}, "medium": {"url": "m"}, "high": {"url": "h"}}"#,
        )
        .unwrap();
        assert_eq!(full.best_url(), "h");

        let partial: Thumbnails = serde_json::from_str(r#"{"default": {"url": "d"}}"#).unwrap();
        assert_eq!(partial.best_url(), "d");

        assert_eq!(Thumbnails::default().best_url(), "");
    }
}
