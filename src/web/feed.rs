use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use std::collections::HashMap;
use tracing::warn;

use crate::web::models::{watch_url, ChannelDirectory, VideoRecord};
use crate::youtube::client::{YouTubeClient, ID_BATCH_LIMIT};
use crate::youtube::models::{LiveStatus, SearchResult, VideoResource};

/// Fetch the merged latest-videos list for all channels.
///
/// A search failure for any channel aborts the whole fetch. Enrichment
/// failures only cost the scheduled-start annotation.
pub async fn fetch_latest_videos(
    yt: &YouTubeClient,
    directory: &ChannelDirectory,
    channel_ids: &[&str],
    since: DateTime<Utc>,
) -> Result<Vec<VideoRecord>> {
    let mut videos = Vec::new();
    for channel_id in channel_ids {
        let items = yt.search_channel_videos(channel_id, since).await?;
        videos.extend(build_records(directory.name(channel_id), items));
    }

    let upcoming: Vec<String> = videos
        .iter()
        .filter(|v| v.live_status == LiveStatus::Upcoming)
        .map(|v| v.video_id.clone())
        .collect();

    if !upcoming.is_empty() {
        let index: HashMap<String, usize> = videos
            .iter()
            .enumerate()
            .map(|(i, v)| (v.video_id.clone(), i))
            .collect();

        for batch in upcoming.chunks(ID_BATCH_LIMIT) {
            match yt.live_streaming_details(batch).await {
                Ok(details) => apply_scheduled_times(&mut videos, &index, details),
                Err(e) => warn!("Skipping scheduled-time lookup batch: {e:#}"),
            }
        }
    }

    sort_newest_first(&mut videos);
    Ok(videos)
}

/// Build feed records from one channel's search results.
///
/// Items without a video ID or with an unparsable timestamp are dropped.
fn build_records(channel_name: &str, items: Vec<SearchResult>) -> Vec<VideoRecord> {
    let mut records = Vec::with_capacity(items.len());
    for item in items {
        let video_id = match item.id.video_id {
            Some(id) => id,
            None => continue,
        };
        let published_at = match DateTime::parse_from_rfc3339(&item.snippet.published_at) {
            Ok(t) => t.with_timezone(&Utc),
            Err(_) => continue,
        };
        records.push(VideoRecord {
            url: watch_url(&video_id),
            video_id,
            channel: channel_name.to_string(),
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.best_url(),
            published_at,
            live_status: item.snippet.live_broadcast_content,
            scheduled_start_at: None,
        });
    }
    records
}

/// Copy scheduled start times from one details batch onto matching records.
fn apply_scheduled_times(
    videos: &mut [VideoRecord],
    index: &HashMap<String, usize>,
    details: Vec<VideoResource>,
) {
    for item in details {
        let raw = match item
            .live_streaming_details
            .and_then(|d| d.scheduled_start_time)
            .filter(|s| !s.is_empty())
        {
            Some(raw) => raw,
            None => continue,
        };

        let scheduled = match DateTime::parse_from_rfc3339(&raw) {
            Ok(t) => t.with_timezone(&Local),
            Err(e) => {
                warn!("Cannot parse scheduledStartTime for {}: {e}", item.id);
                continue;
            }
        };

        match index.get(&item.id) {
            Some(&i) => videos[i].scheduled_start_at = Some(scheduled),
            None => warn!("Scheduled time for unknown video {}", item.id),
        }
    }
}

fn sort_newest_first(videos: &mut [VideoRecord]) {
    videos.sort_by(|a, b| b.published_at.cmp(&a.published_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::youtube::models::{LiveStreamingDetails, SearchResultId, SearchSnippet, Thumbnails};

    fn search_result(video_id: Option<&str>, published_at: &str, status: LiveStatus) -> SearchResult {
        SearchResult {
            id: SearchResultId {
                video_id: video_id.map(String::from),
            },
            snippet: SearchSnippet {
                title: format!("Video {}", video_id.unwrap_or("?")),
                published_at: published_at.to_string(),
                thumbnails: Thumbnails::default(),
                live_broadcast_content: status,
            },
        }
    }

    fn detail(id: &str, scheduled: Option<&str>) -> VideoResource {
        VideoResource {
            id: id.to_string(),
            live_streaming_details: Some(LiveStreamingDetails {
                scheduled_start_time: scheduled.map(String::from),
            }),
        }
    }

    #[test]
    fn drops_items_with_unparsable_timestamps() {
        let records = build_records(
            "Channel",
            vec![
                search_result(Some("ok1"), "2024-05-01T12:00:00Z", LiveStatus::None),
                search_result(Some("bad"), "not-a-timestamp", LiveStatus::None),
                search_result(Some("ok2"), "2024-05-02T12:00:00Z", LiveStatus::None),
            ],
        );
        let ids: Vec<_> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, ["ok1", "ok2"]);
    }

    #[test]
    fn drops_items_without_video_id() {
        let records = build_records(
            "Channel",
            vec![
                search_result(None, "2024-05-01T12:00:00Z", LiveStatus::None),
                search_result(Some("ok"), "2024-05-01T12:00:00Z", LiveStatus::None),
            ],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "ok");
    }

    #[test]
    fn records_carry_channel_name_and_watch_url() {
        let records = build_records(
            "Some Channel",
            vec![search_result(
                Some("abc"),
                "2024-05-01T12:00:00+02:00",
                LiveStatus::Live,
            )],
        );
        assert_eq!(records[0].channel, "Some Channel");
        assert_eq!(records[0].url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(records[0].live_status, LiveStatus::Live);
        assert!(records[0].scheduled_start_at.is_none());
    }

    #[test]
    fn merged_channels_sort_by_timestamp_alone() {
        let mut videos = build_records(
            "First",
            vec![
                search_result(Some("a1"), "2024-05-01T12:00:00Z", LiveStatus::None),
                search_result(Some("a2"), "2024-05-03T12:00:00Z", LiveStatus::None),
            ],
        );
        videos.extend(build_records(
            "Second",
            vec![
                search_result(Some("b1"), "2024-05-02T12:00:00Z", LiveStatus::None),
                search_result(Some("b2"), "2024-05-04T12:00:00Z", LiveStatus::None),
            ],
        ));

        sort_newest_first(&mut videos);

        let ids: Vec<_> = videos.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(ids, ["b2", "a2", "b1", "a1"]);
        for pair in videos.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[test]
    fn scheduled_times_attach_to_matching_records_only() {
        let mut videos = build_records(
            "Channel",
            vec![
                search_result(Some("up1"), "2024-05-01T12:00:00Z", LiveStatus::Upcoming),
                search_result(Some("up2"), "2024-05-02T12:00:00Z", LiveStatus::Upcoming),
            ],
        );
        let index: HashMap<String, usize> = videos
            .iter()
            .enumerate()
            .map(|(i, v)| (v.video_id.clone(), i))
            .collect();

        apply_scheduled_times(
            &mut videos,
            &index,
            vec![
                detail("up1", Some("2024-06-01T18:00:00Z")),
                detail("unknown", Some("2024-06-01T18:00:00Z")),
                detail("up2", Some("garbage")),
            ],
        );

        assert!(videos[0].scheduled_start_at.is_some());
        assert!(videos[1].scheduled_start_at.is_none());
    }

    #[test]
    fn empty_or_missing_scheduled_times_are_skipped() {
        let mut videos = build_records(
            "Channel",
            vec![search_result(
                Some("up1"),
                "2024-05-01T12:00:00Z",
                LiveStatus::Upcoming,
            )],
        );
        let index = HashMap::from([("up1".to_string(), 0)]);

        apply_scheduled_times(
            &mut videos,
            &index,
            vec![
                detail("up1", Some("")),
                detail("up1", None),
                VideoResource {
                    id: "up1".to_string(),
                    live_streaming_details: None,
                },
            ],
        );

        assert_eq!(videos[0].live_status, LiveStatus::Upcoming);
        assert!(videos[0].scheduled_start_at.is_none());
    }
}
