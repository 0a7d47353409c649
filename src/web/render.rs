use crate::web::models::VideoRecord;
use crate::youtube::models::LiveStatus;

/// Render the feed page as a card grid, newest first.
pub fn render_page(videos: &[VideoRecord]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Latest Videos</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
        .video-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px; }
        .video-item { background-color: white; border-radius: 8px; overflow: hidden; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
        .thumbnail { width: 100%; height: 180px; object-fit: cover; background-color: #ccc; }
        .video-info { padding: 10px; }
        h1 { color: #333; }
        a { text-decoration: none; color: inherit; }
        .video-title { margin: 5px 0; color: #333; }
        .channel { color: #666; font-size: 0.9em; }
        .published { color: #999; font-size: 0.8em; }
        .live { color: #c00; font-weight: bold; }
        .upcoming { color: #07c; }
    </style>
</head>
<body>
    <h1>Latest Videos</h1>
    <div class="video-grid">
"#,
    );

    for video in videos {
        let status_line = match video.live_status {
            LiveStatus::Live => r#"<div class="live">LIVE</div>"#.to_string(),
            LiveStatus::Upcoming => match &video.scheduled_start_at {
                Some(start) => format!(
                    r#"<div class="upcoming">Premieres {}</div>"#,
                    start.format("%Y-%m-%d %H:%M")
                ),
                None => r#"<div class="upcoming">Upcoming</div>"#.to_string(),
            },
            LiveStatus::None => String::new(),
        };

        html.push_str(&format!(
            r#"        <div class="video-item">
            <a href="{url}">
                <img class="thumbnail" src="{thumbnail}" alt="{title}" onerror="this.style.backgroundColor='#ccc';">
                <div class="video-info">
                    <h3 class="video-title">{title}</h3>
                    <div class="channel">{channel}</div>
                    <div class="published">{published}</div>
                    {status_line}
                </div>
            </a>
        </div>
"#,
            url = escape(&video.url),
            thumbnail = escape(&video.thumbnail),
            title = escape(&video.title),
            channel = escape(&video.channel),
            published = video.published_at.format("%Y-%m-%d %H:%M"),
        ));
    }

    html.push_str(
        r#"    </div>
</body>
</html>
"#,
    );

    html
}

/// HTML-escape interpolated text and attribute values.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
