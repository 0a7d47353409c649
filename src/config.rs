use lazy_static::lazy_static;
use std::env;
use std::fs;
use std::time::Duration;
use tracing::info;

/// Channels whose uploads make up the feed.
pub const CHANNEL_IDS: &[&str] = &[
    "UC3MBGrjXHkLqo0Bs4CktzpQ", // Bez Schematu
    "UCj0LLFUIn-bjKHRQ6mqCb2w", // Krzysztof M. Maj
    "UC7zHiHZaO-ftaTTUZwHJIQg", // Bez Zycia
];

pub struct Config {
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub cache_ttl: Duration,
    pub feed_window_days: i64,
}

impl Config {
    pub fn new() -> Self {
        let api_key = env::var("YOUTUBE_API_KEY").expect("YOUTUBE_API_KEY not set!");

        let host = env::var("WEBSERVER_HOST").unwrap_or("127.0.0.1".to_string());
        let port = env::var("WEBSERVER_PORT")
            .unwrap_or("8080".to_string())
            .parse()
            .expect("WEBSERVER_PORT must be a valid u16");

        let cache_ttl = Duration::from_secs(
            env::var("CACHE_TTL_SECS")
                .unwrap_or("600".to_string())
                .parse()
                .expect("CACHE_TTL_SECS must be a number of seconds"),
        );

        let feed_window_days = env::var("FEED_WINDOW_DAYS")
            .unwrap_or("7".to_string())
            .parse()
            .expect("FEED_WINDOW_DAYS must be a number of days");

        Self {
            api_key,
            host,
            port,
            cache_ttl,
            feed_window_days,
        }
    }
}

lazy_static! {
    pub static ref CONFIG: Config = Config::new();
}

/// Seed the process environment from a local `.env` file.
///
/// Variables that are already set win over file entries. Must run before
/// the first access to [`CONFIG`].
pub fn load_env_file() {
    let contents = match fs::read_to_string(".env") {
        Ok(contents) => contents,
        Err(_) => {
            info!("No .env file found, relying on environment variables");
            return;
        }
    };

    for line in contents.lines() {
        if let Some((key, value)) = parse_env_line(line) {
            if env::var_os(key).is_none() {
                env::set_var(key, value);
            }
        }
    }
}

fn parse_env_line(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}
