//! Configuration management for the Album Lyrics Collector.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. All values end up in a [`Settings`] struct that is handed to
//! the pipeline explicitly; nothing reads the environment after startup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

use crate::types::{Credentials, Target};

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_GENIUS_API_URL: &str = "https://api.genius.com";
pub const DEFAULT_TARGET_ARTIST: &str = "Mac Miller";
pub const DEFAULT_TARGET_ALBUM: &str = "Swimming";
pub const DEFAULT_EXCLUDED_TERMS: &str = "(Remix),(Live)";

/// Largest page the catalog accepts for album and track listings.
pub const MAX_CATALOG_PAGE_SIZE: u32 = 50;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Loads environment variables from `.env` files.
///
/// Looks in the platform-specific local data directory under
/// `lyricollect/.env` (creating the directory if needed) and in the current
/// working directory. Both files are optional. Variables already present in
/// the process environment are never overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/lyricollect/.env`
/// - macOS: `~/Library/Application Support/lyricollect/.env`
/// - Windows: `%LOCALAPPDATA%/lyricollect/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    dotenv::dotenv().ok();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("lyricollect/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    Ok(())
}

/// Everything a collection run needs to know.
#[derive(Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub genius_token: String,
    pub spotify_api_url: String,
    pub spotify_token_url: String,
    pub genius_api_url: String,
    pub target: Target,
    pub output_path: PathBuf,
    pub catalog_page_size: u32,
    pub catalog_max_pages: u32,
    pub catalog_timeout: Duration,
    pub lyrics_timeout: Duration,
    pub lyrics_attempts: u32,
    pub lyrics_retry_delay: Duration,
    pub excluded_terms: Vec<String>,
    pub concurrency: usize,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("credentials", &self.credentials)
            .field("genius_token", &"***")
            .field("spotify_api_url", &self.spotify_api_url)
            .field("spotify_token_url", &self.spotify_token_url)
            .field("genius_api_url", &self.genius_api_url)
            .field("target", &self.target)
            .field("output_path", &self.output_path)
            .field("catalog_page_size", &self.catalog_page_size)
            .field("catalog_max_pages", &self.catalog_max_pages)
            .field("catalog_timeout", &self.catalog_timeout)
            .field("lyrics_timeout", &self.lyrics_timeout)
            .field("lyrics_attempts", &self.lyrics_attempts)
            .field("lyrics_retry_delay", &self.lyrics_retry_delay)
            .field("excluded_terms", &self.excluded_terms)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

impl Settings {
    /// Builds the settings from the process environment.
    ///
    /// Call [`load_env`] first so that `.env` files are taken into account.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the settings from an arbitrary key lookup.
    ///
    /// Empty values count as unset. Required keys are the two Spotify client
    /// credentials and the Genius token; everything else has a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let credentials = Credentials::new(
            required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
        );
        let genius_token = required("GENIUS_API_TOKEN")?;

        let target = Target {
            artist_name: get("TARGET_ARTIST").unwrap_or_else(|| DEFAULT_TARGET_ARTIST.to_string()),
            album_name: get("TARGET_ALBUM").unwrap_or_else(|| DEFAULT_TARGET_ALBUM.to_string()),
        };
        let output_path = get("OUTPUT_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| default_output_path(&target.album_name));

        let catalog_page_size: u32 = parse_or(&get, "CATALOG_PAGE_SIZE", MAX_CATALOG_PAGE_SIZE)?;
        if catalog_page_size == 0 || catalog_page_size > MAX_CATALOG_PAGE_SIZE {
            return Err(ConfigError::Invalid {
                var: "CATALOG_PAGE_SIZE",
                value: catalog_page_size.to_string(),
                reason: format!("must be between 1 and {}", MAX_CATALOG_PAGE_SIZE),
            });
        }

        let catalog_max_pages: u32 = parse_or(&get, "CATALOG_MAX_PAGES", 1)?;
        let lyrics_attempts: u32 = parse_or(&get, "LYRICS_ATTEMPTS", 2)?;
        let concurrency: usize = parse_or(&get, "TRACK_CONCURRENCY", 1)?;
        for (var, value) in [
            ("CATALOG_MAX_PAGES", catalog_max_pages as usize),
            ("LYRICS_ATTEMPTS", lyrics_attempts as usize),
            ("TRACK_CONCURRENCY", concurrency),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    var,
                    value: value.to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
        }

        let excluded_terms = get("LYRICS_EXCLUDED_TERMS")
            .unwrap_or_else(|| DEFAULT_EXCLUDED_TERMS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            credentials,
            genius_token,
            spotify_api_url: get("SPOTIFY_API_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            spotify_token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string()),
            genius_api_url: get("GENIUS_API_URL")
                .unwrap_or_else(|| DEFAULT_GENIUS_API_URL.to_string()),
            target,
            output_path,
            catalog_page_size,
            catalog_max_pages,
            catalog_timeout: Duration::from_secs(parse_or(&get, "CATALOG_TIMEOUT_SECS", 10)?),
            lyrics_timeout: Duration::from_secs(parse_or(&get, "LYRICS_TIMEOUT_SECS", 15)?),
            lyrics_attempts,
            lyrics_retry_delay: Duration::from_millis(parse_or(
                &get,
                "LYRICS_RETRY_DELAY_MS",
                1000,
            )?),
            excluded_terms,
            concurrency,
        })
    }
}

/// Output file named after the album, e.g. `Swimming.jsonl`.
pub fn default_output_path(album_name: &str) -> PathBuf {
    let stem: String = album_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect();
    PathBuf::from(format!("{}.jsonl", stem.trim()))
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
