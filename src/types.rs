use std::fmt;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Lyrics text recorded when the lyrics service has no usable result.
pub const LYRICS_NOT_FOUND: &str = "Lyrics not found.";

/// Lyrics text recorded when every lyrics search attempt failed.
pub const LYRICS_FETCH_ERROR: &str = "Error fetching lyrics after multiple attempts.";

/// Language recorded when detection is not possible.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub artist_name: String,
    pub album_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub track_number: u32,
}

/// Spotify paging object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Page<Artist>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LyricsStatus {
    Found,
    NotFound,
    Error,
}

impl fmt::Display for LyricsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LyricsStatus::Found => "found",
            LyricsStatus::NotFound => "not_found",
            LyricsStatus::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsResult {
    pub text: String,
    pub status: LyricsStatus,
}

impl LyricsResult {
    pub fn found(text: String) -> Self {
        Self {
            text,
            status: LyricsStatus::Found,
        }
    }

    pub fn not_found() -> Self {
        Self {
            text: LYRICS_NOT_FOUND.to_string(),
            status: LyricsStatus::NotFound,
        }
    }

    pub fn error() -> Self {
        Self {
            text: LYRICS_FETCH_ERROR.to_string(),
            status: LyricsStatus::Error,
        }
    }
}

/// A song as returned by the lyrics service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongLyrics {
    pub title: String,
    pub url: String,
    pub lyrics: String,
}

/// One line of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub artist: String,
    pub album: String,
    pub track_title: String,
    pub lyrics: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub record: TrackRecord,
    pub status: LyricsStatus,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub position: usize,
    pub title: String,
    pub language: String,
    pub lyrics: String,
}
