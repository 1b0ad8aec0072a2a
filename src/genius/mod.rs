//! # Genius Integration Module
//!
//! Implements the lyrics-search capability on top of Genius. The public API
//! only returns song metadata, so a lookup is two requests: a search for the
//! song and a download of its page, from which the lyrics are extracted.
//!
//! Search hits are filtered the way a careful human would: only songs, the
//! exact title preferred, and no tracklists, credits or interview pages.

use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::{
    Res,
    http::{HttpRequest, Transport},
    types::SongLyrics,
    utils,
};

mod page;

pub use page::extract_lyrics;

/// Titles of Genius pages that carry no song lyrics.
static NON_SONG_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)track\s?list|album art(work)?|liner notes|booklet|credits|interview|skit|instrumental|setlist",
    )
    .expect("non-song title pattern is valid")
});

/// Something that can look up the lyrics of a song.
///
/// `Ok(None)` means the service answered but has nothing for this song;
/// `Err` means the lookup itself failed and may be worth retrying.
#[async_trait]
pub trait LyricsSource: Send + Sync {
    async fn search(&self, title: &str, artist: &str) -> Res<Option<SongLyrics>>;
}

pub struct GeniusClient {
    transport: Arc<dyn Transport>,
    api_url: String,
    token: String,
    excluded_terms: Vec<String>,
}

impl GeniusClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        api_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            excluded_terms: Vec::new(),
        }
    }

    /// Search hits whose title contains one of these terms (case-insensitive)
    /// are rejected, e.g. `(Remix)` or `(Live)`.
    pub fn with_excluded_terms(mut self, terms: Vec<String>) -> Self {
        self.excluded_terms = terms;
        self
    }

    async fn search_hits(&self, title: &str, artist: &str) -> Res<Vec<GeniusSong>> {
        let request = HttpRequest::get(format!("{uri}/search", uri = self.api_url))
            .bearer(&self.token)
            .query("q", format!("{} {}", title, artist));

        let reply = self.transport.execute(request).await?;
        if !reply.is_success() {
            return Err(format!("Genius search failed with status {}", reply.status).into());
        }

        let res: GeniusSearchResponse = reply.json()?;
        Ok(res
            .response
            .hits
            .into_iter()
            .filter(|hit| hit.kind == "song")
            .map(|hit| hit.result)
            .collect())
    }

    async fn fetch_page(&self, url: &str) -> Res<String> {
        let reply = self.transport.execute(HttpRequest::get(url)).await?;
        if !reply.is_success() {
            return Err(format!("Genius page {} failed with status {}", url, reply.status).into());
        }
        Ok(reply.body)
    }

    fn is_rejected(&self, song_title: &str) -> bool {
        if NON_SONG_TITLE.is_match(song_title) {
            return true;
        }
        let lowered = song_title.to_lowercase();
        self.excluded_terms
            .iter()
            .any(|term| lowered.contains(&term.to_lowercase()))
    }
}

#[async_trait]
impl LyricsSource for GeniusClient {
    async fn search(&self, title: &str, artist: &str) -> Res<Option<SongLyrics>> {
        let hits = self.search_hits(title, artist).await?;

        let wanted = utils::comparable_title(title);
        let song = match hits
            .iter()
            .find(|song| utils::comparable_title(&song.title) == wanted)
            .or_else(|| hits.first())
        {
            Some(song) => song,
            None => return Ok(None),
        };

        if self.is_rejected(&song.title) {
            return Ok(None);
        }

        let html = self.fetch_page(&song.url).await?;

        Ok(Some(SongLyrics {
            title: song.title.clone(),
            url: song.url.clone(),
            lyrics: extract_lyrics(&html),
        }))
    }
}

#[derive(Debug, Deserialize)]
struct GeniusSearchResponse {
    response: GeniusResponse,
}

#[derive(Debug, Deserialize)]
struct GeniusResponse {
    hits: Vec<GeniusHit>,
}

#[derive(Debug, Deserialize)]
struct GeniusHit {
    #[serde(rename = "type")]
    kind: String,
    result: GeniusSong,
}

#[derive(Debug, Deserialize)]
struct GeniusSong {
    title: String,
    url: String,
}
