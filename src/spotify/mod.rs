//! # Spotify Integration Module
//!
//! Client for the parts of the Spotify Web API the collector needs: the
//! client-credentials token exchange and three catalog reads.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline
//!     ↓
//! Spotify Integration Layer
//!     ├── Authentication (client credentials)
//!     ├── Artist search
//!     └── Albums and tracks (paged)
//!          ↓
//! Transport (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Error Handling Philosophy
//!
//! None of the functions here return errors. A failed token exchange yields
//! `None`; failed catalog reads are logged and yield `None` or an empty list.
//! The pipeline decides what an empty answer means for the run.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Client credentials grant
//! - `GET /search` - Artist lookup by name
//! - `GET /artists/{id}/albums` - The artist's albums
//! - `GET /albums/{id}/tracks` - The album's track listing

use std::sync::Arc;

use crate::http::Transport;

mod albums;
mod artists;
pub mod auth;

pub use auth::TokenProvider;

/// Catalog reads against the Spotify Web API.
///
/// Album and track listings follow the paging object's `next` link, but never
/// fetch more than `max_pages` pages. The default of one page covers any
/// regular album.
pub struct SpotifyClient {
    transport: Arc<dyn Transport>,
    api_url: String,
    page_size: u32,
    max_pages: u32,
}

impl SpotifyClient {
    pub fn new(transport: Arc<dyn Transport>, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            page_size: 50,
            max_pages: 1,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}
