//! # Collection Pipeline
//!
//! One run goes through these stages, strictly in order:
//!
//! ```text
//! INIT → TOKEN_ACQUIRED → ARTIST_RESOLVED → ALBUM_SELECTED → TRACKS_LISTED
//!      → (per track: LYRICS_FETCHED → LANGUAGE_DETECTED → RECORD_APPENDED)*
//!      → SERIALIZED → DONE
//! ```
//!
//! A missing token, artist or album ends the run before any track is looked
//! at; the run then writes nothing. Everything that goes wrong for a single
//! track stays inside that track's record.
//!
//! Tracks may be processed concurrently (`concurrency > 1`). Results are
//! still collected in catalog order, so the output file does not depend on
//! which lookup finished first.

use std::{path::PathBuf, sync::Arc, time::Duration};

use futures::{StreamExt, stream};
use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use crate::{
    Res,
    config::Settings,
    failure,
    genius::GeniusClient,
    http::{ReqwestTransport, Transport},
    info,
    language::LanguageDetector,
    lyrics::LyricsResolver,
    management::{OutputError, RecordFile},
    spotify::{SpotifyClient, TokenProvider},
    success,
    types::{
        Album, Artist, Credentials, Target, Track, TrackOutcome, TrackRecord, UNKNOWN_LANGUAGE,
    },
    warning,
};

/// Why a run stopped without producing records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HaltReason {
    #[error("could not obtain a Spotify access token")]
    AuthFailure,

    #[error("artist '{0}' was not found on Spotify")]
    ArtistNotFound(String),

    #[error("album '{album}' was not found among the albums of {artist}")]
    AlbumNotFound { artist: String, album: String },

    #[error("album '{0}' has no tracks")]
    NoTracks(String),
}

#[derive(Debug)]
pub enum RunOutcome {
    Written {
        path: PathBuf,
        outcomes: Vec<TrackOutcome>,
        replaced: bool,
    },
    Halted(HaltReason),
}

pub struct Pipeline {
    credentials: Credentials,
    target: Target,
    token_provider: TokenProvider,
    catalog: SpotifyClient,
    resolver: LyricsResolver,
    detector: LanguageDetector,
    output: RecordFile,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(
        credentials: Credentials,
        target: Target,
        token_provider: TokenProvider,
        catalog: SpotifyClient,
        resolver: LyricsResolver,
        output: RecordFile,
    ) -> Self {
        Self {
            credentials,
            target,
            token_provider,
            catalog,
            resolver,
            detector: LanguageDetector::new(),
            output,
            concurrency: 1,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Wires the production clients from the configuration.
    ///
    /// Catalog and lyrics requests get separate transports because lyrics
    /// pages are slow and need the longer timeout.
    pub fn from_settings(settings: &Settings) -> Res<Self> {
        let catalog_transport: Arc<dyn Transport> =
            Arc::new(ReqwestTransport::new(settings.catalog_timeout)?);
        let lyrics_transport: Arc<dyn Transport> =
            Arc::new(ReqwestTransport::new(settings.lyrics_timeout)?);

        let token_provider =
            TokenProvider::new(Arc::clone(&catalog_transport), &settings.spotify_token_url);
        let catalog = SpotifyClient::new(catalog_transport, &settings.spotify_api_url)
            .with_page_size(settings.catalog_page_size)
            .with_max_pages(settings.catalog_max_pages);

        let genius = GeniusClient::new(
            lyrics_transport,
            &settings.genius_api_url,
            &settings.genius_token,
        )
        .with_excluded_terms(settings.excluded_terms.clone());
        let resolver = LyricsResolver::new(Arc::new(genius))
            .with_attempts(settings.lyrics_attempts)
            .with_retry_delay(settings.lyrics_retry_delay);

        Ok(Self::new(
            settings.credentials.clone(),
            settings.target.clone(),
            token_provider,
            catalog,
            resolver,
            RecordFile::new(&settings.output_path),
        )
        .with_concurrency(settings.concurrency))
    }

    /// Runs every stage and writes the output file.
    ///
    /// # Returns
    ///
    /// - `Ok(RunOutcome::Written)` - One record per track was written
    /// - `Ok(RunOutcome::Halted)` - The run stopped early; no file was touched
    /// - `Err(OutputError)` - Records were collected but could not be written
    pub async fn run(&self) -> Result<RunOutcome, OutputError> {
        let outcomes = match self.collect().await {
            Ok(outcomes) => outcomes,
            Err(reason) => {
                failure!("{}. Nothing was written.", reason);
                return Ok(RunOutcome::Halted(reason));
            }
        };

        let records: Vec<TrackRecord> = outcomes.iter().map(|o| o.record.clone()).collect();
        info!(
            "Writing {} tracks to {}...",
            records.len(),
            self.output.path().display()
        );

        let replaced = self.output.persist(&records).await?;
        if replaced {
            info!("Replaced existing file: {}", self.output.path().display());
        }
        success!("Done!");

        Ok(RunOutcome::Written {
            path: self.output.path().to_path_buf(),
            outcomes,
            replaced,
        })
    }

    /// Runs every stage up to, but not including, serialization.
    pub async fn collect(&self) -> Result<Vec<TrackOutcome>, HaltReason> {
        let token = self
            .token_provider
            .obtain_token(&self.credentials)
            .await
            .ok_or(HaltReason::AuthFailure)?;

        let artist = self
            .catalog
            .search_artist(&token, &self.target.artist_name)
            .await
            .ok_or_else(|| HaltReason::ArtistNotFound(self.target.artist_name.clone()))?;
        info!("Found artist: {} (Spotify ID: {})", artist.name, artist.id);

        let album = self
            .catalog
            .list_albums(&token, &artist.id)
            .await
            .into_iter()
            .find(|a| a.name == self.target.album_name)
            .ok_or_else(|| HaltReason::AlbumNotFound {
                artist: artist.name.clone(),
                album: self.target.album_name.clone(),
            })?;
        info!("--- Processing Album: {} ---", album.name);

        let tracks = self.catalog.list_tracks(&token, &album.id).await;
        if tracks.is_empty() {
            return Err(HaltReason::NoTracks(album.name));
        }

        let pb = ProgressBar::new(tracks.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));

        let (artist, album, progress) = (&artist, &album, &pb);
        let outcomes: Vec<TrackOutcome> = stream::iter(tracks.iter())
            .map(move |track| self.process_track(artist, album, track, progress))
            .buffered(self.concurrency)
            .collect()
            .await;

        pb.finish_and_clear();
        Ok(outcomes)
    }

    async fn process_track(
        &self,
        artist: &Artist,
        album: &Album,
        track: &Track,
        pb: &ProgressBar,
    ) -> TrackOutcome {
        pb.set_message(format!("Fetching data for track: {}...", track.name));

        let lyrics = self.resolver.resolve(&artist.name, &track.name).await;

        let language = self.detector.detect(&lyrics.text);
        if language != "en" && language != UNKNOWN_LANGUAGE {
            pb.suspend(|| {
                warning!(
                    "  -> Detected language is '{}' for track '{}'",
                    language,
                    track.name
                )
            });
        }

        pb.inc(1);

        TrackOutcome {
            record: TrackRecord {
                artist: artist.name.clone(),
                album: album.name.clone(),
                track_title: track.name.clone(),
                lyrics: lyrics.text,
                language,
            },
            status: lyrics.status,
        }
    }
}
