use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use crate::{failure, genius::LyricsSource, types::LyricsResult};

use super::TextNormalizer;

/// Looks up lyrics with a small, fixed retry budget.
pub struct LyricsResolver {
    source: Arc<dyn LyricsSource>,
    normalizer: TextNormalizer,
    attempts: u32,
    retry_delay: Duration,
}

impl LyricsResolver {
    pub fn new(source: Arc<dyn LyricsSource>) -> Self {
        Self {
            source,
            normalizer: TextNormalizer::default(),
            attempts: 2,
            retry_delay: Duration::from_secs(1),
        }
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Finds and cleans the lyrics of one track.
    ///
    /// # Retry Logic
    ///
    /// Only failed lookups are retried, after a fixed delay, until the attempt
    /// budget is spent. A lookup that succeeds without usable text is final:
    /// asking again would get the same answer.
    ///
    /// # Returns
    ///
    /// - found: the normalized lyrics
    /// - not_found: the service had no song or the song had no text
    /// - error: every attempt failed
    pub async fn resolve(&self, artist_name: &str, track_title: &str) -> LyricsResult {
        for attempt in 1..=self.attempts {
            match self.source.search(track_title, artist_name).await {
                Ok(Some(song)) if !song.lyrics.trim().is_empty() => {
                    return LyricsResult::found(self.normalizer.clean(&song.lyrics));
                }
                Ok(_) => return LyricsResult::not_found(),
                Err(e) => {
                    failure!(
                        "  -> Attempt {} failed for '{}': {}",
                        attempt,
                        track_title,
                        e
                    );
                    if attempt < self.attempts {
                        sleep(self.retry_delay).await;
                    }
                }
            }
        }

        LyricsResult::error()
    }
}
