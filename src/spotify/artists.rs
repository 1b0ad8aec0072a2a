use crate::{
    failure,
    http::HttpRequest,
    types::{AccessToken, Artist, ArtistSearchResponse},
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Looks an artist up by name.
    ///
    /// Queries `/search` with `type=artist` and `limit=1` and returns the
    /// single best match. Spotify's relevance ordering decides which artist
    /// that is; no further name comparison happens here.
    ///
    /// # Returns
    ///
    /// - `Some(Artist)` - The first search result
    /// - `None` - No match, or the request failed (the failure is logged)
    pub async fn search_artist(&self, token: &AccessToken, name: &str) -> Option<Artist> {
        let request = HttpRequest::get(format!("{uri}/search", uri = self.api_url))
            .bearer(&token.access_token)
            .query("q", name)
            .query("type", "artist")
            .query("limit", 1);

        let reply = match self.transport.execute(request).await {
            Ok(reply) => reply,
            Err(e) => {
                failure!("Spotify HTTP error (artist search): {}", e);
                return None;
            }
        };

        if !reply.is_success() {
            failure!("Spotify HTTP error (artist search): status {}", reply.status);
            return None;
        }

        match reply.json::<ArtistSearchResponse>() {
            Ok(res) => res.artists.items.into_iter().next(),
            Err(e) => {
                failure!("Spotify artist search response could not be parsed: {}", e);
                None
            }
        }
    }
}
