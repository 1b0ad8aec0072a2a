use serde::de::DeserializeOwned;

use crate::{
    failure,
    http::HttpRequest,
    types::{AccessToken, Album, Page, Track},
    warning,
};

use super::SpotifyClient;

impl SpotifyClient {
    /// Lists the artist's albums.
    ///
    /// Only the `album` release group is requested, so singles, compilations
    /// and "appears on" releases never show up. Order is Spotify's.
    ///
    /// # Error Handling
    ///
    /// A failed first page yields an empty list; a failure on a later page
    /// keeps whatever the earlier pages returned. Both are logged.
    pub async fn list_albums(&self, token: &AccessToken, artist_id: &str) -> Vec<Album> {
        let request = HttpRequest::get(format!(
            "{uri}/artists/{id}/albums",
            uri = self.api_url,
            id = artist_id
        ))
        .query("include_groups", "album")
        .query("limit", self.page_size);

        self.fetch_pages(token, request, "albums").await
    }

    /// Lists the album's tracks in catalog order.
    ///
    /// Same paging and error behavior as [`SpotifyClient::list_albums`].
    pub async fn list_tracks(&self, token: &AccessToken, album_id: &str) -> Vec<Track> {
        let request = HttpRequest::get(format!(
            "{uri}/albums/{id}/tracks",
            uri = self.api_url,
            id = album_id
        ))
        .query("limit", self.page_size);

        self.fetch_pages(token, request, "tracks").await
    }

    async fn fetch_pages<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        first: HttpRequest,
        what: &str,
    ) -> Vec<T> {
        let mut items: Vec<T> = Vec::new();
        let mut request = first;
        let mut pages = 0;

        loop {
            pages += 1;

            let reply = match self
                .transport
                .execute(request.bearer(&token.access_token))
                .await
            {
                Ok(reply) => reply,
                Err(e) => {
                    failure!("Spotify HTTP error ({}): {}", what, e);
                    break;
                }
            };

            if !reply.is_success() {
                failure!("Spotify HTTP error ({}): status {}", what, reply.status);
                break;
            }

            let page = match reply.json::<Page<T>>() {
                Ok(page) => page,
                Err(e) => {
                    failure!("Spotify {} response could not be parsed: {}", what, e);
                    break;
                }
            };

            items.extend(page.items);

            match page.next {
                Some(next) if pages < self.max_pages => {
                    // the next link already carries every query parameter
                    request = HttpRequest::get(next);
                }
                Some(_) => {
                    warning!(
                        "Only the first {} page(s) of {} were fetched ({} of {} items).",
                        self.max_pages,
                        what,
                        items.len(),
                        page.total.map_or_else(|| "?".to_string(), |t| t.to_string())
                    );
                    break;
                }
                None => break,
            }
        }

        items
    }
}
