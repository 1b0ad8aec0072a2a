use std::sync::Arc;

use crate::{
    failure,
    http::{HttpRequest, Transport},
    types::{AccessToken, Credentials},
    utils,
};

/// Exchanges client credentials for an access token.
pub struct TokenProvider {
    transport: Arc<dyn Transport>,
    token_url: String,
}

impl TokenProvider {
    pub fn new(transport: Arc<dyn Transport>, token_url: impl Into<String>) -> Self {
        Self {
            transport,
            token_url: token_url.into(),
        }
    }

    /// Requests a token with the OAuth 2.0 client credentials grant.
    ///
    /// The credentials travel as HTTP Basic auth, the grant type as a form
    /// field. Exactly one request is made.
    ///
    /// # Returns
    ///
    /// `Some(AccessToken)` on a 2xx reply carrying an `access_token`, otherwise
    /// `None` after logging the reason. The caller treats `None` as "the run
    /// cannot proceed"; retrying is up to the caller.
    ///
    /// # Example
    ///
    /// ```
    /// let provider = TokenProvider::new(transport, "https://accounts.spotify.com/api/token");
    /// if let Some(token) = provider.obtain_token(&credentials).await {
    ///     println!("Token expires in {} seconds", token.expires_in);
    /// }
    /// ```
    pub async fn obtain_token(&self, credentials: &Credentials) -> Option<AccessToken> {
        let request = HttpRequest::post(&self.token_url)
            .header(
                "Authorization",
                utils::basic_auth_header(&credentials.client_id, &credentials.client_secret),
            )
            .form("grant_type", "client_credentials");

        let reply = match self.transport.execute(request).await {
            Ok(reply) => reply,
            Err(e) => {
                failure!("Spotify HTTP error (token): {}", e);
                return None;
            }
        };

        if !reply.is_success() {
            failure!("Spotify HTTP error (token): status {}", reply.status);
            return None;
        }

        match reply.json::<AccessToken>() {
            Ok(token) if !token.access_token.is_empty() => Some(token),
            Ok(_) => {
                failure!("Spotify token response carried an empty access token");
                None
            }
            Err(e) => {
                failure!("Spotify token response could not be parsed: {}", e);
                None
            }
        }
    }
}
