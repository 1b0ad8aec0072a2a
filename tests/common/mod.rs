#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    path::PathBuf,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use lyricollect::{
    Res,
    genius::LyricsSource,
    http::{HttpReply, HttpRequest, Transport},
    lyrics::LyricsResolver,
    management::RecordFile,
    pipeline::Pipeline,
    spotify::{SpotifyClient, TokenProvider},
    types::{Credentials, SongLyrics, Target},
};

pub const API_URL: &str = "http://catalog.test/v1";
pub const TOKEN_URL: &str = "http://accounts.test/api/token";
pub const GENIUS_URL: &str = "http://genius.test";

#[derive(Clone)]
enum Scripted {
    Reply(HttpReply),
    Fail(String),
}

/// Answers requests from per-URL queues. The last queued answer for a URL
/// is repeated for every further request; unknown URLs get a 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, url: &str, status: u16, body: impl Into<String>) -> &Self {
        self.push(url, Scripted::Reply(HttpReply::new(status, body)))
    }

    pub fn fail(&self, url: &str, message: &str) -> &Self {
        self.push(url, Scripted::Fail(message.to_string()))
    }

    fn push(&self, url: &str, answer: Scripted) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.url == url)
            .collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Res<HttpReply> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        let answer = {
            let mut routes = self.routes.lock().unwrap();
            match routes.get_mut(&url) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match answer {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(message)) => Err(message.into()),
            None => Ok(HttpReply::new(404, "{}")),
        }
    }
}

/// Lyrics answers keyed by track title, with the same repeat-last rule.
/// Titles without answers are "not found".
#[derive(Default)]
pub struct ScriptedLyrics {
    answers: Mutex<HashMap<String, VecDeque<Result<Option<String>, String>>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedLyrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lyrics(&self, title: &str, text: &str) -> &Self {
        self.push(title, Ok(Some(text.to_string())))
    }

    pub fn missing(&self, title: &str) -> &Self {
        self.push(title, Ok(None))
    }

    pub fn fail(&self, title: &str, message: &str) -> &Self {
        self.push(title, Err(message.to_string()))
    }

    fn push(&self, title: &str, answer: Result<Option<String>, String>) -> &Self {
        self.answers
            .lock()
            .unwrap()
            .entry(title.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn calls_for(&self, title: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.as_str() == title)
            .count()
    }
}

#[async_trait]
impl LyricsSource for ScriptedLyrics {
    async fn search(&self, title: &str, _artist: &str) -> Res<Option<SongLyrics>> {
        self.calls.lock().unwrap().push(title.to_string());

        let answer = {
            let mut answers = self.answers.lock().unwrap();
            match answers.get_mut(title) {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match answer {
            Some(Ok(Some(text))) => Ok(Some(SongLyrics {
                title: title.to_string(),
                url: format!("{}/songs/{}", GENIUS_URL, title.replace(' ', "-")),
                lyrics: text,
            })),
            Some(Ok(None)) | None => Ok(None),
            Some(Err(message)) => Err(message.into()),
        }
    }
}

pub fn token_json() -> String {
    r#"{"access_token":"tok-123","token_type":"Bearer","expires_in":3600}"#.to_string()
}

pub fn artist_search_json(artists: &[(&str, &str)]) -> String {
    let items: Vec<String> = artists
        .iter()
        .map(|(id, name)| format!(r#"{{"id":"{}","name":"{}","genres":["hip hop"]}}"#, id, name))
        .collect();
    format!(
        r#"{{"artists":{{"href":"x","items":[{}],"next":null,"total":{}}}}}"#,
        items.join(","),
        artists.len()
    )
}

pub fn albums_json(albums: &[(&str, &str)], next: Option<&str>) -> String {
    let items: Vec<String> = albums
        .iter()
        .map(|(id, name)| {
            format!(
                r#"{{"id":"{}","name":"{}","album_type":"album","release_date":"2018-08-03"}}"#,
                id, name
            )
        })
        .collect();
    page_json(&items, next)
}

pub fn tracks_json(tracks: &[(&str, &str)], next: Option<&str>) -> String {
    let items: Vec<String> = tracks
        .iter()
        .enumerate()
        .map(|(i, (id, name))| {
            format!(
                r#"{{"id":"{}","name":"{}","track_number":{},"duration_ms":200000}}"#,
                id,
                name,
                i + 1
            )
        })
        .collect();
    page_json(&items, next)
}

fn page_json(items: &[String], next: Option<&str>) -> String {
    let next = next.map_or_else(|| "null".to_string(), |n| format!("\"{}\"", n));
    format!(
        r#"{{"items":[{}],"next":{},"total":{}}}"#,
        items.join(","),
        next,
        items.len()
    )
}

pub fn albums_url(artist_id: &str) -> String {
    format!("{}/artists/{}/albums", API_URL, artist_id)
}

pub fn tracks_url(album_id: &str) -> String {
    format!("{}/albums/{}/tracks", API_URL, album_id)
}

pub fn search_url() -> String {
    format!("{}/search", API_URL)
}

/// A temporary output path unique to the test and the process.
pub fn temp_output(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "lyricollect-{}-{}.jsonl",
        name,
        std::process::id()
    ))
}

pub fn pipeline(
    transport: Arc<ScriptedTransport>,
    lyrics: Arc<ScriptedLyrics>,
    output: PathBuf,
) -> Pipeline {
    let token_provider = TokenProvider::new(transport.clone(), TOKEN_URL);
    let catalog = SpotifyClient::new(transport, API_URL);
    let resolver = LyricsResolver::new(lyrics);

    Pipeline::new(
        Credentials::new("client", "secret"),
        Target {
            artist_name: "Mac Miller".to_string(),
            album_name: "Swimming".to_string(),
        },
        token_provider,
        catalog,
        resolver,
        RecordFile::new(output),
    )
}
