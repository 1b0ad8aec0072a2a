mod common;

use common::*;
use lyricollect::genius::{GeniusClient, LyricsSource};

fn search_url() -> String {
    format!("{}/search", GENIUS_URL)
}

fn hits_json(hits: &[(&str, &str, &str)]) -> String {
    let items: Vec<String> = hits
        .iter()
        .map(|(kind, title, url)| {
            format!(
                r#"{{"index":"song","type":"{}","result":{{"id":1,"title":"{}","url":"{}","primary_artist":{{"name":"Mac Miller"}}}}}}"#,
                kind, title, url
            )
        })
        .collect();
    format!(
        r#"{{"meta":{{"status":200}},"response":{{"hits":[{}]}}}}"#,
        items.join(",")
    )
}

fn song_page(body: &str) -> String {
    format!(
        r#"<html><body><div class="Header">Hurt Feelings Lyrics</div><div data-lyrics-container="true" class="Lyrics__Container">{}</div></body></html>"#,
        body
    )
}

#[tokio::test]
async fn test_search_prefers_exact_title_and_extracts_lyrics() {
    let transport = ScriptedTransport::new();
    transport
        .reply(
            &search_url(),
            200,
            hits_json(&[
                ("song", "Hurt Feelings (Remix)", "http://genius.test/remix"),
                ("song", "Hurt Feelings", "http://genius.test/hurt-feelings"),
            ]),
        )
        .reply(
            "http://genius.test/hurt-feelings",
            200,
            song_page("[Verse 1]<br/>Hurt feelings, got a couple"),
        );

    let client = GeniusClient::new(transport.clone(), GENIUS_URL, "genius-token");
    let song = client
        .search("Hurt Feelings", "Mac Miller")
        .await
        .unwrap()
        .expect("song");

    assert_eq!(song.title, "Hurt Feelings");
    assert_eq!(song.url, "http://genius.test/hurt-feelings");
    assert_eq!(song.lyrics, "[Verse 1]\nHurt feelings, got a couple");

    let search = &transport.requests_to(&search_url())[0];
    assert_eq!(search.query_value("q"), Some("Hurt Feelings Mac Miller"));
    assert_eq!(search.header_value("Authorization"), Some("Bearer genius-token"));
    assert!(transport.requests_to("http://genius.test/remix").is_empty());
}

#[tokio::test]
async fn test_search_falls_back_to_first_song_hit() {
    let transport = ScriptedTransport::new();
    transport
        .reply(
            &search_url(),
            200,
            hits_json(&[
                ("album", "Swimming", "http://genius.test/albums/swimming"),
                ("song", "Self Care (feat. someone)", "http://genius.test/self-care"),
            ]),
        )
        .reply("http://genius.test/self-care", 200, song_page("[Intro]<br/>Ooh"));

    let client = GeniusClient::new(transport, GENIUS_URL, "genius-token");
    let song = client.search("Self Care", "Mac Miller").await.unwrap().unwrap();

    assert_eq!(song.url, "http://genius.test/self-care");
}

#[tokio::test]
async fn test_search_rejects_excluded_and_non_song_pages() {
    let transport = ScriptedTransport::new();
    transport.reply(
        &search_url(),
        200,
        hits_json(&[("song", "Dunno (Live)", "http://genius.test/dunno-live")]),
    );
    let client = GeniusClient::new(transport.clone(), GENIUS_URL, "t")
        .with_excluded_terms(vec!["(Remix)".to_string(), "(live)".to_string()]);
    assert!(client.search("Dunno", "Mac Miller").await.unwrap().is_none());
    assert!(transport.requests_to("http://genius.test/dunno-live").is_empty());

    let transport = ScriptedTransport::new();
    transport.reply(
        &search_url(),
        200,
        hits_json(&[("song", "Swimming Tracklist", "http://genius.test/tracklist")]),
    );
    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    assert!(client.search("Swimming", "Mac Miller").await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_without_hits_is_not_an_error() {
    let transport = ScriptedTransport::new();
    transport.reply(&search_url(), 200, hits_json(&[]));

    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    assert!(client.search("Unknown", "Nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_song_page_without_lyrics_yields_empty_text() {
    let transport = ScriptedTransport::new();
    transport
        .reply(
            &search_url(),
            200,
            hits_json(&[("song", "Intro", "http://genius.test/intro")]),
        )
        .reply(
            "http://genius.test/intro",
            200,
            "<html><body>This song is an instrumental</body></html>",
        );

    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    let song = client.search("Intro", "Mac Miller").await.unwrap().unwrap();
    assert_eq!(song.lyrics, "");
}

#[tokio::test]
async fn test_failures_are_errors() {
    let transport = ScriptedTransport::new();
    transport.reply(&search_url(), 503, "unavailable");
    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    assert!(client.search("Jet Fuel", "Mac Miller").await.is_err());

    let transport = ScriptedTransport::new();
    transport.fail(&search_url(), "read timed out");
    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    assert!(client.search("Jet Fuel", "Mac Miller").await.is_err());

    let transport = ScriptedTransport::new();
    transport
        .reply(
            &search_url(),
            200,
            hits_json(&[("song", "Jet Fuel", "http://genius.test/jet-fuel")]),
        )
        .reply("http://genius.test/jet-fuel", 500, "");
    let client = GeniusClient::new(transport, GENIUS_URL, "t");
    assert!(client.search("Jet Fuel", "Mac Miller").await.is_err());
}
