use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const CONTAINER_MARKER: &str = "data-lyrics-container=\"true\"";

static DIV_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").expect("div pattern is valid"));
static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").expect("br pattern is valid"));
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity pattern is valid")
});

/// Pulls the lyrics text out of a Genius song page.
///
/// Every `<div data-lyrics-container="true">` block is converted to plain text
/// (`<br>` becomes a newline, other tags are dropped, entities decoded) and the
/// blocks are joined with newlines. Returns an empty string when the page has
/// no lyrics container, e.g. for instrumentals.
pub fn extract_lyrics(html: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut cursor = 0;

    while let Some(found) = html[cursor..].find(CONTAINER_MARKER) {
        let marker_at = cursor + found;
        let content_start = match html[marker_at..].find('>') {
            Some(offset) => marker_at + offset + 1,
            None => break,
        };

        let content_end = closing_div(html, content_start).unwrap_or(html.len());
        blocks.push(to_text(&html[content_start..content_end]));
        cursor = content_end;
    }

    blocks.join("\n")
}

/// Byte offset of the `</div>` that closes a div whose content starts at `from`.
fn closing_div(html: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for tag in DIV_TAG.captures_iter(&html[from..]) {
        let whole = tag.get(0)?;
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(from + whole.start());
            }
        }
    }
    None
}

fn to_text(fragment: &str) -> String {
    let with_breaks = LINE_BREAK.replace_all(fragment, "\n");
    let without_tags = ANY_TAG.replace_all(&with_breaks, "");
    decode_entities(&without_tags)
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            let decoded = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ if name.starts_with("#x") || name.starts_with("#X") => {
                    u32::from_str_radix(&name[2..], 16).ok().and_then(char::from_u32)
                }
                _ if name.starts_with('#') => name[1..].parse().ok().and_then(char::from_u32),
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}
