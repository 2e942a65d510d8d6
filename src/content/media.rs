//! Helpers for embedded media and HTML excerpts

use once_cell::sync::Lazy;
use regex::Regex;

static AUDIO_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<audio.*?</audio>").unwrap());
static AUDIO_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<figure class="wp-block-audio".*?</figure>"#).unwrap());
static VIDEO_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<video.*?</video>").unwrap());
static VIDEO_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<figure class="wp-block-video".*?</figure>"#).unwrap());
static SRC_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src="([^"]+)""#).unwrap());
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn first_match(html: &str, patterns: [&Regex; 2]) -> String {
    patterns
        .iter()
        .find_map(|re| re.find(html))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First `<audio>` element or `wp-block-audio` figure, else empty
pub fn extract_audio_embed(html: &str) -> String {
    first_match(html, [&AUDIO_TAG, &AUDIO_BLOCK])
}

/// First `<video>` element or `wp-block-video` figure, else empty
pub fn extract_video_embed(html: &str) -> String {
    first_match(html, [&VIDEO_TAG, &VIDEO_BLOCK])
}

/// `src` of the first element carrying one
pub fn embed_source(embed: &str) -> Option<String> {
    SRC_ATTR.captures(embed).map(|c| c[1].to_string())
}

/// Plain text of an HTML fragment
pub fn strip_html(html: &str) -> String {
    let text = TAG.replace_all(html, " ");
    let decoded = text
        .replace("&nbsp;", " ")
        .replace("&#8217;", "'")
        .replace("&rsquo;", "'")
        .replace("&#8230;", "...")
        .replace("&hellip;", "...")
        .replace("&#8211;", "-")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}
