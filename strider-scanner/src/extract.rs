//! Pattern based signal extraction.
//!
//! Pages are scanned with regular expressions rather than parsed into a DOM,
//! so nested or malformed markup is matched exactly as the patterns allow.
//! A pattern that finds nothing yields an empty value, never an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static INTERNAL_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\s[^>]*?href="/([^"]*)""#).unwrap());

static EXTERNAL_LINK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<a\s[^>]*?href="http([^"]*)""#).unwrap());

static IMAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\s[^>]*?src="([^"]*)""#).unwrap());

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title>(.*?)</title>").unwrap());

static SCRIPT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").unwrap());

static HEAD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<head\b.*?</head>").unwrap());

static STYLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style>").unwrap());

static COMMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

static CDATA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Everything pulled out of a single response body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSignals {
    pub title: String,
    pub word_text: String,
    pub internal_links: Vec<String>,
    pub external_links: Vec<String>,
    pub images: Vec<String>,
}

pub fn extract_signals(body: &str) -> PageSignals {
    PageSignals {
        title: extract_title(body),
        word_text: extract_word_text(body),
        internal_links: extract_internal_links(body),
        external_links: extract_external_links(body),
        images: extract_images(body),
    }
}

/// Path fragments of `<a href="/...">` links, without the leading slash.
pub fn extract_internal_links(body: &str) -> Vec<String> {
    captures(&INTERNAL_LINK_REGEX, body)
}

/// Whatever follows the literal `http` in `<a href="http...">` links.
pub fn extract_external_links(body: &str) -> Vec<String> {
    captures(&EXTERNAL_LINK_REGEX, body)
}

pub fn extract_images(body: &str) -> Vec<String> {
    captures(&IMAGE_REGEX, body)
}

pub fn extract_title(body: &str) -> String {
    TITLE_REGEX
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Visible text of the page: script, head and style blocks, comments and
/// CDATA sections are dropped, then every remaining tag is stripped.
pub fn extract_word_text(body: &str) -> String {
    let text = SCRIPT_REGEX.replace_all(body, "");
    let text = HEAD_REGEX.replace_all(&text, "");
    let text = STYLE_REGEX.replace_all(&text, "");
    let text = COMMENT_REGEX.replace_all(&text, "");
    let text = CDATA_REGEX.replace_all(&text, "");
    TAG_REGEX.replace_all(&text, "").into_owned()
}

fn captures(regex: &Regex, body: &str) -> Vec<String> {
    regex
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
