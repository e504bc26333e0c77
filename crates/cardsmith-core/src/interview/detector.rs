//! Image URL detection and asset locking.
//!
//! Any `http://` or `https://` link typed by the user is treated as a
//! must-use asset. Detection is pure; locking appends to the session's
//! asset list without ever reordering or rewriting existing entries.

use std::sync::LazyLock;

use cardsmith_types::interview::LockedAsset;
use regex::Regex;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("Invalid URL pattern"));

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

/// Extract every URL in `text`, in order of appearance.
///
/// Trailing sentence punctuation and unbalanced closing brackets or quotes
/// are trimmed. Matches that are only a scheme (`https://`) are skipped.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .filter_map(|m| {
            let url = trim_url(m.as_str());
            has_host(url).then(|| url.to_string())
        })
        .collect()
}

/// Remove URLs from `text` and collapse the leftover whitespace.
pub fn strip_urls(text: &str) -> String {
    URL_PATTERN
        .replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Append each URL that is not already locked (exact, case-sensitive match).
///
/// Returns the URLs that were newly locked by this call.
pub fn lock_assets(assets: &mut Vec<LockedAsset>, urls: &[String]) -> Vec<String> {
    let mut added = Vec::new();
    for url in urls {
        if assets.iter().any(|asset| asset.url == *url) {
            continue;
        }
        assets.push(LockedAsset { url: url.clone() });
        added.push(url.clone());
    }
    added
}

fn trim_url(raw: &str) -> &str {
    let mut url = raw;
    loop {
        let Some(last) = url.chars().last() else {
            return url;
        };
        let trim = match last {
            c if TRAILING_PUNCTUATION.contains(&c) => true,
            '"' | '\'' | '>' => true,
            ')' => is_unbalanced(url, '(', ')'),
            ']' => is_unbalanced(url, '[', ']'),
            '}' => is_unbalanced(url, '{', '}'),
            _ => false,
        };
        if !trim {
            return url;
        }
        url = &url[..url.len() - last.len_utf8()];
    }
}

fn is_unbalanced(url: &str, open: char, close: char) -> bool {
    url.matches(close).count() > url.matches(open).count()
}

fn has_host(url: &str) -> bool {
    url.split_once("://")
        .is_some_and(|(_, rest)| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_multiple_urls_in_order() {
        let text = "Use https://one.example/img.jpg and also http://two.example/a.png";
        assert_eq!(
            extract_urls(text),
            vec!["https://one.example/img.jpg", "http://two.example/a.png"]
        );
    }

    #[test]
    fn test_extract_url_mid_sentence() {
        let urls = extract_urls("use this photo https://example.com/img.png for the background");
        assert_eq!(urls, vec!["https://example.com/img.png"]);
    }

    #[test]
    fn test_extract_trims_trailing_punctuation() {
        let urls = extract_urls("Logo is at https://cdn.example/logo.svg. Thanks!");
        assert_eq!(urls, vec!["https://cdn.example/logo.svg"]);

        let urls = extract_urls("see https://example.com/a.png, https://example.com/b.png;");
        assert_eq!(urls, vec!["https://example.com/a.png", "https://example.com/b.png"]);
    }

    #[test]
    fn test_extract_trims_unbalanced_brackets_only() {
        let urls = extract_urls("(photo: https://example.com/pic.jpg)");
        assert_eq!(urls, vec!["https://example.com/pic.jpg"]);

        let urls = extract_urls("https://en.example.org/wiki/Card_(paper)");
        assert_eq!(urls, vec!["https://en.example.org/wiki/Card_(paper)"]);
    }

    #[test]
    fn test_extract_scheme_is_case_insensitive() {
        let urls = extract_urls("HTTPS://Example.com/Photo.PNG");
        assert_eq!(urls, vec!["HTTPS://Example.com/Photo.PNG"]);
    }

    #[test]
    fn test_extract_keeps_query_strings() {
        let url = "https://images.example/p.jpeg?auto=compress&w=940";
        assert_eq!(extract_urls(&format!("bg: {url}")), vec![url]);
    }

    #[test]
    fn test_extract_ignores_bare_scheme_and_plain_text() {
        assert!(extract_urls("just https:// nothing").is_empty());
        assert!(extract_urls("no links here, www.example.com").is_empty());
        assert!(extract_urls("").is_empty());
    }

    #[test]
    fn test_strip_urls_collapses_whitespace() {
        assert_eq!(
            strip_urls("use this photo https://example.com/img.png for the background"),
            "use this photo for the background"
        );
        assert_eq!(strip_urls("https://example.com/a.png"), "");
        assert_eq!(strip_urls("Birthday"), "Birthday");
    }

    #[test]
    fn test_lock_assets_dedups_exact_matches() {
        let mut assets = Vec::new();
        let first = lock_assets(
            &mut assets,
            &["https://a.example/x.png".to_string(), "https://a.example/x.png".to_string()],
        );
        assert_eq!(first, vec!["https://a.example/x.png"]);

        let second = lock_assets(&mut assets, &["https://a.example/x.png".to_string()]);
        assert!(second.is_empty());
        assert_eq!(assets.len(), 1);
    }

    #[test]
    fn test_lock_assets_treats_case_and_trailing_slash_as_distinct() {
        let mut assets = Vec::new();
        let urls = vec![
            "https://a.example/x".to_string(),
            "https://a.example/x/".to_string(),
            "https://A.example/x".to_string(),
        ];
        let added = lock_assets(&mut assets, &urls);
        assert_eq!(added, urls);
        let locked: Vec<&str> = assets.iter().map(|a| a.url.as_str()).collect();
        assert_eq!(locked, vec!["https://a.example/x", "https://a.example/x/", "https://A.example/x"]);
    }

    #[test]
    fn test_every_url_survives_detection_and_locking() {
        let text = "a https://x.example/1.png b https://x.example/2.png c https://x.example/1.png";
        let urls = extract_urls(text);
        assert_eq!(urls.len(), 3);

        let mut assets = Vec::new();
        lock_assets(&mut assets, &urls);
        assert_eq!(assets.len(), 2);
        for url in &urls {
            assert!(assets.iter().any(|a| &a.url == url));
        }
    }
}
