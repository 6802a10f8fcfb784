use std::io::Cursor;

use ae_core::Article;
use scraper::Html;
use tracing::{debug, warn};
use url::Url;

const NON_CONTENT_ELEMENTS: &[&str] = &["head", "title", "script", "style", "noscript"];

/// Run readability over `html` and return the article as plain text.
///
/// `url` is the page address, used to resolve relative links. Any failure
/// is logged and turns into `None`, as does a page whose main content has
/// no text.
pub fn extract_article(html: &str, url: &str) -> Option<Article> {
    let base = match Url::parse(url) {
        Ok(base) => base,
        Err(e) => {
            warn!("Cannot use {} as base URL: {}", url, e);
            return None;
        }
    };

    let mut cursor = Cursor::new(html.as_bytes());
    let product = match readability::extractor::extract(&mut cursor, &base) {
        Ok(product) => product,
        Err(e) => {
            warn!("Readability failed on {}: {}", url, e);
            return None;
        }
    };

    let body = html_to_text(&product.content);
    if body.is_empty() {
        warn!("No readable content found on {}", url);
        return None;
    }

    let title = product.title.trim().to_string();
    debug!("Readability picked \"{}\" on {}", title, url);

    Some(Article::new(url, title, body))
}

/// Drop all markup, keeping the text nodes in document order.
///
/// Readability hands back the whole document when it finds no candidate,
/// so text under `head`, `title`, `script`, `style` and `noscript` is skipped.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map_or(false, |el| NON_CONTENT_ELEMENTS.contains(&el.name()))
        });
        if !hidden {
            text.push_str(fragment);
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::SAMPLE_ARTICLE_HTML;

    const URL: &str = "https://blog.example.com/posts/ownership";

    #[test]
    fn test_extract_article() {
        let article = extract_article(SAMPLE_ARTICLE_HTML, URL).unwrap();

        assert_eq!(article.url, URL);
        assert!(article.title.contains("Understanding Ownership"));
        assert!(article.body.contains("borrow checker"));
        assert!(article.body.contains("lifetimes"));
        assert!(!article.body.contains('<'));
        assert_eq!(article.body, article.body.trim());
    }

    #[test]
    fn test_extract_article_empty_document() {
        assert!(extract_article("", URL).is_none());
        assert!(extract_article("<html><body></body></html>", URL).is_none());
        assert!(extract_article(
            "<html><head><title>T</title></head><body></body></html>",
            URL
        )
        .is_none());
    }

    #[test]
    fn test_extract_article_bad_base_url() {
        assert!(extract_article(SAMPLE_ARTICLE_HTML, "not a url").is_none());
    }

    #[test]
    fn test_html_to_text() {
        let text = html_to_text("<div>\n  <p>One <b>bold</b> word.</p><p>Two</p>\n</div>");
        assert_eq!(text, "One bold word.Two");
        assert_eq!(html_to_text(""), "");
        assert_eq!(html_to_text("<p>caf&eacute; &amp; bar</p>"), "café & bar");
    }

    #[test]
    fn test_html_to_text_skips_head() {
        let page = "<html><head><title>X</title><style>p {}</style></head>\
                    <body><p>a</p><script>var x;</script><p>b</p></body></html>";
        assert_eq!(html_to_text(page), "ab");
        assert_eq!(
            html_to_text("<html><head><title>T</title></head><body></body></html>"),
            ""
        );
    }
}
