pub mod extractor;
pub mod fetcher;
pub mod logging;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use ae_core::{Article, Config, Error, Result};
use tracing::info;

pub use extractor::extract_article;
pub use fetcher::{fetch_html, normalize_url};
pub use logging::init_logging;

/// Read the main article behind `url`.
///
/// normalize_url() → fetch_html() → extract_article()
///
/// Network and URL failures surface as errors. The extractor swallows its
/// own failures, so a page without readable content becomes
/// `Error::Extraction`.
pub async fn read_article(url: &str, config: &Config) -> Result<Article> {
    let normalized = normalize_url(url)?;
    let html = fetch_html(&normalized, config).await?;

    let article = extract_article(&html, &normalized).ok_or_else(|| {
        Error::Extraction(format!("no readable content found at {}", normalized))
    })?;

    info!(
        "📰 Extracted \"{}\" ({} chars) from {}",
        article.title,
        article.body.chars().count(),
        article.url
    );
    Ok(article)
}

pub mod prelude {
    pub use super::{extract_article, fetch_html, normalize_url, read_article};
    pub use ae_core::{Article, Config, Error, Result};
}
