use ae_core::{Article, OutputFormat, Result};

use crate::ArticleWriter;

/// Writes the article body as UTF-8, unchanged.
#[derive(Debug, Clone, Default)]
pub struct TextWriter;

impl TextWriter {
    pub fn new() -> Self {
        Self
    }
}

impl ArticleWriter for TextWriter {
    fn format(&self) -> OutputFormat {
        OutputFormat::Txt
    }

    fn render(&self, article: &Article) -> Result<Vec<u8>> {
        Ok(article.body.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_save_text() {
        let tmp = tempdir().unwrap();
        let article = Article::new(
            "https://example.com",
            "Ünïcode: title",
            "Line one\nLínea dos — 世界\n",
        );

        let path = TextWriter::new().save(&article, tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("Ünïcode_title.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), article.body);
    }
}
