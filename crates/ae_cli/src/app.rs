use std::io::{BufRead, Write};
use std::path::PathBuf;

use ae_core::OutputFormat;
use ae_extract::prelude::{read_article, Config};
use ae_output::prelude::{create_writer, prepare_save_dir};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Answers given on the command line instead of at the prompts.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub url: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    Saved(PathBuf),
    ExtractionFailed,
    InvalidChoice(String),
}

/// One interactive session: ask for a URL, read the article, ask for a
/// format and write the file. Expected failures are reported on `out` and
/// come back as an [`Outcome`]; only setup and write errors are `Err`.
pub async fn run<R, W>(
    options: RunOptions,
    config: &Config,
    input: &mut R,
    out: &mut W,
) -> Result<Outcome>
where
    R: BufRead,
    W: Write,
{
    prepare_save_dir(&config.save_dir)
        .with_context(|| format!("failed to create {}", config.save_dir.display()))?;

    let url = match options.url {
        Some(url) => url,
        None => prompt(input, out, "🔗 Enter article URL: ")?,
    };

    writeln!(out, "🔍 Fetching article...")?;
    let article = match read_article(&url, config).await {
        Ok(article) => article,
        Err(e) => {
            warn!("Reading {} failed: {}", url, e);
            writeln!(out, "❌ Failed to extract article: {}", e)?;
            writeln!(out, "❌ Article extraction failed.")?;
            return Ok(Outcome::ExtractionFailed);
        }
    };

    let choice = match options.format {
        Some(format) => format,
        None => prompt(input, out, "💾 Save as PDF or TXT? (pdf/txt): ")?,
    };
    let format = match choice.parse::<OutputFormat>() {
        Ok(format) => format,
        Err(_) => {
            writeln!(out, "⚠️ Invalid choice. Please enter 'pdf' or 'txt'.")?;
            return Ok(Outcome::InvalidChoice(choice.trim().to_string()));
        }
    };

    let path = create_writer(format)
        .save(&article, &config.save_dir)
        .with_context(|| format!("failed to save \"{}\" as {}", article.title, format))?;

    let label = match format {
        OutputFormat::Pdf => "PDF",
        OutputFormat::Txt => "Text",
    };
    writeln!(out, "✅ {} saved at: {}", label, path.display())?;
    info!("Saved {} as {}", article.url, path.display());

    Ok(Outcome::Saved(path))
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_extract::test_utils::{serve_once, unreachable_url, SAMPLE_ARTICLE_HTML};
    use std::fs;
    use std::io::Cursor;
    use tempfile::tempdir;

    struct Session {
        outcome: Outcome,
        output: String,
    }

    async fn session(options: RunOptions, config: &Config, stdin: &str) -> Session {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out = Vec::new();
        let outcome = run(options, config, &mut input, &mut out).await.unwrap();
        Session {
            outcome,
            output: String::from_utf8(out).unwrap(),
        }
    }

    fn files_in(dir: &std::path::Path) -> usize {
        fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_save_as_text() {
        let tmp = tempdir().unwrap();
        let config = Config::default().with_save_dir(tmp.path());
        let url = serve_once(200, SAMPLE_ARTICLE_HTML).await;

        let s = session(RunOptions::default(), &config, &format!("{}\ntxt\n", url)).await;

        let Outcome::Saved(path) = s.outcome else {
            panic!("expected a saved file, got {:?}", s.outcome);
        };
        assert_eq!(path.extension().unwrap(), "txt");
        assert!(path.starts_with(tmp.path()));
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("borrow checker"));

        assert!(s.output.contains("🔗 Enter article URL: "));
        assert!(s.output.contains("🔍 Fetching article..."));
        assert!(s.output.contains("💾 Save as PDF or TXT? (pdf/txt): "));
        assert!(s.output.contains(&format!("✅ Text saved at: {}", path.display())));
    }

    #[tokio::test]
    async fn test_save_as_pdf_from_options() {
        let tmp = tempdir().unwrap();
        let config = Config::default().with_save_dir(tmp.path());
        let url = serve_once(200, SAMPLE_ARTICLE_HTML).await;
        let options = RunOptions {
            url: Some(url),
            format: Some("PDF".to_string()),
        };

        let s = session(options, &config, "").await;

        let Outcome::Saved(path) = s.outcome else {
            panic!("expected a saved file, got {:?}", s.outcome);
        };
        assert_eq!(path.extension().unwrap(), "pdf");
        assert!(fs::read(&path).unwrap().starts_with(b"%PDF"));
        assert!(!s.output.contains("Enter article URL"));
        assert!(s.output.contains("✅ PDF saved at:"));
    }

    #[tokio::test]
    async fn test_invalid_choice_writes_nothing() {
        let tmp = tempdir().unwrap();
        let config = Config::default().with_save_dir(tmp.path());
        let url = serve_once(200, SAMPLE_ARTICLE_HTML).await;

        let s = session(RunOptions::default(), &config, &format!("{}\ndocx\n", url)).await;

        assert_eq!(s.outcome, Outcome::InvalidChoice("docx".to_string()));
        assert!(s.output.contains("⚠️ Invalid choice. Please enter 'pdf' or 'txt'."));
        assert_eq!(files_in(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_unreachable_url_writes_nothing() {
        let tmp = tempdir().unwrap();
        let config = Config::default().with_save_dir(tmp.path());
        let url = unreachable_url().await;

        let s = session(RunOptions::default(), &config, &format!("{}\ntxt\n", url)).await;

        assert_eq!(s.outcome, Outcome::ExtractionFailed);
        assert!(s.output.contains("❌ Failed to extract article: Network error"));
        assert!(s.output.contains("❌ Article extraction failed."));
        assert!(!s.output.contains("Save as PDF or TXT"));
        assert_eq!(files_in(tmp.path()), 0);
    }

    #[tokio::test]
    async fn test_same_title_overwrites() {
        let tmp = tempdir().unwrap();
        let config = Config::default().with_save_dir(tmp.path());

        let mut paths = Vec::new();
        for _ in 0..2 {
            let url = serve_once(200, SAMPLE_ARTICLE_HTML).await;
            let options = RunOptions {
                url: Some(url),
                format: Some("txt".to_string()),
            };
            if let Outcome::Saved(path) = session(options, &config, "").await.outcome {
                paths.push(path);
            }
        }

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0], paths[1]);
        assert_eq!(files_in(tmp.path()), 1);
    }

    #[tokio::test]
    async fn test_creates_save_dir() {
        let tmp = tempdir().unwrap();
        let save_dir = tmp.path().join("ArticleFiles");
        let config = Config::default().with_save_dir(&save_dir);

        // Empty stdin: the URL is empty and extraction fails, but the
        // directory is created up front.
        let s = session(RunOptions::default(), &config, "").await;

        assert_eq!(s.outcome, Outcome::ExtractionFailed);
        assert!(save_dir.is_dir());
        assert!(s.output.contains("Invalid URL"));
    }
}
