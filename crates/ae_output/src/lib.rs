use std::fs;
use std::path::{Path, PathBuf};

use ae_core::{Article, OutputFormat, Result};
use tracing::debug;

pub mod backends;
pub mod sanitize;

pub use backends::*;
pub use sanitize::{output_path, sanitize_filename};

pub trait ArticleWriter {
    fn format(&self) -> OutputFormat;

    /// Serialize the article completely in memory.
    fn render(&self, article: &Article) -> Result<Vec<u8>>;

    /// Render, then create or overwrite `dir/<sanitized title>.<ext>`.
    /// Nothing is written if rendering fails.
    fn save(&self, article: &Article, dir: &Path) -> Result<PathBuf> {
        let bytes = self.render(article)?;
        let path = output_path(dir, &article.title, self.format());
        fs::write(&path, &bytes)?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

pub fn create_writer(format: OutputFormat) -> Box<dyn ArticleWriter> {
    match format {
        OutputFormat::Pdf => Box::new(PdfWriter::new()),
        OutputFormat::Txt => Box::new(TextWriter::new()),
    }
}

/// Create the save directory and any missing parents.
pub fn prepare_save_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Creating save directory {}", dir.display());
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

pub mod prelude {
    pub use super::{create_writer, prepare_save_dir, ArticleWriter};
    pub use super::backends::*;
}
