use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SAVE_DIR: &str = "/sdcard/ArticleFiles";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory the article file is written to. Created if missing.
    pub save_dir: PathBuf,
    /// Applies to the whole fetch, connect included.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_save_dir(mut self, save_dir: impl Into<PathBuf>) -> Self {
        self.save_dir = save_dir.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!(
        "article_extractor/{} (rust; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
