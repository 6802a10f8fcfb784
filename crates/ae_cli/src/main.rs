mod app;

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use ae_core::config::{Config, DEFAULT_SAVE_DIR};
use ae_extract::init_logging;
use clap::Parser;
use tracing::debug;

use crate::app::{run, RunOptions};

#[derive(Debug, Clone, Copy, PartialEq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let multiplier = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(multiplier)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number is seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_seconds = total_seconds
                .checked_add(num)
                .ok_or_else(|| "Duration too large".to_string())?;
            has_unit = true;
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

/// Download a web page, keep the article and save it as PDF or text.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Article URL. Asked for interactively when omitted.
    url: Option<String>,
    /// Output format, pdf or txt. Asked for interactively when omitted.
    #[arg(long, short)]
    format: Option<String>,
    /// Directory the file is saved in; created if missing
    #[arg(long, env = "AE_SAVE_DIR", default_value = DEFAULT_SAVE_DIR)]
    save_dir: PathBuf,
    /// Fetch timeout (e.g. 10, 10s, 1m30s)
    #[arg(long, env = "AE_TIMEOUT", default_value = "10s")]
    timeout: HumanDuration,
    /// Log debug output
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config::new()
            .with_save_dir(&self.save_dir)
            .with_timeout(self.timeout.0)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config();
    debug!("Using {:?}", config);

    let options = RunOptions {
        url: cli.url,
        format: cli.format,
    };

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    // Failures are reported, never turned into a non-zero exit status.
    match run(options, &config, &mut input, &mut out).await {
        Ok(outcome) => debug!("Finished: {:?}", outcome),
        Err(e) => println!("❌ {:#}", e),
    }
}
