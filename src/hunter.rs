use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::Duration;
use tracing::{error, info};

use crate::config::ApiConfig;
use crate::extractor::extract_selectors;
use crate::output::{deliver, Decide, Outcome};
use crate::phonebook::PhonebookClient;
use crate::{Args, HuntError};

pub struct MailHunter {
    client: PhonebookClient,
    show_progress: bool,
}

impl MailHunter {
    /// Create a new MailHunter from command line arguments
    pub fn new(args: &Args) -> Result<Self, HuntError> {
        let config = ApiConfig::from_args(args)?;
        MailHunter::with_config(config)
    }

    pub fn with_config(config: ApiConfig) -> Result<Self, HuntError> {
        Ok(MailHunter {
            client: PhonebookClient::new(config)?,
            show_progress: true,
        })
    }

    /// Disable the progress spinner, e.g. when output is not a terminal.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Search `domain`, then save, print or discard what was found.
    pub async fn run<W: Write>(
        &self,
        domain: &str,
        output: Option<&str>,
        decider: &mut dyn Decide,
        out: &mut W,
    ) -> Result<Outcome, HuntError> {
        let pb = self.spinner();

        pb.set_message(format!("Submitting search for '{}'", domain));
        let token = self.client.submit_search(domain).await.inspect_err(|e| {
            pb.finish_with_message(format!("✗ Search for '{}' failed", domain));
            error!("Search submission failed: {}", e);
        })?;
        info!("Search for '{}' accepted", domain);

        pb.set_message(format!("Fetching results for '{}'", domain));
        let body = self.client.fetch_results(&token).await.inspect_err(|e| {
            pb.finish_with_message(format!("✗ Fetching results for '{}' failed", domain));
            error!("Result fetch failed: {}", e);
        })?;
        pb.finish_and_clear();

        let results = match extract_selectors(&body) {
            Ok(results) => results,
            Err(e) => {
                error!("Could not extract results for '{}': {}", domain, e);
                writeln!(out, "❌ {}", e)?;
                return Ok(Outcome::Malformed {
                    reason: e.to_string(),
                });
            }
        };
        info!("Extracted {} result(s) for '{}'", results.len(), domain);

        deliver(&results, output, decider, out).await
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {wide_msg}")
        {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    }
}
