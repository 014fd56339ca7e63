//! # MailHunter
//!
//! A Rust library for finding email addresses associated with a domain
//! through the IntelX phonebook search API.
//!
//! ## Main Components
//!
//! - [`MailHunter`]: Runs a search end to end: submit, fetch, extract, deliver
//! - [`PhonebookClient`]: The two API calls, with status handling
//! - [`extract_selectors`]: Turns a result set into an ordered list of values
//! - [`deliver`]: Saves, prints or discards results, asking a [`Decide`] when needed
//! - [`Args`]: Command line argument structure
//!
//! ## Example
//!
//! ```no_run
//! use mail_hunter_lib::{Args, MailHunter, TerminalDecider};
//! use clap::Parser;
//! use std::io;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let args = Args::parse_from(["mail-hunter", "-d", "example.com"]);
//!     let hunter = MailHunter::new(&args)?;
//!
//!     let mut decider = TerminalDecider::new(io::stdin().lock(), io::stdout());
//!     hunter
//!         .run("example.com", None, &mut decider, &mut io::stdout())
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod args;
pub mod config;
mod error;
mod extractor;
mod hunter;
pub mod logging;
mod output;
mod phonebook;

#[cfg(test)]
mod test_support;

// Re-export main components for documentation and external use
pub use crate::args::Args;
pub use crate::config::ApiConfig;
pub use crate::error::{HuntError, Stage};
pub use crate::extractor::extract_selectors;
pub use crate::hunter::MailHunter;
pub use crate::output::{deliver, save_results, Decide, Outcome, TerminalDecider, PRINT_THRESHOLD};
pub use crate::phonebook::{parse_job_id, PhonebookClient};
