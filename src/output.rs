use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::{error, info};

use crate::HuntError;

/// Result lists up to this size are printed without asking.
pub const PRINT_THRESHOLD: usize = 30;

/// What happened to an extracted result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved { path: PathBuf, count: usize },
    Printed { count: usize },
    Discarded { count: usize },
    SaveFailed { path: PathBuf, reason: String },
    Malformed { reason: String },
}

/// Answers the questions asked when a result list is too long to print.
pub trait Decide {
    /// Return a file name (without extension) to save `count` results to,
    /// or `None` to skip saving.
    fn save_as(&mut self, count: usize) -> io::Result<Option<String>>;

    /// Whether to print all `count` results to the terminal.
    fn print_all(&mut self, count: usize) -> io::Result<bool>;
}

/// Asks on a line-based terminal.
pub struct TerminalDecider<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalDecider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalDecider { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut line = String::new();
        // Blocking read on the runtime thread; nothing else runs while a prompt is open.
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.to_lowercase().as_str(), "yes" | "y")
}

impl<R: BufRead, W: Write> Decide for TerminalDecider<R, W> {
    fn save_as(&mut self, _count: usize) -> io::Result<Option<String>> {
        if !is_yes(&self.ask("Do you want to save results to a file? (yes/no): ")?) {
            return Ok(None);
        }
        let name = self.ask("Enter filename: ")?;
        Ok(Some(name))
    }

    fn print_all(&mut self, _count: usize) -> io::Result<bool> {
        Ok(is_yes(
            &self.ask("Do you want to print all results to terminal? (yes/no): ")?,
        ))
    }
}

/// Append `results` to `<name>.txt`, one per line.
pub async fn save_results(name: &str, results: &[String]) -> io::Result<PathBuf> {
    let path = PathBuf::from(format!("{}.txt", name));
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await?;
    file.write_all(results.join("\n").as_bytes()).await?;
    file.flush().await?;
    Ok(path)
}

/// Save, print or discard `results` following the output policy.
///
/// A failed save is reported on `out` and returned as
/// [`Outcome::SaveFailed`]; only terminal I/O errors are propagated.
pub async fn deliver<W: Write>(
    results: &[String],
    output: Option<&str>,
    decider: &mut dyn Decide,
    out: &mut W,
) -> Result<Outcome, HuntError> {
    let count = results.len();

    if let Some(name) = output {
        writeln!(out, "\n🔍 {} result(s) found.", count)?;
        return save_and_report(name, results, out).await;
    }

    if count <= PRINT_THRESHOLD {
        writeln!(out, "🔍 {} result(s) found:", count)?;
        print_results(results, out)?;
        return Ok(Outcome::Printed { count });
    }

    writeln!(out, "\n🔍 {} result(s) found.", count)?;
    if let Some(name) = decider.save_as(count)? {
        return save_and_report(&name, results, out).await;
    }

    writeln!(out, "\n❗ Results not saved.")?;
    if decider.print_all(count)? {
        print_results(results, out)?;
        return Ok(Outcome::Printed { count });
    }

    writeln!(out, "stopping...")?;
    Ok(Outcome::Discarded { count })
}

async fn save_and_report<W: Write>(
    name: &str,
    results: &[String],
    out: &mut W,
) -> Result<Outcome, HuntError> {
    match save_results(name, results).await {
        Ok(path) => {
            info!("Saved {} results to {}", results.len(), path.display());
            writeln!(out, "\n✅ Done! Saved to {}", path.display())?;
            Ok(Outcome::Saved {
                path,
                count: results.len(),
            })
        }
        Err(e) => {
            let path = PathBuf::from(format!("{}.txt", name));
            error!("Failed to save results to {}: {}", path.display(), e);
            writeln!(out, "❌ Error saving to file: {}", e)?;
            Ok(Outcome::SaveFailed {
                path,
                reason: e.to_string(),
            })
        }
    }
}

fn print_results<W: Write>(results: &[String], out: &mut W) -> io::Result<()> {
    for result in results {
        writeln!(out, "{}", result)?;
    }
    Ok(())
}
