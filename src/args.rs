use clap::Parser;

/// MailHunter: find email addresses tied to a domain using the IntelX
/// phonebook search.
#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about,
    long_about = "Searches the IntelX phonebook for email addresses associated with a domain and prints them or saves them to a text file."
)]
pub struct Args {
    /// Searches all emails for the provided domain.
    #[clap(short, long)]
    pub domain: Option<String>,

    /// Output file name, without extension. Results are appended to `<NAME>.txt`.
    #[clap(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// IntelX API key. Falls back to the INTELX_TOKEN environment variable.
    #[clap(short, long)]
    pub key: Option<String>,

    /// Base URL of the IntelX API.
    #[clap(long, default_value = crate::config::DEFAULT_BASE_URL)]
    pub base_url: String,
}
