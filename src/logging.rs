use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;

/// Build the fmt subscriber, writing log lines to `writer`.
pub fn subscriber<W>(writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt().with_writer(writer).finish()
}

/// Install the global subscriber. Logs go to stderr; stdout carries results.
pub fn init() {
    if tracing::subscriber::set_global_default(subscriber(std::io::stderr)).is_err() {
        eprintln!("tracing subscriber already installed");
    }
}
