use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

use mail_hunter_lib::{logging, Args, MailHunter, TerminalDecider};

const BANNER: &str = r#"
                 █▄█ █▀█ ▀█▀ █   █ █ █ █ █▀█ ▀█▀ █▀▀ █▀▄
                 █ █ █▀█  █  █   █▀█ █ █ █ █  █  █▀▀ █▀▄
                 ▀ ▀ ▀ ▀ ▀▀▀ ▀▀▀ ▀ ▀ ▀▀▀ ▀ ▀  ▀  ▀▀▀ ▀ ▀
"#;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize the tracing logger
    logging::init();

    dotenv().ok();

    println!("{}", BANNER);
    println!("🚀 Running MailHunter!");

    let args = Args::parse();
    let Some(domain) = args.domain.as_deref() else {
        println!("Nothing to do. Pass a domain with -d/--domain, see --help.");
        return ExitCode::SUCCESS;
    };

    let hunter = match MailHunter::new(&args) {
        Ok(hunter) if io::stderr().is_terminal() => hunter,
        Ok(hunter) => hunter.quiet(),
        Err(e) => {
            eprintln!("❗ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut decider = TerminalDecider::new(io::stdin().lock(), io::stdout());
    match hunter
        .run(domain, args.output.as_deref(), &mut decider, &mut io::stdout())
        .await
    {
        Ok(outcome) => {
            info!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Hunt for '{}' failed", domain);
            eprintln!("❗ {}", e);
            ExitCode::FAILURE
        }
    }
}
