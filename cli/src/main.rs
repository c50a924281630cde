//! autodock - containerize a local project without writing a Dockerfile

use clap::Parser;

use autodock_cli::cli::Cli;
use autodock_cli::logging::init_logging;
use autodock_cli::output::json;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_options());
    let json_mode = cli.json;

    if let Err(e) = cli.run().await {
        tracing::debug!(error = ?e, "command failed");
        if json_mode {
            match json::format_error(&format!("{e:#}"), json::error_code(&e)) {
                Ok(text) => println!("{text}"),
                Err(_) => eprintln!("Error: {e:#}"),
            }
        } else {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}
