mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() {
    // Logging is installed inside dispatch, once the config (and its log
    // settings) has been loaded.
    if let Err(err) = CliCommand::run_from_args().await {
        eprintln!("phishguard error: {:#}", err);
        std::process::exit(1);
    }
}
