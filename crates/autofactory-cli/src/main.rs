// AutoFactory CLI Entry Point

use autofactory_cli::{output, pause, router::CommandRouter, VerbosityLevel};

#[tokio::main]
async fn main() {
    if let Err(e) = CommandRouter::route().await {
        output::print_error(&e.user_message());
        if VerbosityLevel::Verbose.should_output() {
            eprintln!("{}", e.technical_details());
        }
        pause::pause_if_requested();
        std::process::exit(e.exit_code());
    }
}
