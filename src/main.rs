use clap::Parser;
use eisen::cli::commands::Cli;
use eisen::cli::handlers;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("erro: {}", e);
        std::process::exit(1);
    }
}
