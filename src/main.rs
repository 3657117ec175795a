use clap::Parser;
use mcp_reddit::cli::Config;
use std::process;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    if let Err(e) = mcp_reddit::cli::run(config).await {
        eprintln!("{e}");
        process::exit(1);
    }
}
