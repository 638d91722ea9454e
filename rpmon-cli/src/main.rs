//! rpmon CLI
//!
//! Provisions Hypernative monitoring agents for a rate provider contract.

mod config;
mod hypernative;
mod output;
mod provision;
mod rpc;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = match provision::ProvisionArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let exit_code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    };

    let exit_code = provision::run(args).await;

    std::process::exit(exit_code);
}
