//! CLI for deriving, importing and serializing wallet keys.

mod cli;
mod config;
mod handlers;

use anyhow::{Error, Result};
use clap::Parser;
use walletkit_common::logging::{self, LoggerConfig};

use crate::handlers::{decode, derive};

fn main() -> Result<(), Error> {
    logging::init(LoggerConfig::with_base_name("key-cli").with_stderr());

    let cli = cli::Cli::parse();
    match cli.command {
        cli::Commands::Phrase(args) => derive::handle_phrase(args),
        cli::Commands::ApiAuth(args) => derive::handle_api_auth(args),
        cli::Commands::Bitid(args) => derive::handle_bitid(args),
        cli::Commands::Pigeon(args) => derive::handle_pigeon(args),
        cli::Commands::Decode(args) => decode::handle_decode(args),
    }
}
