//! Handlers for the subcommands that derive a secret-bearing key from a phrase.

use anyhow::{Context, Result};
use tracing::info;
use walletkit_key::{Key, KeyResult, Wordlist};

use super::{public_hex, requested_encoding};
use crate::{
    cli::{ApiAuthArgs, BitidArgs, CommonArgs, PhraseArgs, PigeonArgs},
    config::Config,
};

/// Loads the config then prints the public key `derive` builds from the wordlist.
fn run<F>(common: &CommonArgs, what: &str, derive: F) -> Result<()>
where
    F: FnOnce(&Wordlist) -> KeyResult<Key>,
{
    let config = Config::load(common.config.as_deref())?;
    let words = config.wordlist()?;

    let key = derive(&words).with_context(|| format!("failed to derive {what} key"))?;
    info!(%what, compressed = key.is_compressed(), "derived key");

    println!("{}", public_hex(&key, requested_encoding(common, &config)));
    Ok(())
}

/// Handles the phrase command.
pub(crate) fn handle_phrase(args: PhraseArgs) -> Result<()> {
    run(&args.common, "phrase", |words| {
        Key::create_from_phrase(&args.phrase, Some(words))
    })
}

/// Handles the api-auth command.
pub(crate) fn handle_api_auth(args: ApiAuthArgs) -> Result<()> {
    run(&args.common, "api auth", |words| {
        Key::create_for_api_auth(&args.phrase, Some(words))
    })
}

/// Handles the bitid command.
pub(crate) fn handle_bitid(args: BitidArgs) -> Result<()> {
    run(&args.common, "bitid", |words| {
        Key::create_for_bitid(&args.phrase, args.index, &args.uri, Some(words))
    })
}

/// Handles the pigeon command. The pairing key is derived off the phrase key.
pub(crate) fn handle_pigeon(args: PigeonArgs) -> Result<()> {
    let nonce = hex::decode(&args.nonce).context("nonce must be hex")?;

    run(&args.common, "pigeon", |words| {
        let phrase_key = Key::create_from_phrase(&args.phrase, Some(words))?;
        Key::create_for_pigeon_from(&phrase_key, &nonce)
    })
}
