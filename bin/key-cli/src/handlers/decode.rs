//! Handler for importing a serialized public key.

use anyhow::{Context, Result};
use tracing::info;
use walletkit_key::{Key, PublicEncoding};

use super::requested_encoding;
use crate::{cli::DecodeArgs, config::Config};

/// Handles the decode command.
///
/// Prints both encodings, or only the requested one.
pub(crate) fn handle_decode(args: DecodeArgs) -> Result<()> {
    let config = Config::load(args.common.config.as_deref())?;

    let bytes = hex::decode(args.pubkey.trim()).context("pubkey must be hex")?;
    let key = Key::create_from_public_bytes(&bytes).context("failed to decode public key")?;
    info!(len = bytes.len(), compressed = key.is_compressed(), "decoded public key");

    match requested_encoding(&args.common, &config) {
        Some(encoding) => println!("{}", hex::encode(key.serialize_public(encoding))),
        None => {
            for (label, encoding) in [
                ("compressed", PublicEncoding::DerCompressed),
                ("uncompressed", PublicEncoding::DerUncompressed),
            ] {
                println!("{label}: {}", hex::encode(key.serialize_public(encoding)));
            }
        }
    }

    Ok(())
}
