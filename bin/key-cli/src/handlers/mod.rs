pub(crate) mod decode;
pub(crate) mod derive;

use walletkit_key::{Key, PublicEncoding};

use crate::{cli::CommonArgs, config::Config};

/// Picks the encoding from the command line, then the config.
fn requested_encoding(common: &CommonArgs, config: &Config) -> Option<PublicEncoding> {
    common.encoding.map(Into::into).or(config.encoding)
}

/// Hex of `key`'s public point in `encoding`, or in the key's preferred encoding.
fn public_hex(key: &Key, encoding: Option<PublicEncoding>) -> String {
    match encoding {
        Some(encoding) => hex::encode(key.serialize_public(encoding)),
        None => hex::encode(key.public_key_bytes()),
    }
}
