use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use walletkit_key::PublicEncoding;

#[derive(Parser)]
#[command(
    name = "key-cli",
    about = "Derive and inspect secp256k1 wallet keys",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum Commands {
    Phrase(PhraseArgs),

    ApiAuth(ApiAuthArgs),

    Bitid(BitidArgs),

    Pigeon(PigeonArgs),

    Decode(DecodeArgs),
}

/// Options shared by every subcommand.
#[derive(Parser, Debug, Clone)]
pub(crate) struct CommonArgs {
    #[arg(long, help = "the path to the toml config file")]
    pub(crate) config: Option<PathBuf>,

    #[arg(
        long,
        value_enum,
        help = "the public key encoding to print, defaults to the key's preferred encoding"
    )]
    pub(crate) encoding: Option<EncodingArg>,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the key taken directly from a phrase's seed", version)]
pub(crate) struct PhraseArgs {
    #[arg(long, env = "WALLETKIT_PHRASE", help = "the BIP39 phrase")]
    pub(crate) phrase: String,

    #[clap(flatten)]
    pub(crate) common: CommonArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the API authentication key of a phrase", version)]
pub(crate) struct ApiAuthArgs {
    #[arg(long, env = "WALLETKIT_PHRASE", help = "the BIP39 phrase")]
    pub(crate) phrase: String,

    #[clap(flatten)]
    pub(crate) common: CommonArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the BitID key of a phrase for a service", version)]
pub(crate) struct BitidArgs {
    #[arg(long, env = "WALLETKIT_PHRASE", help = "the BIP39 phrase")]
    pub(crate) phrase: String,

    #[arg(long, default_value_t = 0, help = "the identity index for the service")]
    pub(crate) index: u32,

    #[arg(long, help = "the service uri")]
    pub(crate) uri: String,

    #[clap(flatten)]
    pub(crate) common: CommonArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Derive the pigeon pairing key of a phrase's key", version)]
pub(crate) struct PigeonArgs {
    #[arg(long, env = "WALLETKIT_PHRASE", help = "the BIP39 phrase")]
    pub(crate) phrase: String,

    #[arg(long, help = "the pairing nonce as hex")]
    pub(crate) nonce: String,

    #[clap(flatten)]
    pub(crate) common: CommonArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Import a public key and print both encodings", version)]
pub(crate) struct DecodeArgs {
    #[arg(long, help = "the serialized public key as hex")]
    pub(crate) pubkey: String,

    #[clap(flatten)]
    pub(crate) common: CommonArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EncodingArg {
    Compressed,
    Uncompressed,
}

impl From<EncodingArg> for PublicEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Compressed => PublicEncoding::DerCompressed,
            EncodingArg::Uncompressed => PublicEncoding::DerUncompressed,
        }
    }
}
