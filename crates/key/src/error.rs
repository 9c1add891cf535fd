//! Error type for key construction and use.

use thiserror::Error;

/// Result alias used throughout this crate.
pub type KeyResult<T> = Result<T, KeyError>;

/// Errors returned by [`Key`](crate::Key) construction paths and operations.
///
/// None of these are fatal; a caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// The mnemonic failed wordlist or checksum validation, or no wordlist was supplied.
    #[error("invalid mnemonic phrase")]
    InvalidPhrase,

    /// The bytes given for a public key import are not a valid point encoding.
    #[error("invalid public key encoding")]
    InvalidPublicKeyEncoding,

    /// An underlying curve or BIP32 primitive reported an unexpected failure.
    #[error("key derivation failed: {0}")]
    DerivationFailure(String),

    /// A wordlist must hold exactly 2048 distinct words.
    #[error("invalid wordlist: {len} distinct words, expected 2048")]
    InvalidWordlist {
        /// Number of distinct words found.
        len: usize,
    },

    /// The operation needs a private secret but the key is public-only.
    #[error("key has no secret")]
    MissingSecret,

    /// A compact signature could not be parsed or did not recover a key.
    #[error("invalid compact signature")]
    InvalidSignature,
}

impl From<bitcoin::bip32::Error> for KeyError {
    fn from(err: bitcoin::bip32::Error) -> Self {
        KeyError::DerivationFailure(err.to_string())
    }
}
