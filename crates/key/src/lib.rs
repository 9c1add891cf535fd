//! Key management for secp256k1 wallet keys.
//!
//! This crate derives keys from BIP39 phrases and from the sub-schemes built on them, imports
//! public-only keys, serializes public keys and compares keys. Secret material is held only in
//! owners that overwrite it on drop, on every return path.
//!
//! # Usage
//!
//! ```rust
//! use walletkit_key::{Key, PublicEncoding, Wordlist};
//!
//! let words = Wordlist::english();
//! let phrase = "abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon about";
//!
//! let key = Key::create_from_phrase(phrase, Some(&words))?;
//! assert!(key.has_secret());
//!
//! let public = Key::create_from_public_bytes(&key.serialize_public(PublicEncoding::DerCompressed))?;
//! assert!(!public.has_secret());
//! assert!(key.public_key_match(&public));
//!
//! let pairing = Key::create_for_pigeon_from(&key, b"nonce")?;
//! assert!(!pairing.public_key_match(&key));
//! # Ok::<(), walletkit_key::KeyError>(())
//! ```
//!
//! # Key Sources
//!
//! All construction paths live on [`KeyFactory`], which runs over a [`CurveKeyPrimitives`]
//! implementation. The [`Key`] constructors use [`Secp256k1Primitives`].

mod codec;
mod derive;
mod error;
mod key;
mod material;
mod mnemonic;
mod paths;
mod primitives;
mod secret;


pub use codec::{PublicEncoding, COMPRESSED_PUBLIC_KEY_LEN, UNCOMPRESSED_PUBLIC_KEY_LEN};
pub use derive::KeyFactory;
pub use error::{KeyError, KeyResult};
pub use key::Key;
pub use mnemonic::{Wordlist, WORDLIST_LEN};
pub use primitives::{CurveKeyPrimitives, Secp256k1Primitives, COMPACT_SIGNATURE_LEN};
pub use secp256k1::PublicKey;
pub use secret::{Secret256, Seed512};
