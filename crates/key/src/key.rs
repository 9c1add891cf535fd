//! The public key handle.

use std::fmt;

use secp256k1::PublicKey;

use crate::{
    codec::PublicEncoding,
    derive::KeyFactory,
    error::KeyResult,
    material::KeyMaterial,
    mnemonic::Wordlist,
    primitives::COMPACT_SIGNATURE_LEN,
    secret::fixed_eq,
};

/// The factory used by the [`Key`] convenience constructors.
fn factory() -> KeyFactory {
    KeyFactory::default()
}

/// A secp256k1 key pair, or a public key alone.
///
/// A `Key` owns exactly one set of key material and cannot be cloned; deriving from an existing
/// key always produces independent material. Any secret is scrubbed when the key is dropped.
pub struct Key {
    material: KeyMaterial,
}

impl Key {
    pub(crate) const fn from_material(material: KeyMaterial) -> Self {
        Self { material }
    }

    pub(crate) const fn material(&self) -> &KeyMaterial {
        &self.material
    }

    /// Derives a key from a BIP39 phrase validated against `wordlist`.
    ///
    /// Fails with [`InvalidPhrase`](crate::KeyError::InvalidPhrase) when `wordlist` is `None`.
    pub fn create_from_phrase(phrase: &str, wordlist: Option<&Wordlist>) -> KeyResult<Self> {
        factory().derive_from_phrase(phrase, wordlist)
    }

    /// Derives the API authentication key for a phrase.
    pub fn create_for_api_auth(phrase: &str, wordlist: Option<&Wordlist>) -> KeyResult<Self> {
        factory().derive_for_api_auth(phrase, wordlist)
    }

    /// Derives the BitID key for a phrase, service `uri` and `index`.
    pub fn create_for_bitid(
        phrase: &str,
        index: u32,
        uri: &str,
        wordlist: Option<&Wordlist>,
    ) -> KeyResult<Self> {
        factory().derive_for_bitid(phrase, index, uri, wordlist)
    }

    /// Derives the pigeon pairing key for `key` and `nonce`.
    pub fn create_for_pigeon_from(key: &Key, nonce: &[u8]) -> KeyResult<Self> {
        factory().derive_pairing_key(key, nonce)
    }

    /// Imports a public-only key from a compressed or uncompressed point encoding.
    pub fn create_from_public_bytes(bytes: &[u8]) -> KeyResult<Self> {
        factory().decode_from_public_bytes(bytes)
    }

    /// Recovers the public-only key that produced `signature` over `digest`.
    pub fn create_from_compact_signature(
        digest: &[u8; 32],
        signature: &[u8; COMPACT_SIGNATURE_LEN],
    ) -> KeyResult<Self> {
        factory().recover_from_compact_signature(digest, signature)
    }

    /// Whether this key holds a private secret.
    pub const fn has_secret(&self) -> bool {
        self.material.has_secret()
    }

    /// The public point.
    pub const fn public_key(&self) -> &PublicKey {
        self.material.public()
    }

    /// Whether the key prefers the compressed encoding.
    pub const fn is_compressed(&self) -> bool {
        self.material.compressed()
    }

    /// Serializes the public key in the requested encoding.
    pub fn serialize_public(&self, encoding: PublicEncoding) -> Vec<u8> {
        factory().encode(self, encoding)
    }

    /// Serializes the public key in its preferred encoding.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        let encoding = if self.is_compressed() {
            PublicEncoding::DerCompressed
        } else {
            PublicEncoding::DerUncompressed
        };
        self.serialize_public(encoding)
    }

    /// Whether both keys have the same public point, regardless of preferred encoding.
    pub fn public_key_match(&self, that: &Key) -> bool {
        fixed_eq(&self.public_key().serialize(), &that.public_key().serialize())
    }

    /// Whether both keys have secrets and the secrets are identical.
    pub(crate) fn private_key_match(&self, that: &Key) -> bool {
        match (self.material.secret(), that.material.secret()) {
            (Some(this), Some(that)) => fixed_eq(this.expose_secret(), that.expose_secret()),
            _ => false,
        }
    }

    /// Signs a 32-byte digest.
    ///
    /// Fails with [`MissingSecret`](crate::KeyError::MissingSecret) for public-only keys.
    pub fn sign_compact(&self, digest: &[u8; 32]) -> KeyResult<[u8; COMPACT_SIGNATURE_LEN]> {
        factory().sign_compact(self, digest)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("public_key", self.public_key())
            .field("compressed", &self.is_compressed())
            .field("has_secret", &self.has_secret())
            .finish()
    }
}
