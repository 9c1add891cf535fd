//! Construction paths for [`Key`].
//!
//! [`KeyFactory`] runs every way a key can come into existence over a chosen set of
//! [`CurveKeyPrimitives`]:
//!
//! | Path | Secret | Source |
//! |------|--------|--------|
//! | [`derive_from_phrase`](KeyFactory::derive_from_phrase) | yes | first 256 bits of the BIP39 seed |
//! | [`derive_for_api_auth`](KeyFactory::derive_for_api_auth) | yes | BIP32 `m/1'/0` |
//! | [`derive_for_bitid`](KeyFactory::derive_for_bitid) | yes | BIP32 `m/13'/a'/b'/c'/d'` |
//! | [`derive_pairing_key`](KeyFactory::derive_pairing_key) | yes | HMAC-DRBG over another key's secret |
//! | [`decode_from_public_bytes`](KeyFactory::decode_from_public_bytes) | no | SEC1 point bytes |
//! | [`recover_from_compact_signature`](KeyFactory::recover_from_compact_signature) | no | ECDSA recovery |
//!
//! Seeds and intermediate secrets are held in scrubbing owners, so they are wiped on both the
//! success and the error return of every path.

use tracing::{debug, warn};

use crate::{
    codec,
    error::{KeyError, KeyResult},
    key::Key,
    material::{CoreKey, KeyMaterial},
    mnemonic::Wordlist,
    primitives::{CurveKeyPrimitives, Secp256k1Primitives, COMPACT_SIGNATURE_LEN},
    secret::{Secret256, Seed512},
};

/// Builds [`Key`]s over a set of curve primitives.
#[derive(Debug, Clone, Default)]
pub struct KeyFactory<P = Secp256k1Primitives> {
    primitives: P,
}

impl<P: CurveKeyPrimitives> KeyFactory<P> {
    /// Creates a factory over `primitives`.
    pub const fn new(primitives: P) -> Self {
        Self { primitives }
    }

    /// Validates `phrase` and runs the seed KDF with an empty passphrase.
    ///
    /// Nothing is computed unless a wordlist is supplied and the phrase passes validation.
    fn seed_for(&self, phrase: &str, wordlist: Option<&Wordlist>) -> KeyResult<Seed512> {
        let Some(wordlist) = wordlist else {
            warn!("no wordlist supplied, rejecting phrase");
            return Err(KeyError::InvalidPhrase);
        };

        if !self.primitives.is_valid_mnemonic(phrase, wordlist) {
            warn!(
                words = phrase.split_whitespace().count(),
                "rejected mnemonic phrase"
            );
            return Err(KeyError::InvalidPhrase);
        }

        Ok(self.primitives.kdf_mnemonic_to_seed(phrase, ""))
    }

    /// Wraps a freshly derived secret, materializing its uncompressed public key.
    pub(crate) fn from_secret(&self, secret: Secret256) -> KeyResult<Key> {
        let material =
            KeyMaterial::recover_public_only(&self.primitives, CoreKey::Secret(secret), false)?;
        Ok(Key::from_material(material))
    }

    /// Derives the simple phrase key: the first 256 bits of the seed used directly as the scalar.
    pub fn derive_from_phrase(&self, phrase: &str, wordlist: Option<&Wordlist>) -> KeyResult<Key> {
        let secret = {
            let seed = self.seed_for(phrase, wordlist)?;
            seed.truncate()
        };
        let key = self.from_secret(secret)?;
        debug!(pubkey = %key.public_key(), "derived phrase key");
        Ok(key)
    }

    /// Derives the key used to authenticate API calls.
    pub fn derive_for_api_auth(
        &self,
        phrase: &str,
        wordlist: Option<&Wordlist>,
    ) -> KeyResult<Key> {
        let secret = {
            let seed = self.seed_for(phrase, wordlist)?;
            self.primitives.derive_api_auth_secret(&seed)?
        };
        let key = self.from_secret(secret)?;
        debug!(pubkey = %key.public_key(), "derived api auth key");
        Ok(key)
    }

    /// Derives the BitID identity key for service `uri` at `index`.
    pub fn derive_for_bitid(
        &self,
        phrase: &str,
        index: u32,
        uri: &str,
        wordlist: Option<&Wordlist>,
    ) -> KeyResult<Key> {
        let secret = {
            let seed = self.seed_for(phrase, wordlist)?;
            self.primitives.derive_bitid_secret(&seed, index, uri)?
        };
        let key = self.from_secret(secret)?;
        debug!(%index, %uri, pubkey = %key.public_key(), "derived bitid key");
        Ok(key)
    }

    /// Derives a pairing key from `key`'s secret and `nonce`.
    ///
    /// The result owns a new secret; `key` is only read.
    pub fn derive_pairing_key(&self, key: &Key, nonce: &[u8]) -> KeyResult<Key> {
        let secret = key.material().secret().ok_or(KeyError::MissingSecret)?;
        let pairing = self.primitives.derive_pairing_secret(secret, nonce)?;
        let pairing = self.from_secret(pairing)?;
        if pairing.private_key_match(key) {
            return Err(KeyError::DerivationFailure(
                "pairing key equals its input".to_string(),
            ));
        }
        debug!(nonce_len = nonce.len(), pubkey = %pairing.public_key(), "derived pairing key");
        Ok(pairing)
    }

    /// Imports a public-only key from a SEC1 point encoding.
    pub fn decode_from_public_bytes(&self, bytes: &[u8]) -> KeyResult<Key> {
        let material = codec::decode(&self.primitives, bytes).inspect_err(|_| {
            warn!(len = bytes.len(), "rejected public key encoding");
        })?;
        Ok(Key::from_material(material))
    }

    /// Recovers the public-only signer key of a compact signature over `digest`.
    pub fn recover_from_compact_signature(
        &self,
        digest: &[u8; 32],
        signature: &[u8; COMPACT_SIGNATURE_LEN],
    ) -> KeyResult<Key> {
        let (point, compressed) = self.primitives.recover_compact(digest, signature)?;
        let material =
            KeyMaterial::recover_public_only(&self.primitives, CoreKey::Public(point), compressed)?;
        Ok(Key::from_material(material))
    }

    /// Serializes `key`'s public point.
    pub fn encode(&self, key: &Key, encoding: codec::PublicEncoding) -> Vec<u8> {
        codec::encode(&self.primitives, key.material(), encoding)
    }

    /// Signs `digest` with `key`'s secret.
    pub fn sign_compact(
        &self,
        key: &Key,
        digest: &[u8; 32],
    ) -> KeyResult<[u8; COMPACT_SIGNATURE_LEN]> {
        let material = key.material();
        let secret = material.secret().ok_or(KeyError::MissingSecret)?;
        self.primitives
            .sign_compact(secret, digest, material.compressed())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mnemonic::WORDLIST_LEN;

    const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon \
                          abandon abandon about";

    /// Delegates to [`Secp256k1Primitives`] while counting seed computations.
    #[derive(Default)]
    struct CountingPrimitives {
        inner: Secp256k1Primitives,
        seeds: Cell<usize>,
        fail_bitid: bool,
    }

    impl CurveKeyPrimitives for CountingPrimitives {
        fn is_valid_mnemonic(&self, phrase: &str, wordlist: &Wordlist) -> bool {
            self.inner.is_valid_mnemonic(phrase, wordlist)
        }

        fn kdf_mnemonic_to_seed(&self, phrase: &str, passphrase: &str) -> Seed512 {
            assert_eq!(passphrase, "");
            self.seeds.set(self.seeds.get() + 1);
            self.inner.kdf_mnemonic_to_seed(phrase, passphrase)
        }

        fn derive_api_auth_secret(&self, seed: &Seed512) -> KeyResult<Secret256> {
            self.inner.derive_api_auth_secret(seed)
        }

        fn derive_bitid_secret(
            &self,
            seed: &Seed512,
            index: u32,
            uri: &str,
        ) -> KeyResult<Secret256> {
            if self.fail_bitid {
                return Err(KeyError::DerivationFailure("index out of range".to_string()));
            }
            self.inner.derive_bitid_secret(seed, index, uri)
        }

        fn derive_pairing_secret(&self, secret: &Secret256, nonce: &[u8]) -> KeyResult<Secret256> {
            self.inner.derive_pairing_secret(secret, nonce)
        }

        fn point_from_secret(&self, secret: &Secret256) -> KeyResult<secp256k1::PublicKey> {
            self.inner.point_from_secret(secret)
        }

        fn encode_public_point(&self, point: &secp256k1::PublicKey, compressed: bool) -> Vec<u8> {
            self.inner.encode_public_point(point, compressed)
        }

        fn decode_public_point(&self, bytes: &[u8]) -> KeyResult<secp256k1::PublicKey> {
            self.inner.decode_public_point(bytes)
        }

        fn sign_compact(
            &self,
            secret: &Secret256,
            digest: &[u8; 32],
            compressed: bool,
        ) -> KeyResult<[u8; COMPACT_SIGNATURE_LEN]> {
            self.inner.sign_compact(secret, digest, compressed)
        }

        fn recover_compact(
            &self,
            digest: &[u8; 32],
            signature: &[u8; COMPACT_SIGNATURE_LEN],
        ) -> KeyResult<(secp256k1::PublicKey, bool)> {
            self.inner.recover_compact(digest, signature)
        }
    }

    // Verifies no seed is derived when the phrase is rejected.
    #[test]
    fn test_invalid_phrase_computes_no_seed() {
        let factory = KeyFactory::new(CountingPrimitives::default());
        let words = Wordlist::english();

        let bad = PHRASE.replace("about", "abandon");
        assert_eq!(
            factory.derive_from_phrase(&bad, Some(&words)).unwrap_err(),
            KeyError::InvalidPhrase
        );
        assert_eq!(
            factory.derive_for_api_auth(PHRASE, None).unwrap_err(),
            KeyError::InvalidPhrase
        );
        assert_eq!(
            factory
                .derive_for_bitid("", 0, "https://example.com", Some(&words))
                .unwrap_err(),
            KeyError::InvalidPhrase
        );
        assert_eq!(factory.primitives.seeds.get(), 0);

        factory.derive_from_phrase(PHRASE, Some(&words)).unwrap();
        assert_eq!(factory.primitives.seeds.get(), 1);
    }

    // Verifies a failing child derivation surfaces as an error with no key.
    #[test]
    fn test_bitid_failure_propagates() {
        let factory = KeyFactory::new(CountingPrimitives {
            fail_bitid: true,
            ..Default::default()
        });
        let words = Wordlist::english();

        let err = factory
            .derive_for_bitid(PHRASE, 0, "https://example.com", Some(&words))
            .unwrap_err();
        assert!(matches!(err, KeyError::DerivationFailure(_)));
        assert_eq!(factory.primitives.seeds.get(), 1);
    }

    // Verifies a custom wordlist is honored instead of any built-in list.
    #[test]
    fn test_custom_wordlist_phrase() {
        let factory = KeyFactory::<Secp256k1Primitives>::default();
        let custom = Wordlist::new((0..WORDLIST_LEN).map(|i| format!("w{i}"))).unwrap();
        let mapped = format!("{} w3", ["w0"; 11].join(" "));

        assert!(factory.derive_from_phrase(&mapped, Some(&custom)).is_ok());
        assert_eq!(
            factory.derive_from_phrase(PHRASE, Some(&custom)).unwrap_err(),
            KeyError::InvalidPhrase
        );
    }

    // Verifies the pairing input must carry a secret.
    #[test]
    fn test_pairing_needs_secret() {
        let factory = KeyFactory::<Secp256k1Primitives>::default();
        let words = Wordlist::english();
        let key = factory.derive_from_phrase(PHRASE, Some(&words)).unwrap();
        let public = factory
            .decode_from_public_bytes(&key.serialize_public(codec::PublicEncoding::DerCompressed))
            .unwrap();

        assert_eq!(
            factory.derive_pairing_key(&public, b"nonce").unwrap_err(),
            KeyError::MissingSecret
        );
    }
}
