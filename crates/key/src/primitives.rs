//! The curve, KDF and BIP32 primitives that key construction is built on.
//!
//! [`CurveKeyPrimitives`] is the narrow boundary between key lifecycle logic and the underlying
//! libraries. Values cross it only as owned, scrubbing types ([`Seed512`], [`Secret256`]) or as
//! public data.

use bitcoin::{
    bip32::{ChildNumber, Xpriv},
    hashes::{hmac, sha256, Hash, HashEngine},
    Network,
};
use secp256k1::{
    ecdsa::{RecoverableSignature, RecoveryId},
    Message, PublicKey, SECP256K1,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    error::{KeyError, KeyResult},
    mnemonic::{self, Wordlist},
    paths::{bitid_path, API_AUTH_PATH},
    secret::{ScratchXpriv, Secret256, Seed512},
};

/// Length of a compact recoverable signature: header byte, `r`, `s`.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Base value of the compact signature header byte.
const COMPACT_HEADER_BASE: u8 = 27;

/// Added to the header byte when the signer's public key is compressed.
const COMPACT_HEADER_COMPRESSED: u8 = 4;

/// Upper bound on DRBG draws before giving up on finding a valid scalar.
const MAX_PAIRING_DRAWS: usize = 16;

/// Operations the key lifecycle needs from the elliptic-curve and KDF libraries.
pub trait CurveKeyPrimitives {
    /// Whether every word is in `wordlist` and the BIP39 checksum holds.
    fn is_valid_mnemonic(&self, phrase: &str, wordlist: &Wordlist) -> bool;

    /// BIP39 phrase-to-seed KDF.
    fn kdf_mnemonic_to_seed(&self, phrase: &str, passphrase: &str) -> Seed512;

    /// Secret for the fixed API authentication path.
    fn derive_api_auth_secret(&self, seed: &Seed512) -> KeyResult<Secret256>;

    /// Secret for the BitID path salted by `index` and `uri`.
    fn derive_bitid_secret(&self, seed: &Seed512, index: u32, uri: &str) -> KeyResult<Secret256>;

    /// Secret deterministic in `(secret, nonce)` for pairwise messaging.
    fn derive_pairing_secret(&self, secret: &Secret256, nonce: &[u8]) -> KeyResult<Secret256>;

    /// The public point of `secret`.
    fn point_from_secret(&self, secret: &Secret256) -> KeyResult<PublicKey>;

    /// SEC1 encoding of `point`, 33 bytes compressed or 65 bytes uncompressed.
    fn encode_public_point(&self, point: &PublicKey, compressed: bool) -> Vec<u8>;

    /// Parses a SEC1 point encoding.
    fn decode_public_point(&self, bytes: &[u8]) -> KeyResult<PublicKey>;

    /// Signs a 32-byte digest into a compact recoverable signature.
    fn sign_compact(
        &self,
        secret: &Secret256,
        digest: &[u8; 32],
        compressed: bool,
    ) -> KeyResult<[u8; COMPACT_SIGNATURE_LEN]>;

    /// Recovers the signer's point and its compression flag from a compact signature.
    fn recover_compact(
        &self,
        digest: &[u8; 32],
        signature: &[u8; COMPACT_SIGNATURE_LEN],
    ) -> KeyResult<(PublicKey, bool)>;
}

/// [`CurveKeyPrimitives`] backed by libsecp256k1 and `bitcoin::bip32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Primitives;

impl Secp256k1Primitives {
    /// Derives the private scalar at `path` below the BIP32 master key for `seed`.
    fn derive_path(seed: &Seed512, path: &[ChildNumber]) -> KeyResult<Secret256> {
        let master = ScratchXpriv::new(Xpriv::new_master(Network::Bitcoin, seed.expose_secret())?);
        let child = ScratchXpriv::new(master.derive_priv(SECP256K1, &path)?);
        Ok(child.secret())
    }
}

impl CurveKeyPrimitives for Secp256k1Primitives {
    fn is_valid_mnemonic(&self, phrase: &str, wordlist: &Wordlist) -> bool {
        mnemonic::is_valid_phrase(phrase, wordlist)
    }

    fn kdf_mnemonic_to_seed(&self, phrase: &str, passphrase: &str) -> Seed512 {
        mnemonic::seed_from_phrase(phrase, passphrase)
    }

    fn derive_api_auth_secret(&self, seed: &Seed512) -> KeyResult<Secret256> {
        Self::derive_path(seed, API_AUTH_PATH)
    }

    fn derive_bitid_secret(&self, seed: &Seed512, index: u32, uri: &str) -> KeyResult<Secret256> {
        Self::derive_path(seed, &bitid_path(index, uri))
    }

    fn derive_pairing_secret(&self, secret: &Secret256, nonce: &[u8]) -> KeyResult<Secret256> {
        let mut drbg = HmacDrbg::new(secret.expose_secret(), nonce);
        for _ in 0..MAX_PAIRING_DRAWS {
            let mut bytes = [0u8; 32];
            drbg.fill(&mut bytes);
            let candidate = Secret256::from_bytes(bytes);
            bytes.zeroize();

            if candidate.to_scratch_key().is_ok() {
                return Ok(candidate);
            }
        }
        Err(KeyError::DerivationFailure(
            "pairing derivation produced no valid scalar".to_string(),
        ))
    }

    fn point_from_secret(&self, secret: &Secret256) -> KeyResult<PublicKey> {
        let key = secret.to_scratch_key()?;
        Ok(PublicKey::from_secret_key(SECP256K1, &key))
    }

    fn encode_public_point(&self, point: &PublicKey, compressed: bool) -> Vec<u8> {
        if compressed {
            point.serialize().to_vec()
        } else {
            point.serialize_uncompressed().to_vec()
        }
    }

    fn decode_public_point(&self, bytes: &[u8]) -> KeyResult<PublicKey> {
        PublicKey::from_slice(bytes).map_err(|_| KeyError::InvalidPublicKeyEncoding)
    }

    fn sign_compact(
        &self,
        secret: &Secret256,
        digest: &[u8; 32],
        compressed: bool,
    ) -> KeyResult<[u8; COMPACT_SIGNATURE_LEN]> {
        let key = secret.to_scratch_key()?;
        let signature = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest(*digest), &key);
        let (recid, data) = signature.serialize_compact();

        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = COMPACT_HEADER_BASE
            + recid.to_i32() as u8
            + if compressed { COMPACT_HEADER_COMPRESSED } else { 0 };
        out[1..].copy_from_slice(&data);
        Ok(out)
    }

    fn recover_compact(
        &self,
        digest: &[u8; 32],
        signature: &[u8; COMPACT_SIGNATURE_LEN],
    ) -> KeyResult<(PublicKey, bool)> {
        let header = signature[0];
        if !(COMPACT_HEADER_BASE..COMPACT_HEADER_BASE + 2 * COMPACT_HEADER_COMPRESSED)
            .contains(&header)
        {
            return Err(KeyError::InvalidSignature);
        }
        let offset = header - COMPACT_HEADER_BASE;
        let compressed = offset >= COMPACT_HEADER_COMPRESSED;

        let recid = RecoveryId::from_i32(i32::from(offset % COMPACT_HEADER_COMPRESSED))
            .map_err(|_| KeyError::InvalidSignature)?;
        let signature = RecoverableSignature::from_compact(&signature[1..], recid)
            .map_err(|_| KeyError::InvalidSignature)?;
        let point = SECP256K1
            .recover_ecdsa(&Message::from_digest(*digest), &signature)
            .map_err(|_| KeyError::InvalidSignature)?;

        Ok((point, compressed))
    }
}

/// HMAC-DRBG over SHA-256 (NIST SP 800-90A), without reseeding.
#[derive(Zeroize, ZeroizeOnDrop)]
struct HmacDrbg {
    k: [u8; 32],
    v: [u8; 32],
}

impl HmacDrbg {
    fn new(entropy: &[u8], nonce: &[u8]) -> Self {
        let mut drbg = Self {
            k: [0x00; 32],
            v: [0x01; 32],
        };
        drbg.update(&[entropy, nonce]);
        drbg
    }

    fn mac(key: &[u8; 32], parts: &[&[u8]]) -> [u8; 32] {
        let mut engine = hmac::HmacEngine::<sha256::Hash>::new(key);
        for part in parts {
            engine.input(part);
        }
        hmac::Hmac::<sha256::Hash>::from_engine(engine).to_byte_array()
    }

    fn update(&mut self, provided: &[&[u8]]) {
        let mut parts: Vec<&[u8]> = Vec::with_capacity(2 + provided.len());
        parts.push(&self.v);
        parts.push(&[0x00]);
        parts.extend_from_slice(provided);
        self.k = Self::mac(&self.k, &parts);
        self.v = Self::mac(&self.k, &[&self.v[..]]);

        if provided.iter().all(|p| p.is_empty()) {
            return;
        }

        let mut parts: Vec<&[u8]> = Vec::with_capacity(2 + provided.len());
        parts.push(&self.v);
        parts.push(&[0x01]);
        parts.extend_from_slice(provided);
        self.k = Self::mac(&self.k, &parts);
        self.v = Self::mac(&self.k, &[&self.v[..]]);
    }

    fn fill(&mut self, out: &mut [u8; 32]) {
        self.v = Self::mac(&self.k, &[&self.v[..]]);
        out.copy_from_slice(&self.v);
        self.update(&[]);
    }
}
