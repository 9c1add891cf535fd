//! Owners for secret-sized values.
//!
//! Every transient copy of a private scalar or seed lives in one of these types so that it is
//! overwritten on drop, including on early-return error paths. None of them implement [`Clone`].

use std::{fmt, hint::black_box, ops::Deref};

use bitcoin::bip32::Xpriv;
use secp256k1::SecretKey;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{KeyError, KeyResult};

/// A 256-bit elliptic-curve private scalar.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret256([u8; 32]);

impl Secret256 {
    /// Takes ownership of raw scalar bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Copies the scalar out of a library [`SecretKey`].
    pub fn from_secret_key(key: &SecretKey) -> Self {
        let mut bytes = key.secret_bytes();
        let secret = Self(bytes);
        bytes.zeroize();
        secret
    }

    /// Exposes the scalar bytes.
    ///
    /// The returned reference must not be copied into storage that outlives `self`.
    pub const fn expose_secret(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parses the scalar into a scrubbing [`ScratchKey`].
    pub(crate) fn to_scratch_key(&self) -> KeyResult<ScratchKey> {
        SecretKey::from_slice(&self.0)
            .map(ScratchKey)
            .map_err(|_| KeyError::DerivationFailure("secret is not a valid scalar".to_string()))
    }
}

impl fmt::Debug for Secret256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret256([REDACTED])")
    }
}

/// The 512-bit output of the mnemonic KDF.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed512([u8; 64]);

impl Seed512 {
    /// Takes ownership of raw seed bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Exposes the seed bytes.
    pub const fn expose_secret(&self) -> &[u8; 64] {
        &self.0
    }

    /// The first 256 bits of the seed, used directly as a scalar by the phrase key path.
    pub(crate) fn truncate(&self) -> Secret256 {
        let mut head = [0u8; 32];
        head.copy_from_slice(&self.0[..32]);
        let secret = Secret256(head);
        head.zeroize();
        secret
    }
}

impl fmt::Debug for Seed512 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed512([REDACTED])")
    }
}

/// A transient [`SecretKey`] that is erased when dropped.
pub(crate) struct ScratchKey(SecretKey);

impl Deref for ScratchKey {
    type Target = SecretKey;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for ScratchKey {
    fn drop(&mut self) {
        // NOTE: `non_secure_erase` overwrites the scalar with a fixed non-zero pattern.
        self.0.non_secure_erase();
    }
}

/// A transient BIP32 [`Xpriv`] whose private key and chain code are erased when dropped.
pub(crate) struct ScratchXpriv(Xpriv);

impl ScratchXpriv {
    pub(crate) const fn new(xpriv: Xpriv) -> Self {
        Self(xpriv)
    }

    /// Copies the private scalar out of the extended key.
    pub(crate) fn secret(&self) -> Secret256 {
        Secret256::from_secret_key(&self.0.private_key)
    }
}

impl Deref for ScratchXpriv {
    type Target = Xpriv;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Drop for ScratchXpriv {
    fn drop(&mut self) {
        self.0.private_key.non_secure_erase();
        let chaincode: &mut [u8; 32] = self.0.chain_code.as_mut();
        chaincode.zeroize();
        let fingerprint: &mut [u8; 4] = self.0.parent_fingerprint.as_mut();
        fingerprint.zeroize();
    }
}

/// Compares two equal-width byte arrays without exiting at the first differing byte.
#[inline(never)]
pub(crate) fn fixed_eq<const N: usize>(a: &[u8; N], b: &[u8; N]) -> bool {
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    black_box(diff) == 0
}
