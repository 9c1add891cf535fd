//! DER public key serialization and public-only import.

use serde::{Deserialize, Serialize};

use crate::{
    error::KeyResult,
    material::{CoreKey, KeyMaterial},
    primitives::CurveKeyPrimitives,
};

/// Length of a compressed point encoding (prefix byte and x-coordinate).
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// Length of an uncompressed point encoding (prefix byte and both coordinates).
pub const UNCOMPRESSED_PUBLIC_KEY_LEN: usize = 65;

/// Shape of a serialized public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublicEncoding {
    /// `0x02`/`0x03` prefix followed by the x-coordinate.
    #[default]
    DerCompressed,
    /// `0x04` prefix followed by both coordinates.
    DerUncompressed,
}

impl PublicEncoding {
    /// Whether this is the compressed form.
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::DerCompressed)
    }
}

/// Serializes the public point of `material`. Never reads the secret.
pub(crate) fn encode<P: CurveKeyPrimitives>(
    primitives: &P,
    material: &KeyMaterial,
    encoding: PublicEncoding,
) -> Vec<u8> {
    primitives.encode_public_point(material.public(), encoding.is_compressed())
}

/// Builds public-only material from a point encoding.
///
/// The preferred compression of the result follows the length of `bytes`.
pub(crate) fn decode<P: CurveKeyPrimitives>(primitives: &P, bytes: &[u8]) -> KeyResult<KeyMaterial> {
    let point = primitives.decode_public_point(bytes)?;
    KeyMaterial::recover_public_only(
        primitives,
        CoreKey::Public(point),
        bytes.len() == COMPRESSED_PUBLIC_KEY_LEN,
    )
}
