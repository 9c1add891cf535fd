//! Owned key material: an optional secret and the public point it generates.

use secp256k1::PublicKey;

use crate::{error::KeyResult, primitives::CurveKeyPrimitives, secret::Secret256};

/// What a construction path hands to [`KeyMaterial::recover_public_only`].
pub(crate) enum CoreKey {
    /// A freshly derived private scalar; its public point still has to be computed.
    Secret(Secret256),
    /// A public point received from outside, with no secret.
    Public(PublicKey),
}

/// The secret (if any) and public point behind a [`Key`](crate::Key).
///
/// When a secret is present, `public` is always the point generated from it. The secret is
/// scrubbed when the material is dropped.
pub(crate) struct KeyMaterial {
    secret: Option<Secret256>,
    public: PublicKey,
    compressed: bool,
}

impl KeyMaterial {
    /// Builds material from a derived secret or an already-public value.
    ///
    /// Every construction path goes through here, so public bytes can never diverge from the
    /// secret. On failure the secret is dropped, and therefore scrubbed, before returning.
    pub(crate) fn recover_public_only<P: CurveKeyPrimitives>(
        primitives: &P,
        core: CoreKey,
        compressed: bool,
    ) -> KeyResult<Self> {
        match core {
            CoreKey::Secret(secret) => {
                let public = primitives.point_from_secret(&secret)?;
                Ok(Self {
                    secret: Some(secret),
                    public,
                    compressed,
                })
            }
            CoreKey::Public(public) => Ok(Self {
                secret: None,
                public,
                compressed,
            }),
        }
    }

    pub(crate) const fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    pub(crate) const fn secret(&self) -> Option<&Secret256> {
        self.secret.as_ref()
    }

    pub(crate) const fn public(&self) -> &PublicKey {
        &self.public
    }

    /// Encoding preference recorded when the public key was materialized.
    pub(crate) const fn compressed(&self) -> bool {
        self.compressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::KeyError, primitives::Secp256k1Primitives};

    #[test]
    fn test_secret_material_matches_point() {
        let p = Secp256k1Primitives;
        let material = KeyMaterial::recover_public_only(
            &p,
            CoreKey::Secret(Secret256::from_bytes([6u8; 32])),
            false,
        )
        .unwrap();

        assert!(material.has_secret());
        assert!(!material.compressed());
        let expected = p
            .point_from_secret(&Secret256::from_bytes([6u8; 32]))
            .unwrap();
        assert_eq!(material.public(), &expected);
    }

    #[test]
    fn test_public_material_has_no_secret() {
        let p = Secp256k1Primitives;
        let point = p
            .point_from_secret(&Secret256::from_bytes([6u8; 32]))
            .unwrap();
        let material = KeyMaterial::recover_public_only(&p, CoreKey::Public(point), true).unwrap();

        assert!(!material.has_secret());
        assert!(material.secret().is_none());
        assert!(material.compressed());
        assert_eq!(material.public(), &point);
    }

    #[test]
    fn test_invalid_secret_yields_no_material() {
        let p = Secp256k1Primitives;
        let result =
            KeyMaterial::recover_public_only(&p, CoreKey::Secret(Secret256::from_bytes([0; 32])), false);
        assert!(matches!(result, Err(KeyError::DerivationFailure(_))));
    }
}
