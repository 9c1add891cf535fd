//! BIP32 derivation paths for the scheme-specific keys.
//!
//! ```text
//! Seed512
//! └── m (BIP32 master, HMAC-SHA512 keyed with "Bitcoin seed")
//!     ├── m/1'/0 ──────────── API authentication key
//!     └── m/13'/a'/b'/c'/d' ─ BitID key, a..d from SHA-256(index_le32 || uri)
//! ```
use bitcoin::{
    bip32::ChildNumber,
    hashes::{sha256, Hash, HashEngine},
};

/// Clears the hardened bit so that any hash word can be used as a hardened index.
const HARDENED_INDEX_MASK: u32 = 0x7FFF_FFFF;

/// Path for the key used to authenticate API calls.
pub(crate) const API_AUTH_PATH: &[ChildNumber] = &[
    ChildNumber::Hardened { index: 1 },
    ChildNumber::Normal { index: 0 },
];

/// BitID purpose index (`m/13'`).
pub(crate) const BITID_PURPOSE_IDX: ChildNumber = ChildNumber::Hardened { index: 13 };

/// Builds the per-service BitID path for `index` and `uri`.
pub(crate) fn bitid_path(index: u32, uri: &str) -> [ChildNumber; 5] {
    let mut engine = sha256::Hash::engine();
    engine.input(&index.to_le_bytes());
    engine.input(uri.as_bytes());
    let hash = sha256::Hash::from_engine(engine).to_byte_array();

    let word = |i: usize| {
        let mut le = [0u8; 4];
        le.copy_from_slice(&hash[4 * i..4 * i + 4]);
        ChildNumber::Hardened {
            index: u32::from_le_bytes(le) & HARDENED_INDEX_MASK,
        }
    };

    [BITID_PURPOSE_IDX, word(0), word(1), word(2), word(3)]
}

#[cfg(test)]
mod tests {
    use super::*;

    const URI: &str = "http://bitid.bitcoin.blue/callback";

    #[test]
    fn test_bitid_path_shape() {
        let path = bitid_path(0, URI);
        assert_eq!(path[0], BITID_PURPOSE_IDX);
        assert!(path.iter().all(ChildNumber::is_hardened));
    }

    #[test]
    fn test_bitid_path_is_salted() {
        assert_eq!(bitid_path(0, URI), bitid_path(0, URI));
        assert_ne!(bitid_path(0, URI), bitid_path(1, URI));
        assert_ne!(bitid_path(0, URI), bitid_path(0, "https://example.com/login"));
    }

    #[test]
    fn test_bitid_path_words() {
        let mut data = 7u32.to_le_bytes().to_vec();
        data.extend_from_slice(URI.as_bytes());
        let hash = sha256::Hash::hash(&data).to_byte_array();
        let first = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]]) & HARDENED_INDEX_MASK;

        assert_eq!(
            bitid_path(7, URI)[1],
            ChildNumber::Hardened { index: first }
        );
    }

    #[test]
    fn test_bitid_path_vector() {
        let expected = [0x3e55_3112, 0x40af_82cf, 0x4361_fb3b, 0x6dd2_bf37]
            .map(|index| ChildNumber::Hardened { index });
        assert_eq!(bitid_path(0, URI)[1..], expected);
    }
}
