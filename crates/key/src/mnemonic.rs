//! BIP39 phrase validation against a caller-supplied wordlist, and the phrase-to-seed KDF.

use std::collections::HashMap;

use bitcoin::hashes::{hmac, sha256, sha512, Hash, HashEngine};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    error::{KeyError, KeyResult},
    secret::Seed512,
};

/// Number of words in a BIP39 wordlist.
pub const WORDLIST_LEN: usize = 2048;

/// Bits encoded by a single word.
const BITS_PER_WORD: usize = 11;

/// Longest phrase accepted (256 bits of entropy).
const MAX_PHRASE_WORDS: usize = 24;

/// PBKDF2 iteration count fixed by BIP39.
const PBKDF2_ROUNDS: u32 = 2048;

/// An in-memory BIP39 wordlist.
///
/// There is no process-wide default: every derivation takes the wordlist it should validate
/// against.
#[derive(Debug, Clone)]
pub struct Wordlist {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl Wordlist {
    /// Builds a wordlist from exactly [`WORDLIST_LEN`] distinct words, in index order.
    pub fn new<I, S>(words: I) -> KeyResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let index: HashMap<String, u16> = words
            .iter()
            .enumerate()
            .map(|(i, word)| (word.clone(), i as u16))
            .collect();

        if words.len() != WORDLIST_LEN || index.len() != WORDLIST_LEN {
            return Err(KeyError::InvalidWordlist { len: index.len() });
        }

        Ok(Self { words, index })
    }

    /// The BIP39 English wordlist.
    pub fn english() -> Self {
        let list = bip39::Language::English.word_list();
        let words: Vec<String> = list.iter().map(|w| (*w).to_string()).collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, word)| (word.clone(), i as u16))
            .collect();
        Self { words, index }
    }

    /// Index of `word` in the list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Word at `index`.
    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }
}

/// Checks that every word of `phrase` is in `wordlist` and that the checksum bits match.
pub(crate) fn is_valid_phrase(phrase: &str, wordlist: &Wordlist) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let count = words.len();
    if count == 0 || count % 3 != 0 || count > MAX_PHRASE_WORDS {
        return false;
    }

    let mut indices = Zeroizing::new(Vec::with_capacity(count));
    for word in &words {
        match wordlist.index_of(word) {
            Some(i) => indices.push(i),
            None => return false,
        }
    }

    // 24 words carry 264 bits, so 33 bytes always suffice.
    let mut bits = Zeroizing::new([0u8; 33]);
    for (i, idx) in indices.iter().enumerate() {
        for b in 0..BITS_PER_WORD {
            if idx & (1u16 << (BITS_PER_WORD - 1 - b)) != 0 {
                let pos = i * BITS_PER_WORD + b;
                bits[pos / 8] |= 1u8 << (7 - pos % 8);
            }
        }
    }

    let checksum_bits = count / 3;
    let entropy_len = (count * BITS_PER_WORD - checksum_bits) / 8;

    let mut digest = sha256::Hash::hash(&bits[..entropy_len]).to_byte_array();
    let expected = digest[0] >> (8 - checksum_bits);
    digest.zeroize();

    let actual = bits[entropy_len] >> (8 - checksum_bits);
    expected == actual
}

/// PBKDF2-HMAC-SHA512 over the phrase with salt `"mnemonic" || passphrase`.
pub(crate) fn seed_from_phrase(phrase: &str, passphrase: &str) -> Seed512 {
    let mut salt = Zeroizing::new(Vec::with_capacity(8 + passphrase.len()));
    salt.extend_from_slice(b"mnemonic");
    salt.extend_from_slice(passphrase.as_bytes());

    let keyed = hmac::HmacEngine::<sha512::Hash>::new(phrase.as_bytes());

    let mut engine = keyed.clone();
    engine.input(&salt);
    engine.input(&1u32.to_be_bytes());
    let mut block = hmac::Hmac::<sha512::Hash>::from_engine(engine).to_byte_array();
    let mut out = block;

    for _ in 1..PBKDF2_ROUNDS {
        let mut engine = keyed.clone();
        engine.input(&block);
        block = hmac::Hmac::<sha512::Hash>::from_engine(engine).to_byte_array();
        for (o, b) in out.iter_mut().zip(block.iter()) {
            *o ^= b;
        }
    }
    block.zeroize();

    let seed = Seed512::from_bytes(out);
    out.zeroize();
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                                 abandon abandon abandon about";

    #[test]
    fn test_english_wordlist() {
        let list = Wordlist::english();
        assert_eq!(list.index_of("abandon"), Some(0));
        assert_eq!(list.index_of("zoo"), Some(2047));
        assert_eq!(list.word(3), Some("about"));
        assert_eq!(list.index_of("bitcoin"), None);
    }

    #[test]
    fn test_wordlist_rejects_bad_lengths() {
        let short = Wordlist::new(["a", "b", "c"]);
        assert_eq!(short.unwrap_err(), KeyError::InvalidWordlist { len: 3 });

        let dupes = Wordlist::new(std::iter::repeat("same").take(WORDLIST_LEN));
        assert_eq!(dupes.unwrap_err(), KeyError::InvalidWordlist { len: 1 });

        let custom = Wordlist::new((0..WORDLIST_LEN).map(|i| format!("w{i}")));
        assert!(custom.is_ok());
    }

    #[test]
    fn test_valid_phrases() {
        let list = Wordlist::english();
        assert!(is_valid_phrase(ABANDON_ABOUT, &list));
        assert!(is_valid_phrase(
            "legal winner thank year wave sausage worth useful legal winner thank yellow",
            &list
        ));
        assert!(is_valid_phrase(
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo \
             zoo zoo vote",
            &list
        ));
    }

    #[test]
    fn test_invalid_phrases() {
        let list = Wordlist::english();
        assert!(!is_valid_phrase("", &list));
        assert!(!is_valid_phrase("   ", &list));
        // bad checksum
        assert!(!is_valid_phrase(&["abandon"; 12].join(" "), &list));
        // unknown word
        assert!(!is_valid_phrase(
            &ABANDON_ABOUT.replace("about", "aboutt"),
            &list
        ));
        // not a multiple of three
        assert!(!is_valid_phrase(&["abandon"; 13].join(" "), &list));
        // too long
        assert!(!is_valid_phrase(&["abandon"; 27].join(" "), &list));
    }

    #[test]
    fn test_phrase_needs_matching_wordlist() {
        let custom = Wordlist::new((0..WORDLIST_LEN).map(|i| format!("w{i}"))).unwrap();
        assert!(!is_valid_phrase(ABANDON_ABOUT, &custom));

        // Same indices as ABANDON_ABOUT: eleven zeros then index 3.
        let mapped = format!("{} w3", ["w0"; 11].join(" "));
        assert!(is_valid_phrase(&mapped, &custom));
    }

    #[test]
    fn test_seed_known_vector() {
        let seed = seed_from_phrase(ABANDON_ABOUT, "");
        assert_eq!(
            hex::encode(seed.expose_secret()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn test_seed_matches_bip39_crate() {
        let phrase = "legal winner thank year wave sausage worth useful legal winner thank yellow";
        let reference = bip39::Mnemonic::parse_in(bip39::Language::English, phrase)
            .unwrap()
            .to_seed("TREZOR");
        let seed = seed_from_phrase(phrase, "TREZOR");
        assert_eq!(seed.expose_secret(), &reference);
    }
}
