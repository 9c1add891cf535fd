use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use walletkit_key::{PublicEncoding, Wordlist};

/// Settings read from the optional toml config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Config {
    /// A newline-separated wordlist file. The BIP39 English list is used when unset.
    pub(crate) wordlist: Option<PathBuf>,

    /// The public key encoding to print when none is given on the command line.
    pub(crate) encoding: Option<PublicEncoding>,
}

impl Config {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Builds the wordlist phrases are validated against.
    pub(crate) fn wordlist(&self) -> Result<Wordlist> {
        let Some(path) = &self.wordlist else {
            return Ok(Wordlist::english());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read wordlist {}", path.display()))?;
        let words = parse_wordlist(&text)
            .with_context(|| format!("invalid wordlist {}", path.display()))?;
        debug!(path = %path.display(), first = ?words.word(0), "loaded custom wordlist");
        Ok(words)
    }
}

/// Parses one word per line, skipping blank lines.
fn parse_wordlist(text: &str) -> Result<Wordlist> {
    let words = text.lines().map(str::trim).filter(|line| !line.is_empty());
    Ok(Wordlist::new(words)?)
}
