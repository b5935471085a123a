use anyhow::{bail, Context};
use log::*;
use std::collections::HashSet;

use crate::wordle;

// parse_words reads one word per line, and returns them uppercased in the order given. It
// skips empty lines, lines that start with a '#', repeated words, and anything that isn't a
// five letter word.
pub fn parse_words(contents: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dropped = 0;
    let words = contents
        .lines()
        .map(str::trim)
        .filter(|s| !s.starts_with('#'))
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .filter(|w| {
            let valid = wordle::validate_word(w);
            if !valid {
                dropped += 1;
            }
            valid
        })
        .filter(|w| seen.insert(w.clone()))
        .collect();

    if dropped > 0 {
        warn!("Dropped {} invalid words from the word list", dropped);
    }
    words
}

/// Loads the word list the bot solves with. Fails if the file can't be read or holds no
/// valid words.
pub fn load_universe(path: impl AsRef<str>) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).context(format!("Error reading word list {}", path))?;

    let words = parse_words(&contents);
    if words.is_empty() {
        bail!("word list {} is empty", path);
    }

    info!("Loaded {} words from {}", words.len(), path);
    Ok(words)
}
