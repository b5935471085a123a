//! Wordle is a game where you have to guess a five letter word. After each attempt, the game
//! tells you which letters you guessed correctly, and which letters are in the word but in
//! the wrong position.
//!
//! This module implements the solving side of it: reading feedback, narrowing the list of
//! candidate words, and picking the next word to play.

/// Number of letters in every Wordle word.
pub const WORD_LENGTH: usize = 5;

/// Strong first guesses, played before any feedback exists.
pub const OPENING_WORDS: [&str; 10] = [
    "CRANE", "SLATE", "ADIEU", "AUDIO", "RAISE", "ROATE", "CRATE", "TRACE", "LEAST", "STARE",
];

/// Letter represents the judgment for a single letter in an attempted word.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Letter {
    Correct(char),
    CorrectButWrongPosition(char),
    Wrong(char),
}

impl Letter {
    /// `symbol` returns the feedback symbol for this letter: G, Y or B.
    pub fn symbol(&self) -> char {
        match self {
            Letter::Correct(_) => 'G',
            Letter::CorrectButWrongPosition(_) => 'Y',
            Letter::Wrong(_) => 'B',
        }
    }

    /// `square` returns the colored square Wordle shows for this letter.
    pub fn square(&self) -> char {
        match self {
            Letter::Correct(_) => '\u{1F7E9}',
            Letter::CorrectButWrongPosition(_) => '\u{1F7E8}',
            Letter::Wrong(_) => '\u{2B1B}',
        }
    }
}

/// `validate_word` returns true if `word` is exactly five uppercase ASCII letters.
pub fn validate_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.bytes().all(|b| b.is_ascii_uppercase())
}

/// `validate_feedback` returns true if `feedback` is exactly five of G, Y and B.
pub fn validate_feedback(feedback: &str) -> bool {
    feedback.len() == WORD_LENGTH && feedback.bytes().all(|b| matches!(b, b'G' | b'Y' | b'B'))
}

/// `decode` pairs a word with its feedback string and returns the positional judgment, or
/// None if either fails validation.
pub fn decode(word: &str, feedback: &str) -> Option<Vec<Letter>> {
    if !validate_word(word) || !validate_feedback(feedback) {
        return None;
    }

    Some(
        word.chars()
            .zip(feedback.chars())
            .map(|(c, f)| match f {
                'G' => Letter::Correct(c),
                'Y' => Letter::CorrectButWrongPosition(c),
                _ => Letter::Wrong(c),
            })
            .collect(),
    )
}

/// `feedback_string` encodes a judgment back into its G/Y/B form.
pub fn feedback_string(letters: &[Letter]) -> String {
    letters.iter().map(Letter::symbol).collect()
}

fn index(b: u8) -> usize {
    (b - b'A') as usize
}

// `assess` compares `guess` to the hidden `target` word, and returns the feedback Wordle
// would show for it. Greens are assigned first, then yellows are handed out left to right
// while unmatched copies of the letter remain in the target.
//
// Both words must be valid.
pub fn assess(target: &str, guess: &str) -> Vec<Letter> {
    let target = target.as_bytes();
    let guess = guess.as_bytes();

    // Letters of the target not consumed by a green.
    let mut unmatched = [0u8; 26];
    for (t, g) in target.iter().zip(guess) {
        if t != g {
            unmatched[index(*t)] += 1;
        }
    }

    guess
        .iter()
        .zip(target)
        .map(|(&g, &t)| {
            let c = g as char;
            if g == t {
                Letter::Correct(c)
            } else if unmatched[index(g)] > 0 {
                unmatched[index(g)] -= 1;
                Letter::CorrectButWrongPosition(c)
            } else {
                Letter::Wrong(c)
            }
        })
        .collect()
}

/// `filter` returns the candidates, in their original order, that are consistent with
/// `guess` having received `feedback`.
///
/// A letter marked B only rules out words holding more copies of it than the guess
/// confirmed with G or Y. That way a repeated letter in the guess, scored once as a match
/// and once as absent, pins the word to exactly one copy.
///
/// Both `guess` and `feedback` must have passed validation.
pub fn filter(candidates: &[String], guess: &str, feedback: &str) -> Vec<String> {
    let guess = guess.as_bytes();
    let feedback = feedback.as_bytes();

    let mut required = [0usize; 26];
    for (g, f) in guess.iter().zip(feedback) {
        if matches!(f, b'G' | b'Y') {
            required[index(*g)] += 1;
        }
    }

    candidates
        .iter()
        .filter(|w| is_consistent(w.as_bytes(), guess, feedback, &required))
        .cloned()
        .collect()
}

fn is_consistent(word: &[u8], guess: &[u8], feedback: &[u8], required: &[usize; 26]) -> bool {
    guess
        .iter()
        .zip(feedback)
        .enumerate()
        .all(|(i, (&g, &f))| match f {
            b'G' => word[i] == g,
            b'Y' => word[i] != g && word.contains(&g),
            _ => word.iter().filter(|&&c| c == g).count() <= required[index(g)],
        })
}

/// `exclude` returns the candidates without `word`.
pub fn exclude(candidates: &[String], word: &str) -> Vec<String> {
    candidates.iter().filter(|w| *w != word).cloned().collect()
}

// Iterates over the distinct letters of a word.
fn distinct_letters(word: &str) -> impl Iterator<Item = usize> + '_ {
    let mut seen = [false; 26];
    word.bytes().map(index).filter(move |&i| !std::mem::replace(&mut seen[i], true))
}

/// `choose_next` picks the candidate whose distinct letters are most common across the
/// candidate set, counting each letter once per word. Ties go to the earliest candidate.
/// Returns None only if there are no candidates.
pub fn choose_next(candidates: &[String]) -> Option<&String> {
    let mut frequency = [0u32; 26];
    for word in candidates {
        for i in distinct_letters(word) {
            frequency[i] += 1;
        }
    }

    let mut best: Option<(&String, u32)> = None;
    for word in candidates {
        let score: u32 = distinct_letters(word).map(|i| frequency[i]).sum();
        if best.map_or(true, |(_, max)| score > max) {
            best = Some((word, score));
        }
    }

    best.map(|(word, _)| word)
}
