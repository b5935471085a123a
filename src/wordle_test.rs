use crate::wordle::*;
use proptest::prelude::*;

const WORDS: [&str; 16] = [
    "CRANE", "SLATE", "TRACE", "CRATE", "RAISE", "ARISE", "STARE", "ROAST", "TOAST", "BEAST",
    "ERASE", "SPEED", "GEESE", "EERIE", "LEVEL", "ABBEY",
];

fn words() -> Vec<String> {
    WORDS.iter().map(|w| w.to_string()).collect()
}

fn feedback(target: &str, guess: &str) -> String {
    feedback_string(&assess(target, guess))
}

#[test]
fn it_validates_words() {
    assert!(validate_word("CRANE"));
    assert!(!validate_word("crane"));
    assert!(!validate_word("CRAN"));
    assert!(!validate_word("CRANES"));
    assert!(!validate_word("CR4NE"));
    assert!(!validate_word("ÉCRAN"));
}

#[test]
fn it_validates_feedback() {
    assert!(validate_feedback("GYBBG"));
    assert!(!validate_feedback("gybbg"));
    assert!(!validate_feedback("GYBB"));
    assert!(!validate_feedback("GYXBG"));
}

#[test]
fn it_decodes() {
    assert_eq!(
        decode("CRANE", "GYBBG").unwrap(),
        vec![
            Letter::Correct('C'),
            Letter::CorrectButWrongPosition('R'),
            Letter::Wrong('A'),
            Letter::Wrong('N'),
            Letter::Correct('E'),
        ]
    );
    assert_eq!(decode("CRANE", "GYBB"), None);
    assert_eq!(decode("crane", "GYBBG"), None);
    assert_eq!(feedback_string(&decode("CRANE", "GYBBG").unwrap()), "GYBBG");
}

#[test]
fn it_assesses_repeated_letters() {
    assert_eq!(feedback("ERASE", "SPEED"), "YBYYB");
    assert_eq!(feedback("CRANE", "SPEED"), "BBYBB");
    assert_eq!(feedback("ABBEY", "BOBBY"), "YBGBG");
    assert_eq!(feedback("LEVEL", "EERIE"), "YGBBB");
}

#[test]
fn it_filters_repeated_letters() {
    let candidates = words();

    // SPEED against ERASE: both Es and the S are yellow, P and D are absent.
    let filtered = filter(&candidates, "SPEED", "YBYYB");
    assert!(filtered.contains(&"ERASE".to_string()));
    assert!(!filtered.contains(&"CRANE".to_string()));

    // Only one E is confirmed, the other is black: words with two or more Es go.
    let filtered = filter(&candidates, "SPEED", "BBYBB");
    assert!(filtered.contains(&"CRANE".to_string()));
    assert!(!filtered.contains(&"ERASE".to_string()));
    assert!(!filtered.contains(&"GEESE".to_string()));
}

#[test]
fn it_keeps_candidate_order() {
    let candidates = words();
    let filtered = filter(&candidates, "CRANE", "BBBBG");
    let positions: Vec<usize> = filtered
        .iter()
        .map(|w| candidates.iter().position(|c| c == w).unwrap())
        .collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
}

#[test]
fn it_empties_on_inconsistent_feedback() {
    assert!(filter(&["CRANE".to_string()], "CRANE", "BBBBB").is_empty());
    assert!(filter(&[], "CRANE", "GGGGG").is_empty());
}

#[test]
fn it_excludes() {
    let candidates = words();
    let excluded = exclude(&candidates, "SLATE");
    assert_eq!(excluded.len(), candidates.len() - 1);
    assert!(!excluded.contains(&"SLATE".to_string()));
    assert_eq!(exclude(&candidates, "ZEBRA"), candidates);
}

#[test]
fn it_chooses_by_letter_coverage() {
    // E, A and R are in every word. TRACE and CRATE both add C and T, and TRACE comes first.
    let candidates: Vec<String> = ["ERASE", "CRANE", "TRACE", "CRATE"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    assert_eq!(choose_next(&candidates).unwrap(), "TRACE");
}

#[test]
fn it_counts_repeated_letters_once() {
    // EERIE only scores E, R and I once each, so it loses to RIDGE.
    let candidates: Vec<String> = ["EERIE", "RIDGE"].iter().map(|w| w.to_string()).collect();
    assert_eq!(choose_next(&candidates).unwrap(), "RIDGE");
}

#[test]
fn it_breaks_ties_by_order() {
    let candidates: Vec<String> = ["CRANE", "NACRE"].iter().map(|w| w.to_string()).collect();
    assert_eq!(choose_next(&candidates).unwrap(), "CRANE");

    let reversed: Vec<String> = candidates.iter().rev().cloned().collect();
    assert_eq!(choose_next(&reversed).unwrap(), "NACRE");
}

#[test]
fn it_chooses_nothing_from_nothing() {
    assert_eq!(choose_next(&[]), None);
}

proptest! {
    #[test]
    fn filter_keeps_the_answer(target in 0..WORDS.len(), guess in 0..WORDS.len()) {
        let candidates = words();
        let (target, guess) = (WORDS[target], WORDS[guess]);
        let filtered = filter(&candidates, guess, &feedback(target, guess));
        prop_assert!(filtered.iter().any(|w| w == target));
    }

    #[test]
    fn filter_narrows(guess in 0..WORDS.len(), fb in "[GYB]{5}") {
        let candidates = words();
        let filtered = filter(&candidates, WORDS[guess], &fb);
        prop_assert!(filtered.iter().all(|w| candidates.contains(w)));
    }

    #[test]
    fn filter_is_idempotent(guess in 0..WORDS.len(), fb in "[GYB]{5}") {
        let once = filter(&words(), WORDS[guess], &fb);
        let twice = filter(&once, WORDS[guess], &fb);
        prop_assert_eq!(once, twice);
    }
}
