//! Game state for a single chat. A session is what the bot knows about the puzzle a user is
//! working on: the words still possible, the word it last suggested, and how many attempts
//! have been used.
use rand::{seq::SliceRandom, Rng};
use thiserror::Error;

use crate::wordle;

/// Attempts a Wordle player gets. Only used to tell the user how many they have left.
pub const MAX_ATTEMPTS: u32 = 6;

/// Mode is what the bot is doing for the user.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
pub enum Mode {
    /// The bot suggests every guess for a live puzzle and reads back its feedback.
    Solve,
    /// The user sends the words they played with their feedback, and gets a hint.
    Help,
    /// The bot hides a word for the user to guess. Not available.
    Play,
    /// Nothing in progress.
    Resting,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum SessionError {
    #[error("the word list is empty")]
    EmptyUniverse,

    #[error("no active game")]
    NotFound,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no words match the feedback")]
    NoCandidates,
}

/// Transition is how a feedback event moved the game along.
#[derive(Debug, Eq, PartialEq, Clone)]
pub enum Transition {
    /// The game continues with this word as the next guess.
    Guess(String),
    Won,
    Lost,
}

impl Transition {
    /// Returns true if the game is over after this transition.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Transition::Guess(_))
    }
}

/// Directives are the special words a user sends instead of feedback.
#[derive(Debug, Eq, PartialEq, Clone, Copy)]
enum Directive {
    /// The last suggested word was rejected by the game's dictionary.
    NotFound,
    Lose,
    Guess,
}

impl Directive {
    fn parse(input: &str) -> Option<Directive> {
        match input {
            "NOTFOUND" => Some(Directive::NotFound),
            "LOSE" => Some(Directive::Lose),
            "GUESS" => Some(Directive::Guess),
            _ => None,
        }
    }
}

/// Session represents a single game in progress.
#[derive(Debug, Clone)]
pub struct Session {
    /// Words still consistent with all the feedback so far.
    pub candidates: Vec<String>,

    /// The word the bot suggested last, if any.
    pub last_guess: Option<String>,

    pub active: bool,
    pub mode: Mode,

    /// Guesses used so far. In SOLVE mode this counts the guesses the bot issued, in HELP
    /// mode the observations the user sent.
    pub attempts: u32,
}

impl Session {
    /// `new` starts a game over `universe`. SOLVE games open with a word drawn from the
    /// opening set. PLAY and RESTING can't be started.
    pub fn new(universe: &[String], mode: Mode, rng: &mut impl Rng) -> Result<Session, SessionError> {
        if universe.is_empty() {
            return Err(SessionError::EmptyUniverse);
        }

        let (attempts, last_guess) = match mode {
            Mode::Solve => (1, wordle::OPENING_WORDS.choose(rng).map(|w| w.to_string())),
            Mode::Help => (0, None),
            Mode::Play => {
                return Err(SessionError::InvalidInput(
                    "play mode is not available".into(),
                ))
            }
            Mode::Resting => {
                return Err(SessionError::InvalidInput("nothing to start".into()))
            }
        };

        Ok(Session {
            candidates: universe.to_vec(),
            last_guess,
            active: true,
            mode,
            attempts,
        })
    }

    /// Attempts left out of `MAX_ATTEMPTS`.
    pub fn attempts_remaining(&self) -> u32 {
        MAX_ATTEMPTS.saturating_sub(self.attempts)
    }

    /// `apply` runs one feedback event against the session and returns the updated session
    /// along with the transition. `self` is left untouched so the caller can commit or
    /// discard the result as a whole.
    ///
    /// `input` must already be trimmed and uppercased.
    pub fn apply(&self, input: &str) -> Result<(Session, Transition), SessionError> {
        if !self.active {
            return Err(SessionError::NotFound);
        }

        if let Some(directive) = Directive::parse(input) {
            return self.apply_directive(directive);
        }

        match self.mode {
            Mode::Solve => self.apply_solve(input),
            Mode::Help => self.apply_help(input),
            Mode::Play | Mode::Resting => Err(SessionError::NotFound),
        }
    }

    fn apply_directive(&self, directive: Directive) -> Result<(Session, Transition), SessionError> {
        match directive {
            Directive::Lose => Ok((self.finished(), Transition::Lost)),
            Directive::Guess => Ok((self.finished(), Transition::Won)),
            Directive::NotFound => {
                let candidates = match &self.last_guess {
                    Some(guess) => wordle::exclude(&self.candidates, guess),
                    None => self.candidates.clone(),
                };
                let attempts = self.attempts.saturating_sub(1);
                self.advance(candidates, attempts)
            }
        }
    }

    fn apply_solve(&self, feedback: &str) -> Result<(Session, Transition), SessionError> {
        if !wordle::validate_feedback(feedback) {
            return Err(SessionError::InvalidInput(format!(
                "`{}` is not a feedback string",
                feedback
            )));
        }

        // All green means the bot's word was right.
        if feedback.bytes().all(|b| b == b'G') {
            return self.apply_directive(Directive::Guess);
        }

        let guess = self
            .last_guess
            .as_deref()
            .ok_or_else(|| SessionError::InvalidInput("there is no guess to score".into()))?;

        self.advance(
            wordle::filter(&self.candidates, guess, feedback),
            self.attempts,
        )
    }

    fn apply_help(&self, input: &str) -> Result<(Session, Transition), SessionError> {
        let observations = parse_observations(input)?;

        let candidates = observations
            .iter()
            .fold(self.candidates.clone(), |candidates, (word, feedback)| {
                wordle::filter(&candidates, word, feedback)
            });

        self.advance(candidates, self.attempts + observations.len() as u32)
    }

    // `advance` picks the next guess from `candidates`, and returns the session that would
    // result from playing it.
    fn advance(
        &self,
        candidates: Vec<String>,
        attempts: u32,
    ) -> Result<(Session, Transition), SessionError> {
        let guess = wordle::choose_next(&candidates)
            .cloned()
            .ok_or(SessionError::NoCandidates)?;

        // HELP sessions count observations, not hints.
        let attempts = match self.mode {
            Mode::Solve => attempts + 1,
            Mode::Help | Mode::Play | Mode::Resting => attempts,
        };

        Ok((
            Session {
                candidates,
                last_guess: Some(guess.clone()),
                active: true,
                mode: self.mode,
                attempts,
            },
            Transition::Guess(guess),
        ))
    }

    fn finished(&self) -> Session {
        Session {
            candidates: Vec::new(),
            last_guess: None,
            active: false,
            mode: Mode::Resting,
            attempts: self.attempts,
        }
    }
}

/// `parse_observations` reads HELP input: one `WORD FEEDBACK` pair per line, blank lines
/// ignored. Any malformed line rejects the whole batch.
pub fn parse_observations(input: &str) -> Result<Vec<(String, String)>, SessionError> {
    let mut observations = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            [word, feedback] if wordle::decode(word, feedback).is_some() => {
                observations.push((word.to_string(), feedback.to_string()))
            }
            _ => {
                return Err(SessionError::InvalidInput(format!(
                    "`{}` is not a word followed by its feedback",
                    line
                )))
            }
        }
    }

    if observations.is_empty() {
        return Err(SessionError::InvalidInput("no words were sent".into()));
    }

    Ok(observations)
}
