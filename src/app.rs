//! App is the main bot application. It owns the word list and the games in progress, one per
//! chat, and applies each chat's messages to its game.
use log::*;
use mobot::BotState;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, MutexGuard};

use crate::game::{Mode, Session, SessionError, Transition};
use crate::wordle;

/// SessionUpdate is what the bot reports back after applying a message to a game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionUpdate {
    pub mode: Mode,

    /// The guess the message was about, as it stood when the message was applied.
    pub scored: Option<String>,

    pub transition: Transition,
    pub attempts: u32,
    pub attempts_remaining: u32,
}

impl SessionUpdate {
    /// The word to play next, or None if the game is over.
    pub fn next_guess(&self) -> Option<&str> {
        match &self.transition {
            Transition::Guess(word) => Some(word.as_str()),
            Transition::Won | Transition::Lost => None,
        }
    }
}

/// SessionStore maps chat IDs to their games. Clones share the same map, and every
/// read-modify-write of a game happens under its lock.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<i64, Session>>>,
}

impl SessionStore {
    async fn lock(&self) -> MutexGuard<'_, HashMap<i64, Session>> {
        self.sessions.lock().await
    }

    /// Returns a copy of the chat's game, if it has one.
    pub async fn get(&self, chat_id: i64) -> Option<Session> {
        self.lock().await.get(&chat_id).cloned()
    }

    /// Number of games in progress.
    pub async fn len(&self) -> usize {
        self.lock().await.len()
    }

    /// Returns true if no game is in progress.
    pub async fn is_empty(&self) -> bool {
        self.lock().await.is_empty()
    }
}

/// App represents the bot state for the wordle bot.
#[derive(Clone, Default, BotState)]
pub struct App {
    pub game_name: String,
    universe: Arc<Vec<String>>,
    sessions: SessionStore,
}

impl App {
    /// Creates a new App instance. Words that aren't five uppercase letters are dropped.
    pub fn new(game_name: String, mut universe: Vec<String>) -> App {
        let loaded = universe.len();
        universe.retain(|w| wordle::validate_word(w));
        if universe.len() < loaded {
            warn!("Dropped {} invalid words from the word list", loaded - universe.len());
        }

        App {
            game_name,
            universe: Arc::new(universe),
            ..Default::default()
        }
    }

    /// Returns the games in progress.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Returns a copy of the chat's game, if it has one.
    pub async fn session(&self, chat_id: i64) -> Option<Session> {
        self.sessions.get(chat_id).await
    }

    /// Starts a new game for the chat, replacing any game already in progress.
    pub async fn start_session(&self, chat_id: i64, mode: Mode) -> Result<Session, SessionError> {
        let session = Session::new(&self.universe, mode, &mut rand::thread_rng())?;

        let replaced = self
            .sessions
            .lock()
            .await
            .insert(chat_id, session.clone());
        if replaced.is_some() {
            debug!("Chat {} abandoned its game", chat_id);
        }

        info!(
            "Chat {} started a {:?} game over {} words, opening with {:?}",
            chat_id,
            mode,
            session.candidates.len(),
            session.last_guess
        );
        Ok(session)
    }

    /// Applies a message to the chat's game. `input` must already be trimmed and uppercased.
    ///
    /// The game is replaced only if the message is accepted. It is removed once the game is
    /// won or lost, or if no word fits the feedback anymore.
    pub async fn apply_feedback(
        &self,
        chat_id: i64,
        input: &str,
    ) -> Result<SessionUpdate, SessionError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions.get(&chat_id).ok_or(SessionError::NotFound)?;
        let mode = session.mode;
        let scored = session.last_guess.clone();

        let (next, transition) = match session.apply(input) {
            Ok(result) => result,
            Err(SessionError::NoCandidates) => {
                sessions.remove(&chat_id);
                warn!("Chat {} ran out of candidates in {:?} mode", chat_id, mode);
                return Err(SessionError::NoCandidates);
            }
            Err(e) => {
                debug!("Chat {} sent rejected input {:?}: {}", chat_id, input, e);
                return Err(e);
            }
        };

        let update = SessionUpdate {
            mode,
            scored,
            transition: transition.clone(),
            attempts: next.attempts,
            attempts_remaining: next.attempts_remaining(),
        };

        if transition.is_terminal() {
            sessions.remove(&chat_id);
            info!("Chat {} finished its game: {:?}", chat_id, transition);
        } else {
            debug!(
                "Chat {} has {} candidates left, next guess {:?}",
                chat_id,
                next.candidates.len(),
                update.next_guess()
            );
            sessions.insert(chat_id, next);
        }

        Ok(update)
    }

    /// Ends the chat's game.
    pub async fn end_session(&self, chat_id: i64) -> Result<(), SessionError> {
        match self.sessions.lock().await.remove(&chat_id) {
            Some(_) => {
                info!("Chat {} ended its game", chat_id);
                Ok(())
            }
            None => Err(SessionError::NotFound),
        }
    }
}
